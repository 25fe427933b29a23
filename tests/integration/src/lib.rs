//! Integration test utilities for the ranger administration API
//!
//! Spawns the real router against the database named by `DATABASE_URL`
//! and drives it over HTTP.

pub mod fixtures;
pub mod helpers;

pub use fixtures::*;
pub use helpers::*;
