//! Route handlers
//!
//! All HTTP request handlers organized by domain.

pub mod associations;
pub mod audit;
pub mod auth;
pub mod controls;
pub mod duplicates;
pub mod health;
pub mod rejections;
pub mod stats;
pub mod users;
