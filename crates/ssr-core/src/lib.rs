//! # ssr-core
//!
//! Domain layer of the ranger administration service: entities, value
//! objects, repository traits and the pure report and provisioning logic.
//! This crate has no dependencies on infrastructure (database, web framework).

pub mod entities;
pub mod error;
pub mod provisioning;
pub mod reports;
pub mod traits;
pub mod value_objects;

// Re-export commonly used types at crate root
pub use entities::{Association, AuditAction, AuditLogEntry, Control, RejectionReason, User};
pub use error::DomainError;
pub use traits::{
    AssociationRepository, AuditLogRepository, ControlRepository, RejectionReasonRepository,
    RepoResult, UserRepository,
};
pub use value_objects::{
    GeoPosition, LoginPattern, Roles, Snowflake, SnowflakeGenerator, SnowflakeParseError,
};
