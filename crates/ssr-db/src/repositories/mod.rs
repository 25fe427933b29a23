//! Repository implementations
//!
//! PostgreSQL implementations of the repository traits defined in ssr-core.

mod association;
mod audit_log;
mod control;
mod error;
mod rejection_reason;
mod user;

pub use association::PgAssociationRepository;
pub use audit_log::PgAuditLogRepository;
pub use control::PgControlRepository;
pub use rejection_reason::PgRejectionReasonRepository;
pub use user::PgUserRepository;
