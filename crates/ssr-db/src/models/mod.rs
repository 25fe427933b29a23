//! Database models - SQLx-compatible structs for PostgreSQL tables

mod association;
mod audit_log;
mod control;
mod rejection_reason;
mod user;

pub use association::AssociationModel;
pub use audit_log::AuditLogModel;
pub use control::ControlModel;
pub use rejection_reason::RejectionReasonModel;
pub use user::UserModel;
