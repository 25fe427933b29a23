//! Domain entities - core business objects

mod association;
mod audit_log;
mod control;
mod rejection_reason;
mod user;

pub use association::Association;
pub use audit_log::{AuditAction, AuditLogEntry};
pub use control::Control;
pub use rejection_reason::RejectionReason;
pub use user::User;
