//! Business logic services
//!
//! Services borrow a [`ServiceContext`] and act on behalf of an already
//! authenticated account.

pub mod association;
pub mod audit;
pub mod auth;
pub mod context;
pub mod control;
pub mod duplicate;
pub mod error;
pub mod provisioning;
pub mod rejection;
mod report;
pub mod scope;
pub mod stats;

#[cfg(test)]
pub(crate) mod testing;

pub use association::AssociationService;
pub use audit::AuditLogService;
pub use auth::AuthService;
pub use context::{ServiceContext, ServiceContextBuilder, ServiceSettings};
pub use control::ControlService;
pub use duplicate::DuplicateService;
pub use error::{ServiceError, ServiceResult};
pub use provisioning::ProvisioningService;
pub use rejection::RejectionReasonService;
pub use scope::AdminScope;
pub use stats::StatsService;
