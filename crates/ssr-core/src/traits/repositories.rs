//! Repository traits (ports) - define the interface for data access
//!
//! The domain layer defines what it needs, and the infrastructure layer
//! provides the implementation.

use async_trait::async_trait;

use crate::entities::{Association, AuditLogEntry, Control, RejectionReason, User};
use crate::error::DomainError;
use crate::reports::ControlQuery;
use crate::value_objects::Snowflake;

/// Result type for repository operations
pub type RepoResult<T> = Result<T, DomainError>;

// ============================================================================
// User Repository
// ============================================================================

#[async_trait]
pub trait UserRepository: Send + Sync {
    async fn find_by_id(&self, id: Snowflake) -> RepoResult<Option<User>>;

    async fn find_by_email(&self, email: &str) -> RepoResult<Option<User>>;

    async fn email_exists(&self, email: &str) -> RepoResult<bool>;

    /// Every address starting with `prefix`
    async fn find_emails_by_prefix(&self, prefix: &str) -> RepoResult<Vec<String>>;

    /// Create the account and its profile
    ///
    /// Fails with [`DomainError::EmailAlreadyExists`] when the address is taken.
    async fn create(&self, user: &User, password_hash: &str) -> RepoResult<()>;

    /// Hard delete; returns whether an account was removed
    async fn delete(&self, id: Snowflake) -> RepoResult<bool>;

    async fn get_password_hash(&self, id: Snowflake) -> RepoResult<Option<String>>;
}

// ============================================================================
// Association Repository
// ============================================================================

#[async_trait]
pub trait AssociationRepository: Send + Sync {
    async fn find_by_id(&self, id: &str) -> RepoResult<Option<Association>>;

    async fn list(&self) -> RepoResult<Vec<Association>>;

    async fn create(&self, association: &Association) -> RepoResult<()>;
}

// ============================================================================
// Control Repository
// ============================================================================

#[async_trait]
pub trait ControlRepository: Send + Sync {
    async fn find_by_id(&self, id: Snowflake) -> RepoResult<Option<Control>>;

    /// Records matching `query`, newest first, with controller addresses resolved
    async fn find(&self, query: &ControlQuery) -> RepoResult<Vec<Control>>;

    async fn create(&self, control: &Control) -> RepoResult<()>;

    /// Delete the given records, limited to one association when scoped
    async fn delete_many(&self, ids: &[Snowflake], association_id: Option<&str>) -> RepoResult<u64>;
}

// ============================================================================
// Rejection Reason Repository
// ============================================================================

#[async_trait]
pub trait RejectionReasonRepository: Send + Sync {
    /// Global reasons plus those of `association_id`; every reason when `None`
    async fn list(&self, association_id: Option<&str>) -> RepoResult<Vec<RejectionReason>>;

    /// Insert unless the same text already exists in the same scope
    async fn add(&self, reason: &RejectionReason) -> RepoResult<bool>;

    /// Remove by text and scope; returns whether a row was removed
    async fn remove(&self, reason: &str, association_id: Option<&str>) -> RepoResult<bool>;
}

// ============================================================================
// Audit Log Repository
// ============================================================================

#[async_trait]
pub trait AuditLogRepository: Send + Sync {
    async fn create(&self, entry: &AuditLogEntry) -> RepoResult<()>;

    /// Newest first
    async fn list(&self, limit: i64, offset: i64) -> RepoResult<Vec<AuditLogEntry>>;

    async fn count(&self) -> RepoResult<i64>;
}
