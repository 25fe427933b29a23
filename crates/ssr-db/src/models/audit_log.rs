//! Audit log database model

use chrono::{DateTime, Utc};
use sqlx::FromRow;

/// Database model for user_mngmnt_logs table
#[derive(Debug, Clone, FromRow)]
pub struct AuditLogModel {
    pub id: i64,
    pub date: DateTime<Utc>,
    /// `create` or `delete`, enforced by a CHECK constraint
    pub action: String,
    pub admin_email: String,
    pub user_email: String,
    pub success: Option<bool>,
}
