//! Rejection reason database model

use chrono::{DateTime, Utc};
use sqlx::FromRow;

/// Database model for possible_control_rejections table
#[derive(Debug, Clone, FromRow)]
pub struct RejectionReasonModel {
    pub id: i64,
    pub reason: String,
    pub association_id: Option<String>,
    pub created_at: DateTime<Utc>,
}
