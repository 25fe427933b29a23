//! User database model

use chrono::{DateTime, Utc};
use sqlx::FromRow;

/// Database model for users table, without the password hash
#[derive(Debug, Clone, FromRow)]
pub struct UserModel {
    pub id: i64,
    pub email: String,
    pub display_name: Option<String>,
    pub association_id: Option<String>,
    pub association_name: Option<String>,
    pub roles: Vec<String>,
    pub app_version: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}
