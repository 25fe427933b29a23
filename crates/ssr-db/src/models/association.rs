//! Association database model

use chrono::{DateTime, Utc};
use sqlx::FromRow;

/// Database model for associations table
#[derive(Debug, Clone, FromRow)]
pub struct AssociationModel {
    pub id: String,
    pub name: String,
    pub login_prefix: String,
    pub created_at: DateTime<Utc>,
}
