//! Rejection reason entity - a selectable cause for a failed inspection

use chrono::{DateTime, Utc};

use crate::value_objects::Snowflake;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RejectionReason {
    pub id: Snowflake,
    pub reason: String,
    /// `None` makes the reason available to every association
    pub association_id: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl RejectionReason {
    pub fn new(id: Snowflake, reason: String, association_id: Option<String>) -> Self {
        Self {
            id,
            reason,
            association_id,
            created_at: Utc::now(),
        }
    }

    #[inline]
    pub fn is_global(&self) -> bool {
        self.association_id.is_none()
    }

    /// Whether an administrator scoped to `association_id` sees this reason
    pub fn visible_to(&self, association_id: Option<&str>) -> bool {
        match (association_id, self.association_id.as_deref()) {
            (None, _) | (_, None) => true,
            (Some(scope), Some(own)) => scope == own,
        }
    }
}
