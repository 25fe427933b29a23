//! Association entity - a regional district ("okręg")

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::value_objects::LoginPattern;

/// Regional association whose rangers share one login prefix
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Association {
    /// Opaque identifier carried over from the profile documents
    pub id: String,
    pub name: String,
    /// Login prefix such as `MAZSSR_`
    pub login_prefix: String,
    pub created_at: DateTime<Utc>,
}

impl Association {
    pub fn new(id: impl Into<String>, name: impl Into<String>, login_prefix: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            login_prefix: login_prefix.into(),
            created_at: Utc::now(),
        }
    }

    pub fn login_pattern(&self, domain: &str) -> LoginPattern {
        LoginPattern::new(self.login_prefix.clone(), domain)
    }
}
