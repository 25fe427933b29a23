//! Audit log entry - account management history

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::value_objects::Snowflake;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AuditAction {
    Create,
    Delete,
}

impl AuditAction {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Create => "create",
            Self::Delete => "delete",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "create" => Some(Self::Create),
            "delete" => Some(Self::Delete),
            _ => None,
        }
    }
}

impl fmt::Display for AuditAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuditLogEntry {
    pub id: Snowflake,
    pub date: DateTime<Utc>,
    pub action: AuditAction,
    /// Administrator who performed the action
    pub admin_email: String,
    /// Account the action was performed on
    pub user_email: String,
    /// Outcome, recorded for deletions only
    pub success: Option<bool>,
}

impl AuditLogEntry {
    pub fn created(id: Snowflake, admin_email: &str, user_email: &str) -> Self {
        Self {
            id,
            date: Utc::now(),
            action: AuditAction::Create,
            admin_email: admin_email.to_string(),
            user_email: user_email.to_string(),
            success: None,
        }
    }

    pub fn deleted(id: Snowflake, admin_email: &str, user_email: &str, success: bool) -> Self {
        Self {
            action: AuditAction::Delete,
            success: Some(success),
            ..Self::created(id, admin_email, user_email)
        }
    }
}
