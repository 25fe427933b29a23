//! Response DTOs for API endpoints
//!
//! Snowflake IDs are serialized as strings for JavaScript compatibility.

use chrono::{DateTime, Utc};
use serde::Serialize;

use ssr_core::entities::AuditAction;
use ssr_core::reports::{Page, PeriodBucket};
use ssr_core::{Roles, Snowflake};

// ============================================================================
// Auth Responses
// ============================================================================

#[derive(Debug, Clone, Serialize)]
pub struct AuthResponse {
    pub access_token: String,
    pub refresh_token: String,
    pub token_type: String,
    pub expires_in: i64,
    pub user: CurrentUserResponse,
}

#[derive(Debug, Clone, Serialize)]
pub struct CurrentUserResponse {
    pub id: Snowflake,
    pub email: String,
    pub login: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub display_name: Option<String>,
    pub association_id: Option<String>,
    pub association_name: Option<String>,
    pub roles: Roles,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub app_version: Option<String>,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize)]
pub struct AssociationResponse {
    pub id: String,
    pub name: String,
    pub login_prefix: String,
}

// ============================================================================
// Provisioning Responses
// ============================================================================

/// Outcome for one account of a creation batch
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum CreatedAccount {
    Created {
        email: String,
        password: String,
        uid: Snowflake,
    },
    Skipped {
        email: String,
        skipped: bool,
    },
    Failed {
        email: String,
        error: String,
    },
}

impl CreatedAccount {
    pub fn email(&self) -> &str {
        match self {
            Self::Created { email, .. } | Self::Skipped { email, .. } | Self::Failed { email, .. } => email,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateUsersResponse {
    pub success: bool,
    pub users: Vec<CreatedAccount>,
    /// `email,password` rows for the created accounts only
    pub credentials_csv: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DeleteUserResult {
    pub success: bool,
    pub email: String,
    pub message: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct DeleteUsersResponse {
    pub success: bool,
    pub results: Vec<DeleteUserResult>,
}

#[derive(Debug, Clone, Serialize)]
pub struct ResolveLoginsResponse {
    pub association_id: String,
    pub count: usize,
    pub emails: Vec<String>,
}

// ============================================================================
// Inspection Responses
// ============================================================================

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ControlResponse {
    pub id: Snowflake,
    pub control_date: Option<DateTime<Utc>>,
    /// `d.MM.yyyy` in the report time zone
    pub date: Option<String>,
    /// `HH:mm` in the report time zone
    pub time: Option<String>,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
    pub controller_id: Option<Snowflake>,
    pub controller_name: Option<String>,
    pub controller_login: Option<String>,
    pub association_id: Option<String>,
    pub association_name: Option<String>,
    pub club_name: Option<String>,
    pub group_code: Option<String>,
    pub license_number: Option<String>,
    pub is_success: Option<bool>,
    pub rejection_reasons: Vec<String>,
}

#[derive(Debug, Clone, Serialize)]
pub struct ControlListResponse {
    #[serde(flatten)]
    pub page: Page<ControlResponse>,
    /// Club names present in the unfiltered district data
    pub clubs: Vec<String>,
    /// Records hidden as duplicates of a listed record
    pub hidden_duplicates: usize,
}

#[derive(Debug, Clone, Serialize)]
pub struct DuplicateGroupResponse {
    /// Id of the retained record
    pub id: Snowflake,
    pub retained: ControlResponse,
    pub duplicates: Vec<ControlResponse>,
}

/// Ranger that appears in the filtered data
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ControllerOption {
    pub id: Snowflake,
    pub name: Option<String>,
    pub login: Option<String>,
}

#[derive(Debug, Clone, Serialize)]
pub struct DuplicatesResponse {
    pub groups: Vec<DuplicateGroupResponse>,
    pub total_groups: usize,
    pub total_duplicates: usize,
    pub controllers: Vec<ControllerOption>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct DeletedResponse {
    pub deleted: u64,
}

// ============================================================================
// Report Responses
// ============================================================================

#[derive(Debug, Clone, Serialize)]
pub struct PeriodStatsResponse {
    /// `day` or `month`
    pub granularity: &'static str,
    pub buckets: Vec<PeriodBucket>,
}

/// Downloadable CSV document
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CsvExport {
    pub filename: String,
    pub content: String,
    pub rows: usize,
}

// ============================================================================
// Rejection Reason and Audit Responses
// ============================================================================

#[derive(Debug, Clone, Serialize)]
pub struct RejectionReasonResponse {
    pub id: Snowflake,
    pub reason: String,
    pub association_id: Option<String>,
    pub global: bool,
}

#[derive(Debug, Clone, Serialize)]
pub struct RejectionReasonChange {
    pub reason: String,
    /// False when the reason already existed (add) or was missing (remove)
    pub changed: bool,
}

#[derive(Debug, Clone, Serialize)]
pub struct AuditLogResponse {
    pub id: Snowflake,
    pub date: DateTime<Utc>,
    pub action: AuditAction,
    pub admin_email: String,
    pub user_email: String,
    pub success: Option<bool>,
}

// ============================================================================
// Health Responses
// ============================================================================

#[derive(Debug, Clone, Serialize)]
pub struct HealthResponse {
    pub status: String,
    pub timestamp: DateTime<Utc>,
}

impl HealthResponse {
    pub fn healthy() -> Self {
        Self {
            status: "healthy".to_string(),
            timestamp: Utc::now(),
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct ReadinessResponse {
    pub status: String,
    pub timestamp: DateTime<Utc>,
    pub database: String,
}

impl ReadinessResponse {
    pub fn ready(database_healthy: bool) -> Self {
        Self {
            status: if database_healthy { "ready" } else { "not_ready" }.to_string(),
            timestamp: Utc::now(),
            database: if database_healthy { "healthy" } else { "unhealthy" }.to_string(),
        }
    }

    pub fn is_ready(&self) -> bool {
        self.status == "ready"
    }
}
