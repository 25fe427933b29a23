//! Request DTOs for API endpoints
//!
//! Bodies implement `Deserialize` and `Validate`; query strings only
//! `Deserialize`. The root provisioning routes keep the camelCase field
//! names existing clients send.

use chrono::{DateTime, NaiveDate, Utc};
use serde::Deserialize;
use validator::Validate;

use ssr_core::reports::{ControlFilter, DatePreset, SortDirection, SortField, StatusFilter};
use ssr_core::Snowflake;

// ============================================================================
// Auth Requests
// ============================================================================

#[derive(Debug, Clone, Deserialize, Validate)]
pub struct LoginRequest {
    #[validate(email(message = "Invalid email format"))]
    pub email: String,

    #[validate(length(min = 1, message = "Password is required"))]
    pub password: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct RefreshTokenRequest {
    pub refresh_token: String,
}

// ============================================================================
// Provisioning Requests
// ============================================================================

/// Batch account creation; either `count` or `emailIds` is required
#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateUsersRequest {
    #[validate(range(min = 1, max = 200, message = "count must be between 1 and 200"))]
    pub count: Option<u32>,

    /// Explicit login suffixes, used instead of sequential numbering
    #[validate(length(min = 1, max = 200, message = "emailIds must hold 1-200 entries"))]
    pub email_ids: Option<Vec<String>>,

    pub app_version: Option<String>,

    #[validate(length(min = 1, message = "associationId is required"))]
    pub association_id: String,

    /// Stored on profiles; defaults to the association's own name
    pub association_name: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct DeleteUsersRequest {
    pub emails: Vec<String>,
}

/// Preview of the addresses a deletion selection expands to
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct ResolveLoginsRequest {
    #[validate(length(min = 1, message = "association_id is required"))]
    pub association_id: String,

    /// e.g. `001-005, 007`
    #[validate(length(min = 1, max = 2000, message = "selection must be 1-2000 characters"))]
    pub selection: String,
}

// ============================================================================
// Inspection Requests
// ============================================================================

/// Inspection submitted by a ranger
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct SubmitControlRequest {
    /// Defaults to the time of submission
    pub control_date: Option<DateTime<Utc>>,

    #[validate(range(min = -90.0, max = 90.0, message = "latitude out of range"))]
    pub latitude: Option<f64>,

    #[validate(range(min = -180.0, max = 180.0, message = "longitude out of range"))]
    pub longitude: Option<f64>,

    /// Defaults to the ranger's display name
    #[validate(length(max = 200))]
    pub controller_name: Option<String>,

    #[validate(length(max = 200))]
    pub club_name: Option<String>,

    #[validate(length(max = 100))]
    pub group_code: Option<String>,

    #[validate(length(max = 100))]
    pub license_number: Option<String>,

    pub is_success: Option<bool>,

    #[serde(default)]
    #[validate(length(max = 50, message = "at most 50 rejection reasons"))]
    pub rejection_reasons: Vec<String>,
}

/// Filter shared by every report
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ReportQuery {
    #[serde(default)]
    pub preset: DatePreset,
    /// Day for the `custom` preset
    pub date: Option<NaiveDate>,
    pub club: Option<String>,
    #[serde(default)]
    pub status: StatusFilter,
    /// Global admins may narrow to one district
    pub association_id: Option<String>,
}

impl ReportQuery {
    pub fn filter(&self) -> ControlFilter {
        ControlFilter {
            preset: self.preset,
            date: self.date,
            club: self.club.clone(),
            status: self.status,
        }
    }
}

/// Inspection list query
///
/// Query strings cannot use `#[serde(flatten)]` with numeric fields, so the
/// report filter fields are repeated here.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ControlListQuery {
    #[serde(default)]
    pub preset: DatePreset,
    pub date: Option<NaiveDate>,
    pub club: Option<String>,
    #[serde(default)]
    pub status: StatusFilter,
    pub association_id: Option<String>,
    #[serde(default)]
    pub sort: SortField,
    #[serde(default)]
    pub direction: SortDirection,
    pub page: Option<u32>,
    pub per_page: Option<u32>,
}

impl ControlListQuery {
    pub fn report(&self) -> ReportQuery {
        ReportQuery {
            preset: self.preset,
            date: self.date,
            club: self.club.clone(),
            status: self.status,
            association_id: self.association_id.clone(),
        }
    }
}

#[derive(Debug, Clone, Deserialize, Validate)]
pub struct DeleteControlsRequest {
    #[validate(length(min = 1, max = 1000, message = "select 1-1000 inspections"))]
    pub ids: Vec<Snowflake>,

    pub password: String,
}

/// Duplicate listing query
#[derive(Debug, Clone, Default, Deserialize)]
pub struct DuplicatesQuery {
    #[serde(default)]
    pub preset: DatePreset,
    pub date: Option<NaiveDate>,
    pub club: Option<String>,
    #[serde(default)]
    pub status: StatusFilter,
    pub association_id: Option<String>,
    /// Only inspections of this ranger
    pub controller_id: Option<Snowflake>,
}

impl DuplicatesQuery {
    pub fn report(&self) -> ReportQuery {
        ReportQuery {
            preset: self.preset,
            date: self.date,
            club: self.club.clone(),
            status: self.status,
            association_id: self.association_id.clone(),
        }
    }
}

/// Delete the candidates of one group (`group_id`) or of every group
///
/// The filter is the one the groups were listed with; groups are
/// recomputed from it before anything is deleted.
#[derive(Debug, Clone, Deserialize)]
pub struct DeleteDuplicatesRequest {
    #[serde(flatten)]
    pub query: DuplicatesQuery,

    /// Id of the retained record of the group
    pub group_id: Option<Snowflake>,

    pub password: String,
}

// ============================================================================
// Rejection Reason Requests
// ============================================================================

#[derive(Debug, Clone, Deserialize, Validate)]
pub struct RejectionReasonRequest {
    #[validate(length(min = 1, max = 200, message = "reason must be 1-200 characters"))]
    pub reason: String,

    /// `None` targets the global list (global admins only)
    pub association_id: Option<String>,

    pub password: String,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct RejectionReasonQuery {
    /// Global admins may list one district's reasons
    pub association_id: Option<String>,
}

// ============================================================================
// Audit Log Requests
// ============================================================================

#[derive(Debug, Clone, Default, Deserialize)]
pub struct AuditLogQuery {
    pub page: Option<u32>,
    pub per_page: Option<u32>,
}
