//! Inspection record database model

use chrono::{DateTime, Utc};
use sqlx::FromRow;

/// Row of ssr_controls joined with the controller's account address
#[derive(Debug, Clone, FromRow)]
pub struct ControlModel {
    pub id: i64,
    pub control_date: Option<DateTime<Utc>>,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
    pub controller_id: Option<i64>,
    pub controller_name: Option<String>,
    /// From `users`; NULL once the account is gone
    pub controller_email: Option<String>,
    pub association_id: Option<String>,
    pub association_name: Option<String>,
    pub association_club_name: Option<String>,
    pub group_code: Option<String>,
    pub license_number: Option<String>,
    pub is_success: Option<bool>,
    pub rejection_reasons: Vec<String>,
    pub created_at: DateTime<Utc>,
}
