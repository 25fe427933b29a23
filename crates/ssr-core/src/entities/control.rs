//! Control entity - one field inspection ("kontrola") logged by a ranger

use chrono::{DateTime, Utc};

use crate::value_objects::{local_part, GeoPosition, Snowflake};

/// Inspection record
///
/// Almost every field is optional: records come from a mobile client and
/// older app versions omit fields freely.
#[derive(Debug, Clone, PartialEq)]
pub struct Control {
    pub id: Snowflake,
    pub control_date: Option<DateTime<Utc>>,
    pub position: Option<GeoPosition>,
    /// Account id of the inspecting ranger
    pub controller_id: Option<Snowflake>,
    pub controller_name: Option<String>,
    /// Address of the inspecting ranger, resolved from the account
    pub controller_email: Option<String>,
    pub association_id: Option<String>,
    pub association_name: Option<String>,
    /// Local club ("koło")
    pub club_name: Option<String>,
    pub group_code: Option<String>,
    pub license_number: Option<String>,
    pub is_success: Option<bool>,
    pub rejection_reasons: Vec<String>,
    pub created_at: DateTime<Utc>,
}

impl Control {
    pub fn new(id: Snowflake) -> Self {
        Self {
            id,
            control_date: None,
            position: None,
            controller_id: None,
            controller_name: None,
            controller_email: None,
            association_id: None,
            association_name: None,
            club_name: None,
            group_code: None,
            license_number: None,
            is_success: None,
            rejection_reasons: Vec::new(),
            created_at: Utc::now(),
        }
    }

    /// Ranger login ("ID Strażnika"), when the account still exists
    pub fn controller_login(&self) -> Option<&str> {
        self.controller_email.as_deref().map(local_part)
    }

    /// Rejection reasons as one line
    pub fn reasons_text(&self) -> String {
        self.rejection_reasons.join("; ")
    }

    /// Whether the inspection counts as rejected in the status filter
    ///
    /// Records with no recorded outcome are listed among the rejected ones.
    #[inline]
    pub fn is_rejected(&self) -> bool {
        self.is_success != Some(true)
    }
}
