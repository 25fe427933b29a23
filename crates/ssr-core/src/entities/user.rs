//! User entity - a login account together with its profile document

use chrono::{DateTime, Utc};

use crate::value_objects::{local_part, Roles, Snowflake};

/// Ranger or administrator account
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct User {
    pub id: Snowflake,
    /// Login address, unique across the service
    pub email: String,
    pub display_name: Option<String>,
    pub association_id: Option<String>,
    pub association_name: Option<String>,
    pub roles: Roles,
    /// Mobile app version the account was provisioned for
    pub app_version: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl User {
    pub fn new(id: Snowflake, email: String, roles: Roles) -> Self {
        let now = Utc::now();
        Self {
            id,
            email,
            display_name: None,
            association_id: None,
            association_name: None,
            roles,
            app_version: None,
            created_at: now,
            updated_at: now,
        }
    }

    /// Ranger account provisioned for an association
    pub fn ranger(
        id: Snowflake,
        email: String,
        association_id: String,
        association_name: String,
        app_version: String,
    ) -> Self {
        Self {
            association_id: Some(association_id),
            association_name: Some(association_name),
            app_version: Some(app_version),
            ..Self::new(id, email, Roles::RANGER)
        }
    }

    /// Login shown in reports, the address without its domain
    pub fn login(&self) -> &str {
        local_part(&self.email)
    }

    #[inline]
    pub fn is_admin(&self) -> bool {
        self.roles.is_admin()
    }

    #[inline]
    pub fn is_ranger(&self) -> bool {
        self.roles.is_ranger()
    }

    pub fn belongs_to(&self, association_id: &str) -> bool {
        self.association_id.as_deref() == Some(association_id)
    }
}
