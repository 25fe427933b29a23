//! User entity <-> model mapper

use ssr_core::entities::User;
use ssr_core::value_objects::{Roles, Snowflake};

use crate::models::UserModel;

impl From<UserModel> for User {
    fn from(model: UserModel) -> Self {
        User {
            id: Snowflake::new(model.id),
            email: model.email,
            display_name: model.display_name,
            association_id: model.association_id,
            association_name: model.association_name,
            roles: Roles::from_names(&model.roles),
            app_version: model.app_version,
            created_at: model.created_at,
            updated_at: model.updated_at,
        }
    }
}

/// Bind values for inserting an account
pub struct UserInsert<'a> {
    pub id: i64,
    pub email: &'a str,
    pub password_hash: &'a str,
    pub display_name: Option<&'a str>,
    pub association_id: Option<&'a str>,
    pub association_name: Option<&'a str>,
    pub roles: Vec<String>,
    pub app_version: Option<&'a str>,
}

impl<'a> UserInsert<'a> {
    pub fn new(user: &'a User, password_hash: &'a str) -> Self {
        Self {
            id: user.id.into_inner(),
            email: &user.email,
            password_hash,
            display_name: user.display_name.as_deref(),
            association_id: user.association_id.as_deref(),
            association_name: user.association_name.as_deref(),
            roles: user.roles.names(),
            app_version: user.app_version.as_deref(),
        }
    }
}
