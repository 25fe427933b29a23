//! What an administrator may see and manage
//!
//! An admin account bound to a district manages that district only; an
//! admin account without a district manages every district.

use ssr_core::entities::User;
use ssr_core::DomainError;

use super::error::ServiceResult;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AdminScope {
    Global,
    District(String),
}

impl AdminScope {
    /// Scope of `user`, failing for accounts without the admin role
    pub fn of(user: &User) -> ServiceResult<Self> {
        if !user.is_admin() {
            return Err(DomainError::AdminRequired.into());
        }
        Ok(match &user.association_id {
            Some(id) => Self::District(id.clone()),
            None => Self::Global,
        })
    }

    /// District restriction for queries; `None` for a global admin
    pub fn association_id(&self) -> Option<&str> {
        match self {
            Self::Global => None,
            Self::District(id) => Some(id),
        }
    }

    pub fn can_manage(&self, association_id: &str) -> bool {
        match self {
            Self::Global => true,
            Self::District(own) => own == association_id,
        }
    }

    pub fn ensure_can_manage(&self, association_id: &str) -> ServiceResult<()> {
        if self.can_manage(association_id) {
            Ok(())
        } else {
            Err(DomainError::AssociationForbidden(association_id.to_string()).into())
        }
    }

    /// Accounts without a district are only manageable by global admins
    pub fn can_manage_user(&self, user: &User) -> bool {
        match (self, user.association_id.as_deref()) {
            (Self::Global, _) => true,
            (Self::District(own), Some(theirs)) => own == theirs,
            (Self::District(_), None) => false,
        }
    }

    /// Narrow a requested district to what this scope allows
    ///
    /// District admins always get their own district; a global admin gets
    /// the requested one, or every district when none is requested.
    pub fn narrow(&self, requested: Option<&str>) -> ServiceResult<Option<String>> {
        match (self, requested.filter(|r| !r.is_empty())) {
            (Self::Global, requested) => Ok(requested.map(str::to_string)),
            (Self::District(own), None) => Ok(Some(own.clone())),
            (Self::District(own), Some(requested)) => {
                self.ensure_can_manage(requested)?;
                Ok(Some(own.clone()))
            }
        }
    }
}
