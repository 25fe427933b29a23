//! Domain errors - error types for the domain layer

use thiserror::Error;

use crate::value_objects::Snowflake;

/// Domain layer errors
#[derive(Debug, Clone, Error)]
pub enum DomainError {
    // =========================================================================
    // Not Found Errors
    // =========================================================================
    #[error("User not found: {0}")]
    UserNotFound(String),

    #[error("Association not found: {0}")]
    AssociationNotFound(String),

    #[error("Control not found: {0}")]
    ControlNotFound(Snowflake),

    #[error("Rejection reason not found: {0}")]
    RejectionReasonNotFound(String),

    #[error("Duplicate group not found: {0}")]
    DuplicateGroupNotFound(Snowflake),

    // =========================================================================
    // Validation Errors
    // =========================================================================
    #[error("Validation error: {0}")]
    ValidationError(String),

    #[error("Invalid login selection: {0}")]
    InvalidSelection(String),

    #[error("Invalid date filter: {0}")]
    InvalidDateFilter(String),

    // =========================================================================
    // Authorization Errors
    // =========================================================================
    #[error("Administrator role required")]
    AdminRequired,

    #[error("Ranger role required")]
    RangerRequired,

    #[error("Association is outside the administrator's scope: {0}")]
    AssociationForbidden(String),

    #[error("Confirmation password is incorrect")]
    ConfirmationFailed,

    // =========================================================================
    // Conflict Errors
    // =========================================================================
    #[error("Email already in use: {0}")]
    EmailAlreadyExists(String),

    #[error("Login prefix already in use: {0}")]
    LoginPrefixExists(String),

    // =========================================================================
    // Infrastructure Errors (wrapped)
    // =========================================================================
    #[error("Database error: {0}")]
    DatabaseError(String),

    #[error("Internal error: {0}")]
    InternalError(String),
}

impl DomainError {
    /// Get an error code string for API responses
    pub fn code(&self) -> &'static str {
        match self {
            Self::UserNotFound(_) => "UNKNOWN_USER",
            Self::AssociationNotFound(_) => "UNKNOWN_ASSOCIATION",
            Self::ControlNotFound(_) => "UNKNOWN_CONTROL",
            Self::RejectionReasonNotFound(_) => "UNKNOWN_REJECTION_REASON",
            Self::DuplicateGroupNotFound(_) => "UNKNOWN_DUPLICATE_GROUP",

            Self::ValidationError(_) => "VALIDATION_ERROR",
            Self::InvalidSelection(_) => "INVALID_SELECTION",
            Self::InvalidDateFilter(_) => "INVALID_DATE_FILTER",

            Self::AdminRequired => "ADMIN_REQUIRED",
            Self::RangerRequired => "RANGER_REQUIRED",
            Self::AssociationForbidden(_) => "ASSOCIATION_FORBIDDEN",
            Self::ConfirmationFailed => "CONFIRMATION_FAILED",

            Self::EmailAlreadyExists(_) => "EMAIL_ALREADY_EXISTS",
            Self::LoginPrefixExists(_) => "LOGIN_PREFIX_EXISTS",

            Self::DatabaseError(_) => "DATABASE_ERROR",
            Self::InternalError(_) => "INTERNAL_ERROR",
        }
    }

    /// Check if this is a "not found" error
    pub fn is_not_found(&self) -> bool {
        matches!(
            self,
            Self::UserNotFound(_)
                | Self::AssociationNotFound(_)
                | Self::ControlNotFound(_)
                | Self::RejectionReasonNotFound(_)
                | Self::DuplicateGroupNotFound(_)
        )
    }

    /// Check if this is a validation error
    pub fn is_validation(&self) -> bool {
        matches!(
            self,
            Self::ValidationError(_) | Self::InvalidSelection(_) | Self::InvalidDateFilter(_)
        )
    }

    /// Check if this is an authorization error
    pub fn is_authorization(&self) -> bool {
        matches!(
            self,
            Self::AdminRequired
                | Self::RangerRequired
                | Self::AssociationForbidden(_)
                | Self::ConfirmationFailed
        )
    }

    /// Check if this is a conflict error
    pub fn is_conflict(&self) -> bool {
        matches!(self, Self::EmailAlreadyExists(_) | Self::LoginPrefixExists(_))
    }
}
