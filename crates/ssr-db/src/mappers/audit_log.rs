//! Audit log model -> entity mapper

use ssr_core::entities::{AuditAction, AuditLogEntry};
use ssr_core::error::DomainError;
use ssr_core::value_objects::Snowflake;

use crate::models::AuditLogModel;

impl TryFrom<AuditLogModel> for AuditLogEntry {
    type Error = DomainError;

    fn try_from(model: AuditLogModel) -> Result<Self, Self::Error> {
        let action = AuditAction::parse(&model.action).ok_or_else(|| {
            DomainError::DatabaseError(format!("unknown audit action '{}'", model.action))
        })?;
        Ok(AuditLogEntry {
            id: Snowflake::new(model.id),
            date: model.date,
            action,
            admin_email: model.admin_email,
            user_email: model.user_email,
            success: model.success,
        })
    }
}
