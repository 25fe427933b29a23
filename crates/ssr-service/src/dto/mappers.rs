//! Entity to DTO mappers

use ssr_core::entities::{Association, AuditLogEntry, Control, RejectionReason, User};
use ssr_core::reports::{DuplicateGroup, ReportTimezone};

use super::responses::{
    AssociationResponse, AuditLogResponse, ControlResponse, CurrentUserResponse,
    DuplicateGroupResponse, RejectionReasonResponse,
};

impl From<&User> for CurrentUserResponse {
    fn from(user: &User) -> Self {
        Self {
            id: user.id,
            email: user.email.clone(),
            login: user.login().to_string(),
            display_name: user.display_name.clone(),
            association_id: user.association_id.clone(),
            association_name: user.association_name.clone(),
            roles: user.roles,
            app_version: user.app_version.clone(),
            created_at: user.created_at,
        }
    }
}

impl From<Association> for AssociationResponse {
    fn from(association: Association) -> Self {
        Self {
            id: association.id,
            name: association.name,
            login_prefix: association.login_prefix,
        }
    }
}

impl ControlResponse {
    /// Render a record with its date and time in `tz`
    pub fn new(control: Control, tz: ReportTimezone) -> Self {
        let local = control.control_date.map(|d| tz.to_local(d));
        let controller_login = control.controller_login().map(str::to_string);
        Self {
            id: control.id,
            control_date: control.control_date,
            date: local.map(|d| d.format("%-d.%m.%Y").to_string()),
            time: local.map(|d| d.format("%H:%M").to_string()),
            latitude: control.position.map(|p| p.latitude),
            longitude: control.position.map(|p| p.longitude),
            controller_id: control.controller_id,
            controller_name: control.controller_name,
            controller_login,
            association_id: control.association_id,
            association_name: control.association_name,
            club_name: control.club_name,
            group_code: control.group_code,
            license_number: control.license_number,
            is_success: control.is_success,
            rejection_reasons: control.rejection_reasons,
        }
    }
}

impl DuplicateGroupResponse {
    pub fn new(group: DuplicateGroup<Control>, tz: ReportTimezone) -> Self {
        let id = group.id();
        let group = group.map(|c| ControlResponse::new(c, tz));
        Self {
            id,
            retained: group.retained,
            duplicates: group.duplicates,
        }
    }
}

impl From<RejectionReason> for RejectionReasonResponse {
    fn from(reason: RejectionReason) -> Self {
        Self {
            id: reason.id,
            global: reason.is_global(),
            reason: reason.reason,
            association_id: reason.association_id,
        }
    }
}

impl From<AuditLogEntry> for AuditLogResponse {
    fn from(entry: AuditLogEntry) -> Self {
        Self {
            id: entry.id,
            date: entry.date,
            action: entry.action,
            admin_email: entry.admin_email,
            user_email: entry.user_email,
            success: entry.success,
        }
    }
}
