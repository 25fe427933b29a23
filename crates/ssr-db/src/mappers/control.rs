//! Control entity <-> model mapper

use ssr_core::entities::Control;
use ssr_core::value_objects::{GeoPosition, Snowflake};

use crate::models::ControlModel;

impl From<ControlModel> for Control {
    fn from(model: ControlModel) -> Self {
        Control {
            id: Snowflake::new(model.id),
            control_date: model.control_date,
            position: GeoPosition::from_parts(model.latitude, model.longitude),
            controller_id: model.controller_id.map(Snowflake::new),
            controller_name: model.controller_name,
            controller_email: model.controller_email,
            association_id: model.association_id,
            association_name: model.association_name,
            club_name: model.association_club_name,
            group_code: model.group_code,
            license_number: model.license_number,
            is_success: model.is_success,
            rejection_reasons: model.rejection_reasons,
            created_at: model.created_at,
        }
    }
}

/// Bind values for inserting an inspection record
pub struct ControlInsert<'a> {
    pub id: i64,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
    pub controller_id: Option<i64>,
    pub control: &'a Control,
}

impl<'a> ControlInsert<'a> {
    pub fn new(control: &'a Control) -> Self {
        Self {
            id: control.id.into_inner(),
            latitude: control.position.map(|p| p.latitude),
            longitude: control.position.map(|p| p.longitude),
            controller_id: control.controller_id.map(Snowflake::into_inner),
            control,
        }
    }
}
