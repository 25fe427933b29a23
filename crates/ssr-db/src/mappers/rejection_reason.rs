//! Rejection reason model -> entity mapper

use ssr_core::entities::RejectionReason;
use ssr_core::value_objects::Snowflake;

use crate::models::RejectionReasonModel;

impl From<RejectionReasonModel> for RejectionReason {
    fn from(model: RejectionReasonModel) -> Self {
        RejectionReason {
            id: Snowflake::new(model.id),
            reason: model.reason,
            association_id: model.association_id,
            created_at: model.created_at,
        }
    }
}
