//! Association model -> entity mapper

use ssr_core::entities::Association;

use crate::models::AssociationModel;

impl From<AssociationModel> for Association {
    fn from(model: AssociationModel) -> Self {
        Association {
            id: model.id,
            name: model.name,
            login_prefix: model.login_prefix,
            created_at: model.created_at,
        }
    }
}
