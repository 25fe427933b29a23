//! District listing

use axum::{extract::State, Json};
use ssr_service::dto::AssociationResponse;
use ssr_service::AssociationService;

use crate::extractors::AuthUser;
use crate::response::ApiResult;
use crate::state::AppState;

/// GET /associations
pub async fn list_associations(
    State(state): State<AppState>,
    AuthUser(user): AuthUser,
) -> ApiResult<Json<Vec<AssociationResponse>>> {
    let associations = AssociationService::new(state.service_context()).list(&user).await?;
    Ok(Json(associations))
}
