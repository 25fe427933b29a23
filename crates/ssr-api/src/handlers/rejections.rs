//! Rejection reason handlers

use axum::{extract::State, Json};
use ssr_service::dto::{
    RejectionReasonChange, RejectionReasonQuery, RejectionReasonRequest, RejectionReasonResponse,
};
use ssr_service::RejectionReasonService;

use crate::extractors::{AuthUser, QueryParams, ValidatedJson};
use crate::response::ApiResult;
use crate::state::AppState;

/// GET /rejection-reasons
pub async fn list_reasons(
    State(state): State<AppState>,
    AuthUser(user): AuthUser,
    QueryParams(query): QueryParams<RejectionReasonQuery>,
) -> ApiResult<Json<Vec<RejectionReasonResponse>>> {
    let reasons = RejectionReasonService::new(state.service_context()).list(&user, query).await?;
    Ok(Json(reasons))
}

/// POST /rejection-reasons
pub async fn add_reason(
    State(state): State<AppState>,
    AuthUser(user): AuthUser,
    ValidatedJson(request): ValidatedJson<RejectionReasonRequest>,
) -> ApiResult<Json<RejectionReasonChange>> {
    let change = RejectionReasonService::new(state.service_context()).add(&user, request).await?;
    Ok(Json(change))
}

/// DELETE /rejection-reasons
pub async fn remove_reason(
    State(state): State<AppState>,
    AuthUser(user): AuthUser,
    ValidatedJson(request): ValidatedJson<RejectionReasonRequest>,
) -> ApiResult<Json<RejectionReasonChange>> {
    let change = RejectionReasonService::new(state.service_context()).remove(&user, request).await?;
    Ok(Json(change))
}
