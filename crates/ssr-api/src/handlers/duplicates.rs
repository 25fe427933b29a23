//! Duplicate review handlers

use axum::{
    extract::{rejection::JsonRejection, State},
    Json,
};
use ssr_service::dto::{DeleteDuplicatesRequest, DeletedResponse, DuplicatesQuery, DuplicatesResponse};
use ssr_service::DuplicateService;

use crate::extractors::{json_rejection, AuthUser, QueryParams};
use crate::response::ApiResult;
use crate::state::AppState;

/// GET /duplicates
pub async fn list_duplicates(
    State(state): State<AppState>,
    AuthUser(user): AuthUser,
    QueryParams(query): QueryParams<DuplicatesQuery>,
) -> ApiResult<Json<DuplicatesResponse>> {
    let response = DuplicateService::new(state.service_context()).list(&user, query).await?;
    Ok(Json(response))
}

/// POST /duplicates/delete
pub async fn delete_duplicates(
    State(state): State<AppState>,
    AuthUser(user): AuthUser,
    body: Result<Json<DeleteDuplicatesRequest>, JsonRejection>,
) -> ApiResult<Json<DeletedResponse>> {
    let Json(request) = body.map_err(json_rejection)?;
    let response = DuplicateService::new(state.service_context()).delete(&user, request).await?;
    Ok(Json(response))
}
