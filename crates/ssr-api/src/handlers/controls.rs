//! Inspection handlers

use axum::{extract::State, Json};
use ssr_core::reports::MapPoint;
use ssr_service::dto::{
    ControlListQuery, ControlListResponse, ControlResponse, DeleteControlsRequest,
    DeletedResponse, ReportQuery, SubmitControlRequest,
};
use ssr_service::ControlService;

use crate::extractors::{AuthUser, QueryParams, ValidatedJson};
use crate::response::{ApiResult, Created, CsvFile};
use crate::state::AppState;

/// GET /controls
pub async fn list_controls(
    State(state): State<AppState>,
    AuthUser(user): AuthUser,
    QueryParams(query): QueryParams<ControlListQuery>,
) -> ApiResult<Json<ControlListResponse>> {
    let response = ControlService::new(state.service_context()).list(&user, query).await?;
    Ok(Json(response))
}

/// POST /controls
pub async fn submit_control(
    State(state): State<AppState>,
    AuthUser(user): AuthUser,
    ValidatedJson(request): ValidatedJson<SubmitControlRequest>,
) -> ApiResult<Created<Json<ControlResponse>>> {
    let response = ControlService::new(state.service_context()).submit(&user, request).await?;
    Ok(Created(Json(response)))
}

/// GET /controls/export
pub async fn export_controls(
    State(state): State<AppState>,
    AuthUser(user): AuthUser,
    QueryParams(query): QueryParams<ReportQuery>,
) -> ApiResult<CsvFile> {
    let export = ControlService::new(state.service_context()).export(&user, query).await?;
    Ok(CsvFile(export))
}

/// GET /controls/map
pub async fn control_map(
    State(state): State<AppState>,
    AuthUser(user): AuthUser,
    QueryParams(query): QueryParams<ReportQuery>,
) -> ApiResult<Json<Vec<MapPoint>>> {
    let points = ControlService::new(state.service_context()).map(&user, query).await?;
    Ok(Json(points))
}

/// POST /controls/delete
pub async fn delete_controls(
    State(state): State<AppState>,
    AuthUser(user): AuthUser,
    ValidatedJson(request): ValidatedJson<DeleteControlsRequest>,
) -> ApiResult<Json<DeletedResponse>> {
    let response = ControlService::new(state.service_context()).delete(&user, request).await?;
    Ok(Json(response))
}
