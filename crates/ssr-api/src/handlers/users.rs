//! Account provisioning handlers
//!
//! `/create-users` and `/delete-users` keep the request and response shapes
//! the dashboard has always used; `/api/v1/users/resolve-logins` previews a
//! deletion selection.

use axum::{
    extract::{rejection::JsonRejection, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::{json, Value};
use ssr_service::dto::{
    CreateUsersRequest, CreateUsersResponse, DeleteUsersRequest, ResolveLoginsRequest,
    ResolveLoginsResponse,
};
use ssr_service::ProvisioningService;

use crate::extractors::{AuthUser, ValidatedJson};
use crate::response::ApiResult;
use crate::state::AppState;

/// POST /create-users
pub async fn create_users(
    State(state): State<AppState>,
    AuthUser(user): AuthUser,
    ValidatedJson(request): ValidatedJson<CreateUsersRequest>,
) -> ApiResult<Json<CreateUsersResponse>> {
    let response = ProvisioningService::new(state.service_context())
        .create_users(&user, request)
        .await?;
    Ok(Json(response))
}

/// POST /delete-users
///
/// A body without an `emails` array of strings is answered with
/// `{"success": false, "error": ...}` and status 400.
pub async fn delete_users(
    State(state): State<AppState>,
    AuthUser(user): AuthUser,
    body: Result<Json<Value>, JsonRejection>,
) -> ApiResult<Response> {
    let request = body
        .ok()
        .and_then(|Json(value)| serde_json::from_value::<DeleteUsersRequest>(value).ok());
    let Some(request) = request else {
        let body = json!({ "success": false, "error": "emails must be an array" });
        return Ok((StatusCode::BAD_REQUEST, Json(body)).into_response());
    };

    let response = ProvisioningService::new(state.service_context())
        .delete_users(&user, request.emails)
        .await?;
    Ok(Json(response).into_response())
}

/// POST /users/resolve-logins
pub async fn resolve_logins(
    State(state): State<AppState>,
    AuthUser(user): AuthUser,
    ValidatedJson(request): ValidatedJson<ResolveLoginsRequest>,
) -> ApiResult<Json<ResolveLoginsResponse>> {
    let response = ProvisioningService::new(state.service_context())
        .resolve_logins(&user, request)
        .await?;
    Ok(Json(response))
}
