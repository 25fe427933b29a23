//! Authentication handlers
//!
//! Endpoints for login, token refresh and the current account.

use axum::{
    extract::{rejection::JsonRejection, State},
    Json,
};
use ssr_service::dto::{AuthResponse, CurrentUserResponse, LoginRequest, RefreshTokenRequest};
use ssr_service::AuthService;

use crate::extractors::{json_rejection, AuthUser, ValidatedJson};
use crate::response::ApiResult;
use crate::state::AppState;

/// POST /auth/login
pub async fn login(
    State(state): State<AppState>,
    ValidatedJson(request): ValidatedJson<LoginRequest>,
) -> ApiResult<Json<AuthResponse>> {
    let response = AuthService::new(state.service_context()).login(request).await?;
    Ok(Json(response))
}

/// POST /auth/refresh
pub async fn refresh_token(
    State(state): State<AppState>,
    body: Result<Json<RefreshTokenRequest>, JsonRejection>,
) -> ApiResult<Json<AuthResponse>> {
    let Json(request) = body.map_err(json_rejection)?;
    let response = AuthService::new(state.service_context()).refresh(request).await?;
    Ok(Json(response))
}

/// GET /auth/me
pub async fn me(State(state): State<AppState>, AuthUser(user): AuthUser) -> Json<CurrentUserResponse> {
    Json(AuthService::new(state.service_context()).me(&user))
}
