//! Audit log handler

use axum::{extract::State, Json};
use ssr_core::reports::Page;
use ssr_service::dto::{AuditLogQuery, AuditLogResponse};
use ssr_service::AuditLogService;

use crate::extractors::{AuthUser, QueryParams};
use crate::response::ApiResult;
use crate::state::AppState;

/// GET /audit-logs
pub async fn list_audit_logs(
    State(state): State<AppState>,
    AuthUser(user): AuthUser,
    QueryParams(query): QueryParams<AuditLogQuery>,
) -> ApiResult<Json<Page<AuditLogResponse>>> {
    let page = AuditLogService::new(state.service_context()).list(&user, query).await?;
    Ok(Json(page))
}
