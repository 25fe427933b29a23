//! Statistics handlers

use axum::{extract::State, Json};
use ssr_core::reports::RangerStats;
use ssr_service::dto::{PeriodStatsResponse, ReportQuery};
use ssr_service::StatsService;

use crate::extractors::{AuthUser, QueryParams};
use crate::response::{ApiResult, CsvFile};
use crate::state::AppState;

/// GET /stats/rangers
pub async fn ranger_stats(
    State(state): State<AppState>,
    AuthUser(user): AuthUser,
    QueryParams(query): QueryParams<ReportQuery>,
) -> ApiResult<Json<Vec<RangerStats>>> {
    let stats = StatsService::new(state.service_context()).rangers(&user, &query).await?;
    Ok(Json(stats))
}

/// GET /stats/rangers/export
pub async fn export_ranger_stats(
    State(state): State<AppState>,
    AuthUser(user): AuthUser,
    QueryParams(query): QueryParams<ReportQuery>,
) -> ApiResult<CsvFile> {
    let export = StatsService::new(state.service_context()).rangers_csv(&user, &query).await?;
    Ok(CsvFile(export))
}

/// GET /stats/periods
pub async fn period_stats(
    State(state): State<AppState>,
    AuthUser(user): AuthUser,
    QueryParams(query): QueryParams<ReportQuery>,
) -> ApiResult<Json<PeriodStatsResponse>> {
    let response = StatsService::new(state.service_context()).periods(&user, &query).await?;
    Ok(Json(response))
}
