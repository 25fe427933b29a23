//! Route definitions
//!
//! Provisioning keeps its root paths; everything else lives under /api/v1.

use axum::{
    routing::{get, post},
    Router,
};

use crate::handlers::{
    associations, audit, auth, controls, duplicates, health, rejections, stats, users,
};
use crate::state::AppState;

/// Every route except the health probes
pub fn create_router() -> Router<AppState> {
    Router::new()
        .route("/create-users", post(users::create_users))
        .route("/delete-users", post(users::delete_users))
        .nest("/api/v1", api_v1_routes())
}

/// Health check routes, kept out of rate limiting
pub fn health_routes() -> Router<AppState> {
    Router::new()
        .route("/health", get(health::health_check))
        .route("/health/ready", get(health::readiness_check))
}

fn api_v1_routes() -> Router<AppState> {
    Router::new()
        .merge(auth_routes())
        .merge(admin_routes())
        .merge(control_routes())
        .merge(report_routes())
}

fn auth_routes() -> Router<AppState> {
    Router::new()
        .route("/auth/login", post(auth::login))
        .route("/auth/refresh", post(auth::refresh_token))
        .route("/auth/me", get(auth::me))
}

fn admin_routes() -> Router<AppState> {
    Router::new()
        .route("/associations", get(associations::list_associations))
        .route("/users/resolve-logins", post(users::resolve_logins))
        .route(
            "/rejection-reasons",
            get(rejections::list_reasons)
                .post(rejections::add_reason)
                .delete(rejections::remove_reason),
        )
        .route("/audit-logs", get(audit::list_audit_logs))
}

fn control_routes() -> Router<AppState> {
    Router::new()
        .route(
            "/controls",
            get(controls::list_controls).post(controls::submit_control),
        )
        .route("/controls/export", get(controls::export_controls))
        .route("/controls/map", get(controls::control_map))
        .route("/controls/delete", post(controls::delete_controls))
        .route("/duplicates", get(duplicates::list_duplicates))
        .route("/duplicates/delete", post(duplicates::delete_duplicates))
}

fn report_routes() -> Router<AppState> {
    Router::new()
        .route("/stats/rangers", get(stats::ranger_stats))
        .route("/stats/rangers/export", get(stats::export_ranger_stats))
        .route("/stats/periods", get(stats::period_stats))
}
