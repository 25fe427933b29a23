//! Test fixtures and request builders
//!
//! Wire shapes mirror what the dashboard and the mobile app send.

use anyhow::Result;
use reqwest::StatusCode;
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};

use crate::helpers::{assert_json, TestServer, ADMIN_EMAIL, ADMIN_PASSWORD, CONFIRMATION_PASSWORD};

/// District seeded by the initial migrations, login prefix `MAZSSR_`
pub const MAZ_ASSOCIATION: &str = "GMUe0Hd56WJ7U0HQ3qpa";

/// Login request
#[derive(Debug, Serialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

impl LoginRequest {
    pub fn admin() -> Self {
        Self {
            email: ADMIN_EMAIL.to_string(),
            password: ADMIN_PASSWORD.to_string(),
        }
    }
}

/// Auth response
#[derive(Debug, Deserialize)]
pub struct AuthResponse {
    pub access_token: String,
    pub refresh_token: String,
    pub token_type: String,
    pub user: CurrentUser,
}

#[derive(Debug, Deserialize)]
pub struct CurrentUser {
    pub id: String,
    pub email: String,
    pub login: String,
    pub association_id: Option<String>,
    pub roles: Vec<String>,
}

/// Account as returned by `/create-users`
#[derive(Debug, Deserialize)]
pub struct CreatedAccount {
    pub email: String,
    pub password: Option<String>,
    pub uid: Option<String>,
    pub error: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateUsersResponse {
    pub success: bool,
    pub users: Vec<CreatedAccount>,
    pub credentials_csv: String,
}

#[derive(Debug, Deserialize)]
pub struct DeleteUserResult {
    pub success: bool,
    pub email: String,
    pub message: String,
}

#[derive(Debug, Deserialize)]
pub struct DeleteUsersResponse {
    pub success: bool,
    pub results: Vec<DeleteUserResult>,
}

/// Body for `/create-users` allocating `count` sequential logins
pub fn create_users_body(count: u32) -> Value {
    json!({
        "count": count,
        "associationId": MAZ_ASSOCIATION,
        "appVersion": "2.4.0",
    })
}

/// Body for `POST /api/v1/controls`
pub fn control_body(club: &str, license_number: &str, is_success: bool) -> Value {
    let reasons: Vec<&str> = if is_success { Vec::new() } else { vec!["Brak karty"] };
    json!({
        "control_date": chrono::Utc::now().to_rfc3339(),
        "latitude": 52.2297,
        "longitude": 21.0122,
        "club_name": club,
        "group_code": "T-1",
        "license_number": license_number,
        "is_success": is_success,
        "rejection_reasons": reasons,
    })
}

/// Log in and return the access token
pub async fn login(server: &TestServer, request: &LoginRequest) -> Result<String> {
    let response = server.post("/api/v1/auth/login", request).await?;
    let auth: AuthResponse = assert_json(response, StatusCode::OK).await?;
    Ok(auth.access_token)
}

/// Token of the bootstrap administrator
pub async fn admin_token(server: &TestServer) -> Result<String> {
    login(server, &LoginRequest::admin()).await
}

/// Create one ranger account and return its email and token
pub async fn create_ranger(server: &TestServer, admin_token: &str) -> Result<(String, String)> {
    let response = server
        .post_auth("/create-users", admin_token, &create_users_body(1))
        .await?;
    let created: CreateUsersResponse = assert_json(response, StatusCode::OK).await?;
    let account = created
        .users
        .into_iter()
        .next()
        .ok_or_else(|| anyhow::anyhow!("no account created"))?;
    let password = account
        .password
        .ok_or_else(|| anyhow::anyhow!("account not created: {:?}", account.error))?;

    let token = login(
        server,
        &LoginRequest {
            email: account.email.clone(),
            password,
        },
    )
    .await?;
    Ok((account.email, token))
}

/// Remove accounts created by a test
pub async fn delete_accounts(server: &TestServer, admin_token: &str, emails: &[String]) -> Result<DeleteUsersResponse> {
    let response = server
        .post_auth("/delete-users", admin_token, &json!({ "emails": emails }))
        .await?;
    assert_json(response, StatusCode::OK).await
}

/// Body for deleting inspections by id
pub fn delete_controls_body(ids: &[String]) -> Value {
    json!({ "ids": ids, "password": CONFIRMATION_PASSWORD })
}
