//! API Integration Tests
//!
//! These tests require:
//! - Running PostgreSQL instance
//! - Environment variables: DATABASE_URL, JWT_SECRET, API_PORT
//!
//! Run with: cargo test -p integration-tests --test api_tests

use integration_tests::{
    admin_token, assert_json, assert_status, check_test_env, control_body, create_ranger,
    create_users_body, delete_accounts, delete_controls_body, fixtures::*, TestServer,
    CONFIRMATION_PASSWORD,
};
use reqwest::{header, StatusCode};
use serde_json::{json, Value};

// ============================================================================
// Health Check Tests
// ============================================================================

#[tokio::test]
async fn test_health_check() {
    if !check_test_env().await {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let response = server.get("/health").await.expect("Request failed");
    let body: Value = assert_json(response, StatusCode::OK).await.unwrap();
    assert_eq!(body["status"], "healthy");
}

#[tokio::test]
async fn test_health_ready() {
    if !check_test_env().await {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let response = server.get("/health/ready").await.expect("Request failed");
    let body: Value = assert_json(response, StatusCode::OK).await.unwrap();
    assert_eq!(body["database"], "healthy");
}

// ============================================================================
// Auth Tests
// ============================================================================

#[tokio::test]
async fn test_admin_login_and_me() {
    if !check_test_env().await {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let response = server
        .post("/api/v1/auth/login", &LoginRequest::admin())
        .await
        .unwrap();
    let auth: AuthResponse = assert_json(response, StatusCode::OK).await.unwrap();
    assert_eq!(auth.token_type, "Bearer");
    assert!(!auth.refresh_token.is_empty());
    assert!(auth.user.roles.contains(&"admin".to_string()));

    let response = server
        .get_auth("/api/v1/auth/me", &auth.access_token)
        .await
        .unwrap();
    let me: CurrentUser = assert_json(response, StatusCode::OK).await.unwrap();
    assert_eq!(me.id, auth.user.id);
    assert_eq!(me.email, auth.user.email);
}

#[tokio::test]
async fn test_login_wrong_password() {
    if !check_test_env().await {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let request = LoginRequest {
        password: "definitely-wrong".to_string(),
        ..LoginRequest::admin()
    };
    let response = server.post("/api/v1/auth/login", &request).await.unwrap();
    let body: Value = assert_json(response, StatusCode::UNAUTHORIZED).await.unwrap();
    assert_eq!(body["error"]["code"], "INVALID_CREDENTIALS");
}

#[tokio::test]
async fn test_protected_routes_require_token() {
    if !check_test_env().await {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    for path in ["/api/v1/auth/me", "/api/v1/controls", "/api/v1/associations"] {
        let response = server.get(path).await.unwrap();
        assert_status(response, StatusCode::UNAUTHORIZED).await.unwrap();
    }

    let response = server.post("/create-users", &create_users_body(1)).await.unwrap();
    assert_status(response, StatusCode::UNAUTHORIZED).await.unwrap();
}

// ============================================================================
// Provisioning Tests
// ============================================================================

#[tokio::test]
async fn test_create_and_delete_users() {
    if !check_test_env().await {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let token = admin_token(&server).await.unwrap();

    let response = server
        .post_auth("/create-users", &token, &create_users_body(2))
        .await
        .unwrap();
    let created: CreateUsersResponse = assert_json(response, StatusCode::OK).await.unwrap();
    assert!(created.success);
    assert_eq!(created.users.len(), 2);

    let emails: Vec<String> = created.users.iter().map(|u| u.email.clone()).collect();
    for account in &created.users {
        assert!(account.email.starts_with("MAZSSR_"), "{}", account.email);
        assert!(account.email.ends_with("@ranger.pl"));
        assert!(account.uid.is_some());
        assert!(created.credentials_csv.contains(&account.email));
    }
    assert_ne!(emails[0], emails[1]);

    let deleted = delete_accounts(&server, &token, &emails).await.unwrap();
    assert!(deleted.success);
    assert!(deleted.results.iter().all(|r| r.success));

    // Second deletion reports each address as missing
    let again = delete_accounts(&server, &token, &emails).await.unwrap();
    assert_eq!(again.results.len(), 2);
    assert!(again.results.iter().all(|r| !r.success && r.message == "User does not exist"));
}

#[tokio::test]
async fn test_delete_users_requires_email_array() {
    if !check_test_env().await {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let token = admin_token(&server).await.unwrap();

    for body in [json!({ "emails": "MAZSSR_001@ranger.pl" }), json!({})] {
        let response = server.post_auth("/delete-users", &token, &body).await.unwrap();
        let body: Value = assert_json(response, StatusCode::BAD_REQUEST).await.unwrap();
        assert_eq!(body["success"], false);
        assert!(body["error"].is_string());
    }
}

#[tokio::test]
async fn test_create_users_unknown_association() {
    if !check_test_env().await {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let token = admin_token(&server).await.unwrap();

    let body = json!({ "count": 1, "associationId": "no-such-district" });
    let response = server.post_auth("/create-users", &token, &body).await.unwrap();
    assert_status(response, StatusCode::NOT_FOUND).await.unwrap();
}

#[tokio::test]
async fn test_resolve_logins_preview() {
    if !check_test_env().await {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let token = admin_token(&server).await.unwrap();

    let body = json!({ "association_id": MAZ_ASSOCIATION, "selection": "001-003, 007" });
    let response = server
        .post_auth("/api/v1/users/resolve-logins", &token, &body)
        .await
        .unwrap();
    let preview: Value = assert_json(response, StatusCode::OK).await.unwrap();
    assert_eq!(preview["count"], 4);
    assert_eq!(preview["emails"][3], "MAZSSR_007@ranger.pl");

    let body = json!({ "association_id": MAZ_ASSOCIATION, "selection": "005-001" });
    let response = server
        .post_auth("/api/v1/users/resolve-logins", &token, &body)
        .await
        .unwrap();
    assert_status(response, StatusCode::BAD_REQUEST).await.unwrap();
}

#[tokio::test]
async fn test_rangers_cannot_provision() {
    if !check_test_env().await {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let admin = admin_token(&server).await.unwrap();
    let (email, ranger) = create_ranger(&server, &admin).await.unwrap();

    let response = server
        .post_auth("/create-users", &ranger, &create_users_body(1))
        .await
        .unwrap();
    assert_status(response, StatusCode::FORBIDDEN).await.unwrap();

    delete_accounts(&server, &admin, &[email]).await.unwrap();
}

// ============================================================================
// Inspection Tests
// ============================================================================

#[tokio::test]
async fn test_control_submission_listing_and_deletion() {
    if !check_test_env().await {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let admin = admin_token(&server).await.unwrap();
    let (email, ranger) = create_ranger(&server, &admin).await.unwrap();
    let club = format!("Club-{}", email.trim_end_matches("@ranger.pl"));

    let mut ids = Vec::new();
    for (license, success) in [("L-100", true), ("L-200", false)] {
        let response = server
            .post_auth("/api/v1/controls", &ranger, &control_body(&club, license, success))
            .await
            .unwrap();
        let control: Value = assert_json(response, StatusCode::CREATED).await.unwrap();
        assert_eq!(control["association_id"], MAZ_ASSOCIATION);
        ids.push(control["id"].as_str().unwrap().to_string());
    }

    let response = server
        .get_auth(&format!("/api/v1/controls?preset=all&club={club}"), &admin)
        .await
        .unwrap();
    let list: Value = assert_json(response, StatusCode::OK).await.unwrap();
    assert_eq!(list["items"].as_array().unwrap().len(), 2);
    assert!(list["clubs"].as_array().unwrap().contains(&json!(&club)));

    let response = server
        .get_auth(&format!("/api/v1/controls?preset=all&club={club}&status=rejected"), &admin)
        .await
        .unwrap();
    let rejected: Value = assert_json(response, StatusCode::OK).await.unwrap();
    assert_eq!(rejected["items"].as_array().unwrap().len(), 1);
    assert_eq!(rejected["items"][0]["rejection_reasons"][0], "Brak karty");

    let response = server
        .get_auth(&format!("/api/v1/controls/export?preset=all&club={club}"), &admin)
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(
        response.headers()[header::CONTENT_DISPOSITION],
        "attachment; filename=\"kontrole_all.csv\""
    );
    let csv = response.text().await.unwrap();
    assert!(csv.contains("L-100"));
    assert!(csv.contains("L-200"));

    // Wrong confirmation password deletes nothing
    let body = json!({ "ids": &ids, "password": "nope" });
    let response = server.post_auth("/api/v1/controls/delete", &admin, &body).await.unwrap();
    assert_status(response, StatusCode::FORBIDDEN).await.unwrap();

    let response = server
        .post_auth("/api/v1/controls/delete", &admin, &delete_controls_body(&ids))
        .await
        .unwrap();
    let deleted: Value = assert_json(response, StatusCode::OK).await.unwrap();
    assert_eq!(deleted["deleted"], 2);

    delete_accounts(&server, &admin, &[email]).await.unwrap();
}

#[tokio::test]
async fn test_admins_cannot_submit_controls() {
    if !check_test_env().await {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let admin = admin_token(&server).await.unwrap();
    let response = server
        .post_auth("/api/v1/controls", &admin, &control_body("Club", "L-1", true))
        .await
        .unwrap();
    assert_status(response, StatusCode::FORBIDDEN).await.unwrap();
}

#[tokio::test]
async fn test_invalid_report_query() {
    if !check_test_env().await {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let admin = admin_token(&server).await.unwrap();
    let response = server
        .get_auth("/api/v1/stats/rangers?preset=fortnight", &admin)
        .await
        .unwrap();
    let body: Value = assert_json(response, StatusCode::BAD_REQUEST).await.unwrap();
    assert_eq!(body["error"]["code"], "INVALID_QUERY_PARAMETER");
}

#[tokio::test]
async fn test_ranger_stats_export() {
    if !check_test_env().await {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let admin = admin_token(&server).await.unwrap();
    let response = server
        .get_auth("/api/v1/stats/rangers/export?preset=lastWeek", &admin)
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(
        response.headers()[header::CONTENT_TYPE],
        "text/csv; charset=utf-8"
    );
    assert_eq!(
        response.headers()[header::CONTENT_DISPOSITION],
        "attachment; filename=\"statystyki_straznikow_lastWeek.csv\""
    );
}

// ============================================================================
// Rejection Reason Tests
// ============================================================================

#[tokio::test]
async fn test_rejection_reason_lifecycle() {
    if !check_test_env().await {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let admin = admin_token(&server).await.unwrap();
    let reason = format!("Powód testowy {}", chrono::Utc::now().timestamp_micros());

    let body = json!({
        "reason": &reason,
        "association_id": MAZ_ASSOCIATION,
        "password": CONFIRMATION_PASSWORD,
    });
    let response = server.post_auth("/api/v1/rejection-reasons", &admin, &body).await.unwrap();
    let added: Value = assert_json(response, StatusCode::OK).await.unwrap();
    assert_eq!(added["changed"], true);

    let response = server
        .get_auth(
            &format!("/api/v1/rejection-reasons?association_id={MAZ_ASSOCIATION}"),
            &admin,
        )
        .await
        .unwrap();
    let reasons: Value = assert_json(response, StatusCode::OK).await.unwrap();
    assert!(reasons
        .as_array()
        .unwrap()
        .iter()
        .any(|r| r["reason"] == json!(&reason)));

    let response = server
        .delete_auth("/api/v1/rejection-reasons", &admin, &body)
        .await
        .unwrap();
    let removed: Value = assert_json(response, StatusCode::OK).await.unwrap();
    assert_eq!(removed["changed"], true);
}

// ============================================================================
// Audit Log Tests
// ============================================================================

#[tokio::test]
async fn test_audit_log_records_provisioning() {
    if !check_test_env().await {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let admin = admin_token(&server).await.unwrap();
    let (email, _) = create_ranger(&server, &admin).await.unwrap();
    delete_accounts(&server, &admin, &[email.clone()]).await.unwrap();

    let response = server
        .get_auth("/api/v1/audit-logs?per_page=200", &admin)
        .await
        .unwrap();
    let page: Value = assert_json(response, StatusCode::OK).await.unwrap();
    let actions: Vec<&str> = page["items"]
        .as_array()
        .unwrap()
        .iter()
        .filter(|e| e["user_email"] == json!(&email))
        .filter_map(|e| e["action"].as_str())
        .collect();
    assert!(actions.contains(&"create"), "{actions:?}");
    assert!(actions.contains(&"delete"), "{actions:?}");
}
