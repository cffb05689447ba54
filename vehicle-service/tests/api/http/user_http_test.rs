//! Application user API HTTP tests

use super::{build_test_router, get_json, TestAppState};
use crate::api::{admin_token, token_for, viewer_token};
use axum::http::StatusCode;
use pretty_assertions::assert_eq;
use serde_json::Value;

#[tokio::test]
async fn test_me_requires_token() {
    let app = build_test_router(TestAppState::new());

    let (status, _): (_, Option<Value>) = get_json(&app, "/api/v1/users/me", None).await;

    assert_eq!(status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_me_provisions_once() {
    let state = TestAppState::new();
    let user_repo = state.user_repo.clone();
    let app = build_test_router(state);
    let token = token_for("kc-42", &[]);

    let (status, first): (_, Option<Value>) =
        get_json(&app, "/api/v1/users/me", Some(&token)).await;
    assert_eq!(status, StatusCode::OK);
    let first = first.unwrap();
    assert_eq!(first["data"]["subject"], "kc-42");
    assert_eq!(first["data"]["email"], "kc-42@example.com");

    let (_, second): (_, Option<Value>) = get_json(&app, "/api/v1/users/me", Some(&token)).await;
    let second = second.unwrap();
    assert_eq!(second["data"]["id"], first["data"]["id"]);
    assert_eq!(user_repo.len().await, 1);
}

#[tokio::test]
async fn test_get_user_requires_fleet_admin() {
    let app = build_test_router(TestAppState::new());

    let (_, me): (_, Option<Value>) =
        get_json(&app, "/api/v1/users/me", Some(&viewer_token())).await;
    let id = me.unwrap()["data"]["id"].as_str().unwrap().to_string();
    let path = format!("/api/v1/users/{}", id);

    let (status, _): (_, Option<Value>) = get_json(&app, &path, Some(&viewer_token())).await;
    assert_eq!(status, StatusCode::FORBIDDEN);

    let (status, body): (_, Option<Value>) = get_json(&app, &path, Some(&admin_token())).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body.unwrap()["data"]["subject"], "viewer");
}

#[tokio::test]
async fn test_expired_token_rejected() {
    use jsonwebtoken::{encode, EncodingKey, Header};

    let app = build_test_router(TestAppState::new());
    let now = chrono::Utc::now().timestamp();
    let token = encode(
        &Header::default(),
        &serde_json::json!({
            "sub": "late",
            "iss": crate::api::TEST_ISSUER,
            "aud": crate::api::TEST_AUDIENCE,
            "iat": now - 7200,
            "exp": now - 3600,
        }),
        &EncodingKey::from_secret(crate::api::TEST_SECRET.as_bytes()),
    )
    .unwrap();

    let (status, body): (_, Option<Value>) =
        get_json(&app, "/api/v1/users/me", Some(&token)).await;

    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body.unwrap()["detail"], "Token has expired");
}

#[tokio::test]
async fn test_health_and_ready_are_public() {
    let app = build_test_router(TestAppState::new());

    let (status, body): (_, Option<Value>) = get_json(&app, "/health", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body.unwrap()["status"], "healthy");

    let (status, _): (_, Option<Value>) = get_json(&app, "/ready", None).await;
    assert_eq!(status, StatusCode::OK);
}
