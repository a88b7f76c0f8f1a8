//! Registration, login and health endpoints.

mod common;

use axum::http::{Method, StatusCode};
use libris_core::auth::queries;
use serde_json::json;

use common::{register, send, test_app};

#[tokio::test]
async fn register_returns_token_and_public_profile() {
    let (app, state) = test_app().await;

    let (status, body) = send(
        &app,
        Method::POST,
        "/api/auth/register",
        None,
        Some(json!({"username": "alice", "email": "a@x.com", "password": "rightpw"})),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["username"], "alice");
    assert_eq!(body["email"], "a@x.com");
    assert!(body["expiresAt"].is_string());
    assert!(body.get("password").is_none());
    assert!(body.get("passwordHash").is_none());

    let claims = state
        .tokens
        .validate(body["token"].as_str().unwrap())
        .expect("token validates");
    assert_eq!(claims.username, "alice");
    assert_eq!(claims.exp - claims.iat, 3600);
}

#[tokio::test]
async fn duplicate_username_is_rejected() {
    let (app, _) = test_app().await;
    register(&app, "alice", "a@x.com", "pw").await;

    let (status, body) = send(
        &app,
        Method::POST,
        "/api/auth/register",
        None,
        Some(json!({"username": "alice", "email": "different@x.com", "password": "pw"})),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["message"], "Username already exists");
}

#[tokio::test]
async fn duplicate_email_is_rejected() {
    let (app, _) = test_app().await;
    register(&app, "alice", "a@x.com", "pw").await;

    let (status, body) = send(
        &app,
        Method::POST,
        "/api/auth/register",
        None,
        Some(json!({"username": "bob", "email": "a@x.com", "password": "pw"})),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["message"], "Email already exists");
}

#[tokio::test]
async fn register_validates_input() {
    let (app, _) = test_app().await;

    for payload in [
        json!({"email": "a@x.com", "password": "pw"}),
        json!({"username": "alice", "email": "not-an-email", "password": "pw"}),
        json!({"username": "a".repeat(51), "email": "a@x.com", "password": "pw"}),
        json!({"username": "alice", "email": "a@x.com"}),
    ] {
        let (status, body) =
            send(&app, Method::POST, "/api/auth/register", None, Some(payload)).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"], "validation_error");
    }
}

#[tokio::test]
async fn login_token_identifies_registered_user() {
    let (app, state) = test_app().await;
    register(&app, "alice", "a@x.com", "rightpw").await;
    let user = queries::find_user_by_username(&state.pool, "alice")
        .await
        .unwrap()
        .unwrap();

    let (status, body) = send(
        &app,
        Method::POST,
        "/api/auth/login",
        None,
        Some(json!({"username": "alice", "password": "rightpw"})),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["username"], "alice");
    assert_eq!(body["email"], "a@x.com");
    let claims = state
        .tokens
        .validate(body["token"].as_str().unwrap())
        .unwrap();
    assert_eq!(claims.user_id().unwrap(), user.id);
}

#[tokio::test]
async fn login_failures_are_indistinguishable() {
    let (app, _) = test_app().await;
    register(&app, "alice", "a@x.com", "rightpw").await;

    let wrong_pw = send(
        &app,
        Method::POST,
        "/api/auth/login",
        None,
        Some(json!({"username": "alice", "password": "wrongpw"})),
    )
    .await;
    let no_user = send(
        &app,
        Method::POST,
        "/api/auth/login",
        None,
        Some(json!({"username": "nosuchuser", "password": "anything"})),
    )
    .await;

    assert_eq!(wrong_pw.0, StatusCode::UNAUTHORIZED);
    assert_eq!(wrong_pw, no_user);
}

#[tokio::test]
async fn health_reports_database() {
    let (app, _) = test_app().await;
    let (status, body) = send(&app, Method::GET, "/api/health", None, None).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["dbConnected"], true);
    assert_eq!(body["version"], libris_core::version());
}
