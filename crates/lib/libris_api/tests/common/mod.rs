//! Shared helpers for router-level tests.

#![allow(dead_code)]

use axum::Router;
use axum::body::Body;
use axum::http::{Method, Request, StatusCode, header};
use libris_api::{AppState, config::ApiConfig};
use serde_json::Value;
use tower::ServiceExt;

/// Build a router over a fresh in-memory database.
pub async fn test_app() -> (Router, AppState) {
    let pool = libris_core::db::in_memory()
        .await
        .expect("open in-memory database");
    libris_api::migrate(&pool).await.expect("run migrations");

    let state = AppState::new(
        pool,
        ApiConfig {
            bind_addr: "127.0.0.1:0".into(),
            database_url: "sqlite::memory:".into(),
            jwt_secret: "test-secret".into(),
            jwt_issuer: "libris-api".into(),
            jwt_audience: "libris-client".into(),
        },
    );
    (libris_api::router(state.clone()), state)
}

/// Send a request and return the status plus the JSON body (`Null` if empty or not JSON).
pub async fn send(
    app: &Router,
    method: Method,
    uri: &str,
    token: Option<&str>,
    body: Option<Value>,
) -> (StatusCode, Value) {
    let mut builder = Request::builder().method(method).uri(uri);
    if let Some(token) = token {
        builder = builder.header(header::AUTHORIZATION, format!("Bearer {token}"));
    }
    let req = match body {
        Some(json) => builder
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(json.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    };

    let resp = app.clone().oneshot(req).await.expect("request");
    let status = resp.status();
    let bytes = axum::body::to_bytes(resp.into_body(), usize::MAX)
        .await
        .expect("read body");
    let json = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
    (status, json)
}

/// Register a user and return their bearer token.
pub async fn register(app: &Router, username: &str, email: &str, password: &str) -> String {
    let (status, body) = send(
        app,
        Method::POST,
        "/api/auth/register",
        None,
        Some(serde_json::json!({
            "username": username,
            "email": email,
            "password": password,
        })),
    )
    .await;
    assert_eq!(status, StatusCode::OK, "register failed: {body}");
    body["token"].as_str().expect("token").to_string()
}

/// Create a book as the token's owner and return the response body.
pub async fn create_book(app: &Router, token: &str, title: &str) -> Value {
    let (status, body) = send(
        app,
        Method::POST,
        "/api/books",
        Some(token),
        Some(serde_json::json!({
            "title": title,
            "author": "Ursula K. Le Guin",
            "description": "A wizard's coming of age",
        })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED, "create failed: {body}");
    body
}
