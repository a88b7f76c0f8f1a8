//! Authentication request handlers.

use axum::Json;
use axum::extract::State;
use axum::extract::rejection::JsonRejection;

use crate::AppState;
use crate::error::AppResult;
use crate::models::{AuthResponse, LoginRequest, RegisterRequest};
use crate::services::auth;

/// `POST /api/auth/register`: create an account and return a token.
pub async fn register_handler(
    State(state): State<AppState>,
    body: Result<Json<RegisterRequest>, JsonRejection>,
) -> AppResult<Json<AuthResponse>> {
    let Json(body) = body?;
    let resp = auth::register(
        &state.pool,
        &state.tokens,
        &body.username,
        &body.email,
        &body.password,
    )
    .await?;
    Ok(Json(resp))
}

/// `POST /api/auth/login`: authenticate with username + password.
pub async fn login_handler(
    State(state): State<AppState>,
    body: Result<Json<LoginRequest>, JsonRejection>,
) -> AppResult<Json<AuthResponse>> {
    let Json(body) = body?;
    let resp = auth::login(&state.pool, &state.tokens, &body.username, &body.password).await?;
    Ok(Json(resp))
}
