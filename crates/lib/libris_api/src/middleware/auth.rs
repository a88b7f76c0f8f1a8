//! Authentication middleware: Bearer token extraction and JWT verification.

use axum::http::header::AUTHORIZATION;
use axum::{
    extract::{Request, State},
    middleware::Next,
    response::Response,
};
use tracing::debug;

use libris_core::models::auth::TokenClaims;

use crate::AppState;
use crate::error::AppError;

/// Identity of the caller, stored in request extensions by [`require_auth`].
#[derive(Debug, Clone)]
pub struct AuthenticatedUser {
    /// Numeric user ID taken from the `sub` claim.
    pub id: i64,
    pub claims: TokenClaims,
}

/// Axum middleware: extracts `Authorization: Bearer <token>`, verifies the JWT,
/// and injects `AuthenticatedUser` into request extensions.
pub async fn require_auth(
    State(state): State<AppState>,
    mut request: Request,
    next: Next,
) -> Result<Response, AppError> {
    let header = request
        .headers()
        .get(AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
        .ok_or_else(|| AppError::Unauthorized("Missing authorization header".into()))?;

    let token = header
        .strip_prefix("Bearer ")
        .ok_or_else(|| AppError::Unauthorized("Invalid authorization scheme".into()))?;

    let claims = state.tokens.validate(token.trim()).inspect_err(|e| {
        debug!(reason = %e, "rejected bearer token");
    })?;
    let id = claims.user_id()?;

    request
        .extensions_mut()
        .insert(AuthenticatedUser { id, claims });

    Ok(next.run(request).await)
}
