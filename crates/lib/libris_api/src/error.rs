//! Application error types.

use axum::extract::rejection::JsonRejection;
use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use thiserror::Error;
use tracing::error;

use libris_core::auth::AuthError;
use libris_core::books::BookError;

use crate::models::ErrorResponse;

/// Convenience alias for handler return types.
pub type AppResult<T> = Result<T, AppError>;

/// Application-level errors with HTTP status mapping.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Duplicate: {0}")]
    Duplicate(String),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Unauthorized: {0}")]
    Unauthorized(String),

    #[error("Internal server error")]
    Internal(String),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, error, message) = match &self {
            AppError::Validation(m) => (StatusCode::BAD_REQUEST, "validation_error", m.as_str()),
            AppError::Duplicate(m) => (StatusCode::BAD_REQUEST, "duplicate", m.as_str()),
            AppError::NotFound(m) => (StatusCode::NOT_FOUND, "not_found", m.as_str()),
            AppError::Unauthorized(m) => (StatusCode::UNAUTHORIZED, "unauthorized", m.as_str()),
            AppError::Internal(detail) => {
                error!(detail = %detail, "internal error");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "internal_error",
                    "Internal server error",
                )
            }
        };
        let body = Json(ErrorResponse {
            error: error.to_string(),
            message: message.to_string(),
        });
        (status, body).into_response()
    }
}

impl From<sqlx::Error> for AppError {
    fn from(e: sqlx::Error) -> Self {
        match e {
            sqlx::Error::RowNotFound => AppError::NotFound("row not found".into()),
            _ => AppError::Internal(e.to_string()),
        }
    }
}

impl From<AuthError> for AppError {
    fn from(e: AuthError) -> Self {
        match e {
            AuthError::DuplicateUsername | AuthError::DuplicateEmail => {
                AppError::Duplicate(e.to_string())
            }
            AuthError::InvalidCredentials => {
                AppError::Unauthorized("Invalid username or password".into())
            }
            // Expired and forged tokens look the same to the client.
            AuthError::TokenInvalid | AuthError::TokenExpired => {
                AppError::Unauthorized("Invalid or expired token".into())
            }
            AuthError::Validation(msg) => AppError::Validation(msg),
            AuthError::DbError(e) => AppError::from(e),
            AuthError::Internal(msg) => AppError::Internal(msg),
        }
    }
}

impl From<BookError> for AppError {
    fn from(e: BookError) -> Self {
        match e {
            BookError::Validation(msg) => AppError::Validation(msg),
            BookError::NotFound => AppError::NotFound("Book not found".into()),
            BookError::ConcurrencyConflict => AppError::Internal(e.to_string()),
            BookError::DbError(e) => AppError::from(e),
        }
    }
}

impl From<JsonRejection> for AppError {
    fn from(rejection: JsonRejection) -> Self {
        AppError::Validation(rejection.body_text())
    }
}
