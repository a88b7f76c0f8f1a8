//! Authentication logic.
//!
//! Password hashing, JWT issuance/validation and the credential store
//! queries used by the registration and login flows.

pub mod jwt;
pub mod password;
pub mod queries;

use thiserror::Error;

/// Authentication errors.
#[derive(Debug, Error)]
pub enum AuthError {
    #[error("Username already exists")]
    DuplicateUsername,

    #[error("Email already exists")]
    DuplicateEmail,

    #[error("Invalid username or password")]
    InvalidCredentials,

    #[error("Invalid token")]
    TokenInvalid,

    #[error("Token expired")]
    TokenExpired,

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Database error: {0}")]
    DbError(#[from] sqlx::Error),

    #[error("Internal error: {0}")]
    Internal(String),
}
