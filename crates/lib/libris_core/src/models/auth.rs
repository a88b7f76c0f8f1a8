//! Authentication domain models.
//!
//! These are internal domain models, distinct from the API wire models
//! (which carry `#[serde(rename_all = "camelCase")]`).

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::auth::AuthError;

/// Stored user, including the password hash. Never serialized to clients.
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct UserRecord {
    pub id: i64,
    pub username: String,
    pub email: String,
    pub password_hash: String,
    pub created_at: DateTime<Utc>,
}

/// JWT claims embedded in access tokens.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenClaims {
    /// Subject: user ID as a decimal string (standard JWT `sub` claim).
    pub sub: String,
    pub username: String,
    pub email: String,
    /// Issued at (unix timestamp).
    pub iat: i64,
    /// Expiry (unix timestamp).
    pub exp: i64,
    /// Issuer.
    pub iss: String,
    /// Audience.
    pub aud: String,
}

impl TokenClaims {
    /// Numeric user ID carried in `sub`.
    pub fn user_id(&self) -> Result<i64, AuthError> {
        self.sub.parse().map_err(|_| AuthError::TokenInvalid)
    }
}

/// A freshly signed token together with its expiry.
#[derive(Debug, Clone)]
pub struct IssuedToken {
    pub token: String,
    pub expires_at: DateTime<Utc>,
}
