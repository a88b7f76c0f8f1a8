//! JWT token issuance and validation.
//!
//! Tokens are HS256-signed, carry the user's identity claims and expire
//! sixty minutes after issuance. Validation is a pure function of the token
//! and the process-wide signing secret; nothing is stored server-side.

use std::fmt;
use std::path::{Path, PathBuf};

use chrono::{DateTime, Duration, Utc};
use jsonwebtoken::errors::ErrorKind;
use jsonwebtoken::{Algorithm, DecodingKey, EncodingKey, Header, Validation, decode, encode};
use rand::distr::Alphanumeric;
use rand::{Rng, rng};
use tracing::info;

use super::AuthError;
use crate::models::auth::{IssuedToken, TokenClaims};

/// Access token lifetime: 60 minutes.
pub const ACCESS_TOKEN_EXPIRY_SECS: i64 = 60 * 60;

/// Default `iss` claim.
pub const DEFAULT_ISSUER: &str = "libris-api";

/// Default `aud` claim.
pub const DEFAULT_AUDIENCE: &str = "libris-client";

/// Signs and verifies access tokens with a fixed secret, issuer and audience.
///
/// Built once at startup and shared read-only between requests.
#[derive(Clone)]
pub struct TokenIssuer {
    encoding: EncodingKey,
    decoding: DecodingKey,
    validation: Validation,
    issuer: String,
    audience: String,
}

impl fmt::Debug for TokenIssuer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TokenIssuer")
            .field("issuer", &self.issuer)
            .field("audience", &self.audience)
            .finish_non_exhaustive()
    }
}

impl TokenIssuer {
    pub fn new(secret: &[u8], issuer: &str, audience: &str) -> Self {
        let mut validation = Validation::new(Algorithm::HS256);
        // Expiry is exact: a token is rejected from the first second past `exp`.
        validation.leeway = 0;
        validation.set_issuer(&[issuer]);
        validation.set_audience(&[audience]);
        validation.set_required_spec_claims(&["exp", "sub", "iss", "aud"]);

        Self {
            encoding: EncodingKey::from_secret(secret),
            decoding: DecodingKey::from_secret(secret),
            validation,
            issuer: issuer.to_string(),
            audience: audience.to_string(),
        }
    }

    /// Issue a token for the given user, valid from now.
    pub fn issue(&self, user_id: i64, username: &str, email: &str) -> Result<IssuedToken, AuthError> {
        self.issue_at(user_id, username, email, Utc::now())
    }

    /// Issue a token as if it were minted at `issued_at`.
    pub fn issue_at(
        &self,
        user_id: i64,
        username: &str,
        email: &str,
        issued_at: DateTime<Utc>,
    ) -> Result<IssuedToken, AuthError> {
        let expires_at = issued_at + Duration::seconds(ACCESS_TOKEN_EXPIRY_SECS);
        let claims = TokenClaims {
            sub: user_id.to_string(),
            username: username.to_string(),
            email: email.to_string(),
            iat: issued_at.timestamp(),
            exp: expires_at.timestamp(),
            iss: self.issuer.clone(),
            aud: self.audience.clone(),
        };
        let token = encode(&Header::new(Algorithm::HS256), &claims, &self.encoding)
            .map_err(|e| AuthError::Internal(format!("jwt encode: {e}")))?;
        Ok(IssuedToken { token, expires_at })
    }

    /// Verify signature, issuer, audience and expiry, returning the claims.
    pub fn validate(&self, token: &str) -> Result<TokenClaims, AuthError> {
        decode::<TokenClaims>(token, &self.decoding, &self.validation)
            .map(|data| data.claims)
            .map_err(|e| match e.kind() {
                ErrorKind::ExpiredSignature => AuthError::TokenExpired,
                _ => AuthError::TokenInvalid,
            })
    }
}

/// Resolve the JWT secret: env var `JWT_SECRET` → `AUTH_SECRET` → persisted file.
pub fn resolve_jwt_secret() -> String {
    if let Ok(secret) = std::env::var("JWT_SECRET")
        && !secret.is_empty()
    {
        return secret;
    }
    if let Ok(secret) = std::env::var("AUTH_SECRET")
        && !secret.is_empty()
    {
        return secret;
    }
    load_or_create_secret(&jwt_secret_path())
}

/// Read the secret stored at `path`, generating and persisting one if absent.
pub fn load_or_create_secret(path: &Path) -> String {
    if let Ok(existing) = std::fs::read_to_string(path) {
        let trimmed = existing.trim();
        if !trimmed.is_empty() {
            return trimmed.to_string();
        }
    }
    let secret: String = rng()
        .sample_iter(&Alphanumeric)
        .take(64)
        .map(char::from)
        .collect();
    if let Some(parent) = path.parent() {
        let _ = std::fs::create_dir_all(parent);
    }
    let _ = std::fs::write(path, &secret);
    info!(path = %path.display(), "generated new JWT secret");
    secret
}

/// Path to the persisted JWT secret file.
fn jwt_secret_path() -> PathBuf {
    dirs::data_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("libris")
        .join("jwt-secret")
}
