//! API server configuration.

use libris_core::auth::jwt::{DEFAULT_AUDIENCE, DEFAULT_ISSUER, resolve_jwt_secret};

/// Configuration for the API server.
#[derive(Clone, Debug)]
pub struct ApiConfig {
    /// Address to bind the HTTP listener (e.g. "127.0.0.1:5000").
    pub bind_addr: String,
    /// SQLite connection URL.
    pub database_url: String,
    /// JWT signing secret.
    pub jwt_secret: String,
    /// Expected `iss` claim.
    pub jwt_issuer: String,
    /// Expected `aud` claim.
    pub jwt_audience: String,
}

impl ApiConfig {
    /// Reads configuration from environment variables with sensible defaults.
    ///
    /// | Variable           | Default                                     |
    /// |--------------------|---------------------------------------------|
    /// | `BIND_ADDR`        | `127.0.0.1:5000`                            |
    /// | `DATABASE_URL`     | `sqlite://library.db?mode=rwc`              |
    /// | `JWT_SECRET` / `AUTH_SECRET` | generated & persisted to file     |
    /// | `JWT_ISSUER`       | `libris-api`                                |
    /// | `JWT_AUDIENCE`     | `libris-client`                             |
    pub fn from_env() -> Self {
        Self {
            bind_addr: std::env::var("BIND_ADDR").unwrap_or_else(|_| "127.0.0.1:5000".into()),
            database_url: std::env::var("DATABASE_URL")
                .unwrap_or_else(|_| "sqlite://library.db?mode=rwc".into()),
            jwt_secret: resolve_jwt_secret(),
            jwt_issuer: std::env::var("JWT_ISSUER").unwrap_or_else(|_| DEFAULT_ISSUER.into()),
            jwt_audience: std::env::var("JWT_AUDIENCE")
                .unwrap_or_else(|_| DEFAULT_AUDIENCE.into()),
        }
    }
}
