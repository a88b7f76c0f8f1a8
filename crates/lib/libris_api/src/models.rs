//! API wire models (camelCase JSON).

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use libris_core::books::{BookFields, BookRow};

/// Error body returned for every non-2xx response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
    pub message: String,
}

/// `POST /api/auth/register` body.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct RegisterRequest {
    pub username: String,
    pub email: String,
    pub password: String,
}

/// `POST /api/auth/login` body.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct LoginRequest {
    pub username: String,
    pub password: String,
}

/// Successful register/login response. Never carries the password hash.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AuthResponse {
    pub token: String,
    pub username: String,
    pub email: String,
    pub expires_at: DateTime<Utc>,
}

/// `POST /api/books` and `PUT /api/books/{id}` body.
///
/// Any `id` or `userId` the client sends is ignored.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct BookRequest {
    pub title: String,
    pub author: String,
    pub description: String,
}

impl From<BookRequest> for BookFields {
    fn from(req: BookRequest) -> Self {
        BookFields {
            title: req.title,
            author: req.author,
            description: req.description,
        }
    }
}

/// Book as returned to its owner.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BookResponse {
    pub id: i64,
    pub title: String,
    pub author: String,
    pub description: String,
    pub user_id: i64,
}

impl From<BookRow> for BookResponse {
    fn from(row: BookRow) -> Self {
        BookResponse {
            id: row.id,
            title: row.title,
            author: row.author,
            description: row.description,
            user_id: row.user_id,
        }
    }
}

/// `GET /api/health` response.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct HealthResponse {
    pub version: String,
    pub db_connected: bool,
}
