//! Credential store queries.

use chrono::Utc;
use sqlx::SqlitePool;

use super::AuthError;
use crate::models::auth::UserRecord;

/// Check whether a username is already registered (exact match).
pub async fn username_exists(pool: &SqlitePool, username: &str) -> Result<bool, AuthError> {
    let exists =
        sqlx::query_scalar::<_, bool>("SELECT EXISTS(SELECT 1 FROM users WHERE username = ?1)")
            .bind(username)
            .fetch_one(pool)
            .await?;
    Ok(exists)
}

/// Check whether an email is already registered (exact match).
pub async fn email_exists(pool: &SqlitePool, email: &str) -> Result<bool, AuthError> {
    let exists =
        sqlx::query_scalar::<_, bool>("SELECT EXISTS(SELECT 1 FROM users WHERE email = ?1)")
            .bind(email)
            .fetch_one(pool)
            .await?;
    Ok(exists)
}

/// Fetch a user by exact username.
pub async fn find_user_by_username(
    pool: &SqlitePool,
    username: &str,
) -> Result<Option<UserRecord>, AuthError> {
    let row = sqlx::query_as::<_, UserRecord>(
        "SELECT id, username, email, password_hash, created_at FROM users WHERE username = ?1",
    )
    .bind(username)
    .fetch_optional(pool)
    .await?;
    Ok(row)
}

/// Fetch a user by ID.
pub async fn get_user_by_id(
    pool: &SqlitePool,
    user_id: i64,
) -> Result<Option<UserRecord>, AuthError> {
    let row = sqlx::query_as::<_, UserRecord>(
        "SELECT id, username, email, password_hash, created_at FROM users WHERE id = ?1",
    )
    .bind(user_id)
    .fetch_optional(pool)
    .await?;
    Ok(row)
}

/// Insert a new user and return the stored record.
///
/// A unique-index violation that slipped past the existence checks is
/// reported as the matching duplicate error.
pub async fn create_user(
    pool: &SqlitePool,
    username: &str,
    email: &str,
    password_hash: &str,
) -> Result<UserRecord, AuthError> {
    sqlx::query_as::<_, UserRecord>(
        "INSERT INTO users (username, email, password_hash, created_at) \
         VALUES (?1, ?2, ?3, ?4) \
         RETURNING id, username, email, password_hash, created_at",
    )
    .bind(username)
    .bind(email)
    .bind(password_hash)
    .bind(Utc::now())
    .fetch_one(pool)
    .await
    .map_err(map_unique_violation)
}

/// Delete a user. Their books are removed by the `ON DELETE CASCADE` foreign key.
pub async fn delete_user(pool: &SqlitePool, user_id: i64) -> Result<bool, AuthError> {
    let result = sqlx::query("DELETE FROM users WHERE id = ?1")
        .bind(user_id)
        .execute(pool)
        .await?;
    Ok(result.rows_affected() > 0)
}

fn map_unique_violation(e: sqlx::Error) -> AuthError {
    if let sqlx::Error::Database(db) = &e
        && db.is_unique_violation()
    {
        // SQLite reports "UNIQUE constraint failed: users.<column>".
        if db.message().contains("users.username") {
            return AuthError::DuplicateUsername;
        }
        if db.message().contains("users.email") {
            return AuthError::DuplicateEmail;
        }
    }
    AuthError::DbError(e)
}
