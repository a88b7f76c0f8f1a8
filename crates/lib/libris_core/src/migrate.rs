//! Database migration support.
//!
//! Embeds and runs SQL migrations from `libris_core/migrations/`.

use sqlx::SqlitePool;

/// Run all embedded database migrations against the given pool.
pub async fn migrate(pool: &SqlitePool) -> Result<(), sqlx::migrate::MigrateError> {
    sqlx::migrate!("./migrations").run(pool).await
}
