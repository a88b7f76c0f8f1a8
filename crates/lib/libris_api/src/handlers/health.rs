//! Liveness endpoint.

use axum::Json;
use axum::extract::State;

use crate::AppState;
use crate::models::HealthResponse;

/// `GET /api/health`: reports the crate version and database reachability.
pub async fn health_handler(State(state): State<AppState>) -> Json<HealthResponse> {
    let db_connected = sqlx::query("SELECT 1").execute(&state.pool).await.is_ok();

    Json(HealthResponse {
        version: libris_core::version().to_string(),
        db_connected,
    })
}
