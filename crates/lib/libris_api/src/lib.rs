//! # libris_api
//!
//! HTTP API library for Libris.

pub mod config;
pub mod error;
pub mod handlers;
pub mod middleware;
pub mod models;
pub mod routes;
pub mod services;

use axum::Router;
use axum::routing::{get, post};
use libris_core::auth::jwt::TokenIssuer;
use sqlx::SqlitePool;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use crate::config::ApiConfig;
use crate::handlers::{auth, books, health};

/// Shared application state passed to all handlers.
#[derive(Clone, Debug)]
pub struct AppState {
    /// SQLite connection pool.
    pub pool: SqlitePool,
    /// API configuration.
    pub config: ApiConfig,
    /// Token signer/validator built from `config` at startup.
    pub tokens: TokenIssuer,
}

impl AppState {
    pub fn new(pool: SqlitePool, config: ApiConfig) -> Self {
        let tokens = TokenIssuer::new(
            config.jwt_secret.as_bytes(),
            &config.jwt_issuer,
            &config.jwt_audience,
        );
        Self {
            pool,
            config,
            tokens,
        }
    }
}

/// Run embedded database migrations.
///
/// Delegates to `libris_core::migrate::migrate()` which owns the migration files.
pub async fn migrate(pool: &SqlitePool) -> Result<(), sqlx::migrate::MigrateError> {
    libris_core::migrate::migrate(pool).await
}

/// Builds the Axum router with all routes and shared state.
pub fn router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    // Public routes (no auth required)
    let public = Router::new()
        .route(routes::GET_API_HEALTH, get(health::health_handler))
        .route(routes::POST_AUTH_REGISTER, post(auth::register_handler))
        .route(routes::POST_AUTH_LOGIN, post(auth::login_handler));

    // Protected routes (require auth)
    let protected = Router::new()
        .route(
            routes::BOOKS,
            get(books::list_books_handler).post(books::create_book_handler),
        )
        .route(
            routes::BOOKS_ID,
            get(books::get_book_handler)
                .put(books::update_book_handler)
                .delete(books::delete_book_handler),
        )
        .route_layer(axum::middleware::from_fn_with_state(
            state.clone(),
            middleware::auth::require_auth,
        ));

    Router::new()
        .merge(public)
        .merge(protected)
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(state)
}
