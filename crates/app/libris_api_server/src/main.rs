//! Libris API server binary.

use clap::Parser;
use libris_api::config::ApiConfig;
use tracing::info;

/// CLI arguments for the API server.
#[derive(Parser, Debug)]
#[command(name = "libris_api_server", about = "Libris personal library API server")]
struct Args {
    /// Address to listen on.
    #[arg(long, env = "BIND_ADDR", default_value = "127.0.0.1:5000")]
    bind_addr: String,

    /// SQLite connection URL.
    #[arg(long, env = "DATABASE_URL", default_value = "sqlite://library.db?mode=rwc")]
    database_url: String,

    /// Maximum number of database connections in the pool.
    #[arg(long, default_value_t = 5)]
    max_connections: u32,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info,libris_api=debug,libris_core=debug".into()),
        )
        .init();

    let args = Args::parse();

    let config = ApiConfig {
        bind_addr: args.bind_addr,
        database_url: args.database_url,
        ..ApiConfig::from_env()
    };

    info!(
        database_url = %config.database_url,
        max_connections = args.max_connections,
        "starting libris_api_server"
    );

    let pool = libris_core::db::connect(&config.database_url, args.max_connections).await?;

    info!("running database migrations");
    libris_api::migrate(&pool).await?;

    let listener = tokio::net::TcpListener::bind(&config.bind_addr).await?;
    let local_addr = listener.local_addr()?;

    let state = libris_api::AppState::new(pool, config);
    let app = libris_api::router(state);

    info!(addr = %local_addr, "REST API listening");
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("server stopped");
    Ok(())
}

async fn shutdown_signal() {
    let _ = tokio::signal::ctrl_c().await;
    info!("shutdown requested");
}
