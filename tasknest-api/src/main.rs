//! # Tasknest API Server
//!
//! This is the main API server for Tasknest, a multi-user task manager
//! where each user owns tasks and each task owns an ordered list of notes.
//!
//! ## Architecture
//!
//! The API server is built with Axum and provides:
//! - User registration, login, and self-service account management
//! - Token-authenticated task CRUD scoped to the owning user
//! - Nested note CRUD with ownership inherited from the parent task
//!
//! ## Usage
//!
//! ```bash
//! cargo run -p tasknest-api
//! ```

use tasknest_api::{
    app::{build_router, AppState},
    config::Config,
};
use tasknest_shared::db;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "tasknest_api=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!(
        "Tasknest API Server v{} starting...",
        env!("CARGO_PKG_VERSION")
    );

    // Load configuration
    let config = Config::from_env()?;
    let bind_address = config.bind_address();

    // Initialize database pool and run pending migrations
    let pool = db::pool::create_pool(db::pool::DatabaseConfig {
        url: config.database.url.clone(),
        max_connections: config.database.max_connections,
        ..Default::default()
    })
    .await?;

    db::migrations::run_migrations(&pool).await?;

    // Build Axum application
    let state = AppState::new(pool, config);
    let app = build_router(state);

    // Start server
    let listener = tokio::net::TcpListener::bind(&bind_address).await?;
    tracing::info!("Server listening on http://{}", bind_address);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("Shutdown complete");

    Ok(())
}

/// Waits for a shutdown signal (Ctrl+C)
async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("Failed to listen for shutdown signal: {}", e);
    }
    tracing::info!("Shutdown signal received, draining connections...");
}
