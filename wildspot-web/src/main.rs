//! # Wildspot Web Server
//!
//! Server-rendered campground listing and review site.
//!
//! ## Startup
//!
//! 1. Initialize tracing
//! 2. Load configuration from the environment
//! 3. Create the database (dev convenience), pool, and run migrations
//! 4. Sweep expired sessions
//! 5. Serve the router until ctrl-c
//!
//! ## Usage
//!
//! ```bash
//! cargo run -p wildspot-web
//! ```

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use wildspot_shared::db::migrations::{ensure_database_exists, run_migrations};
use wildspot_shared::db::pool::{close_pool, create_pool, DatabaseConfig};
use wildspot_shared::models::session::Session;
use wildspot_web::app::{build_router, AppState};
use wildspot_web::config::Config;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "wildspot_web=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!("Wildspot v{} starting...", env!("CARGO_PKG_VERSION"));

    let config = Config::from_env()?;

    ensure_database_exists(&config.database.url).await?;

    let pool = create_pool(DatabaseConfig {
        url: config.database.url.clone(),
        max_connections: config.database.max_connections,
        ..Default::default()
    })
    .await?;

    run_migrations(&pool).await?;

    let swept = Session::delete_expired(&pool).await?;
    if swept > 0 {
        tracing::info!(swept, "Removed expired sessions");
    }

    let bind_address = config.bind_address();
    let state = AppState::new(pool.clone(), config);
    let app = build_router(state);

    let listener = tokio::net::TcpListener::bind(&bind_address).await?;
    tracing::info!("Listening on http://{}", bind_address);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    close_pool(pool).await;
    tracing::info!("Shutdown complete");

    Ok(())
}

async fn shutdown_signal() {
    tokio::signal::ctrl_c()
        .await
        .expect("failed to install ctrl-c handler");
    tracing::info!("Shutdown signal received");
}
