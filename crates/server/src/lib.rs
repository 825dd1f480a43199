//! Bloglist Server Library
//!
//! REST API for users and blog posts, backed by SQLite, with list
//! statistics from `bloglist-core`.

pub mod auth;
pub mod config;
pub mod ctx;
pub mod db;
pub mod error;
pub mod handlers;
pub mod models;
pub mod router;
pub mod store;

use std::net::SocketAddr;

use tracing::info;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

pub use config::{AppState, ServerConfig};
pub use error::{Error, Result};
pub use router::router;

fn init_tracing() {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "bloglist_server=info,tower_http=info".into());

    // Already set (e.g. by an embedding binary) is fine
    let _ = tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer())
        .try_init();
}

pub async fn run() -> anyhow::Result<()> {
    init_tracing();

    let config = ServerConfig::from_env()?;
    info!("=== Bloglist Server ===");
    info!("Config: {:?}", config);

    let state = AppState::new(config.clone()).await?;
    let app = router(state);

    let addr = SocketAddr::from(([0, 0, 0, 0], config.port));
    let listener = tokio::net::TcpListener::bind(addr).await?;
    info!("Listening on http://{}", addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("Server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if tokio::signal::ctrl_c().await.is_err() {
        // No signal handler available; run until killed
        std::future::pending::<()>().await;
    }
}
