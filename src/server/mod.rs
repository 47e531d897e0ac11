//! HTTP server for workspot
//!
//! Provides REST API endpoints over places, sessions and the map provider.

pub mod extract;
pub mod routes;
pub mod state;

use crate::config::Config;
use crate::db::Database;
use crate::error::{Error, Result};
use routes::create_router;
use state::AppState;
use std::net::SocketAddr;
use std::sync::Arc;
use tokio::net::TcpListener;
use tracing::info;

/// Start the HTTP server
///
/// Connects the database first; the pool lives as long as the server.
/// Never returns unless the server shuts down.
pub async fn run(config: Config) -> Result<()> {
    let addr: SocketAddr = config
        .server_addr()
        .parse()
        .map_err(|e| Error::Server(format!("Invalid server address: {}", e)))?;

    let db = Database::connect(&config.database).await?;
    let state = Arc::new(AppState::new(config, db)?);
    let app = create_router(state);

    info!("Starting server on {}", addr);

    let listener = TcpListener::bind(addr)
        .await
        .map_err(|e| Error::Server(format!("Failed to bind to {}: {}", addr, e)))?;

    axum::serve(listener, app)
        .await
        .map_err(|e| Error::Server(format!("Server error: {}", e)))?;

    Ok(())
}
