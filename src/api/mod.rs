//! REST API over the engine.
//!
//! Provides three POST endpoints:
//! - `/simulate`: size and price a project
//! - `/scenarios`: four priced alternatives for an installed power
//! - `/cash-flow`: monthly cash-flow series

mod handlers;
mod types;

use std::net::SocketAddr;
use std::sync::Arc;

use axum::Router;
use axum::routing::post;

use crate::engine::Engine;

/// Immutable application state shared across all request handlers.
///
/// The engine holds only read-only configuration, so no locks are needed.
pub struct AppState {
    pub engine: Engine,
}

/// Builds the axum router with all API routes.
///
/// # Arguments
///
/// * `state` - Shared engine state
///
/// # Returns
///
/// Configured `Router` ready to serve.
pub fn router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/simulate", post(handlers::simulate))
        .route("/scenarios", post(handlers::scenarios))
        .route("/cash-flow", post(handlers::cash_flow))
        .with_state(state)
}

/// Binds to the given address and serves the API.
///
/// # Arguments
///
/// * `state` - Shared engine state
/// * `addr` - Socket address to bind to
///
/// # Errors
///
/// Returns an `io::Error` if the listener cannot bind or the server fails.
pub async fn serve(state: Arc<AppState>, addr: SocketAddr) -> std::io::Result<()> {
    let app = router(state);
    let listener = tokio::net::TcpListener::bind(addr).await?;
    log::info!("API server listening on http://{addr}");
    axum::serve(listener, app).await
}
