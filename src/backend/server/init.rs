/**
 * Server Initialization
 *
 * This module handles the initialization and setup of the Axum HTTP server,
 * including state creation, database loading, and route configuration.
 *
 * # Initialization Process
 *
 * 1. Open the database (optional, see `config::load_database`)
 * 2. Create the channel registry, token issuer and shutdown token
 * 3. Create and configure the router
 */

use axum::Router;

use crate::backend::routes::router::create_router;
use crate::backend::server::config::{load_database, ServerConfig};
use crate::backend::server::state::AppState;

/// Build application state for `config`
///
/// A database that fails to open leaves `db_pool` as `None`; the server
/// still starts and real-time fan-out keeps working.
pub async fn build_state(config: ServerConfig) -> AppState {
    tracing::info!("[Server] Initializing chatwire backend");

    let db_pool = load_database(&config).await;
    let state = AppState::new(config, db_pool);

    tracing::info!(
        "[Server] Channel registry ready (delivery timeout {:?}, outbound buffer {})",
        state.registry.delivery_timeout(),
        state.config.outbound_buffer
    );
    state
}

/// Create and configure the Axum application
///
/// # Returns
///
/// The router with state applied, and the state itself so the caller can
/// trigger shutdown through `state.shutdown`.
pub async fn create_app(config: ServerConfig) -> (Router<()>, AppState) {
    let state = build_state(config).await;
    let app = create_router(state.clone());
    tracing::info!("[Server] Router configured");
    (app, state)
}
