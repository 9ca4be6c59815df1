/**
 * Application State Management
 *
 * This module defines the application state structure and implements
 * the necessary `FromRef` traits for Axum state extraction.
 *
 * # Architecture
 *
 * The `AppState` struct serves as the central state container for the
 * application, holding:
 * - The channel subscription registry shared by every real-time session
 * - The JWT issuer
 * - The optional database pool
 * - The server configuration and the shutdown token
 *
 * # Thread Safety
 *
 * Everything here is cheap to clone: `Arc`s, a pool handle, and a
 * cancellation token. The registry does its own locking.
 *
 * # Example
 *
 * ```rust,no_run
 * use chatwire::backend::server::state::AppState;
 * use axum::extract::State;
 *
 * async fn handler(State(state): State<AppState>) {
 *     let live = state.registry.subscriber_count(1);
 *     // ...
 * }
 * ```
 */

use std::sync::Arc;

use axum::extract::FromRef;
use sqlx::SqlitePool;
use tokio_util::sync::CancellationToken;

use crate::backend::auth::sessions::TokenIssuer;
use crate::backend::error::BackendError;
use crate::backend::realtime::registry::ChannelRegistry;
use crate::backend::server::config::ServerConfig;

/// Application state shared by all handlers
#[derive(Clone)]
pub struct AppState {
    /// Database connection pool
    ///
    /// `None` if the database could not be opened. Handlers that need it
    /// answer 503.
    pub db_pool: Option<SqlitePool>,

    /// Channel subscription registry for real-time fan-out
    pub registry: Arc<ChannelRegistry>,

    /// Issues and verifies access tokens
    pub tokens: TokenIssuer,

    pub config: Arc<ServerConfig>,

    /// Cancelled when the server shuts down; every session watches it
    pub shutdown: CancellationToken,
}

impl AppState {
    /// Build state from a configuration and an optional pool
    pub fn new(config: ServerConfig, db_pool: Option<SqlitePool>) -> Self {
        let registry = Arc::new(ChannelRegistry::new(config.delivery_timeout));
        let tokens = TokenIssuer::new(&config.jwt_secret, config.token_ttl);
        Self {
            db_pool,
            registry,
            tokens,
            config: Arc::new(config),
            shutdown: CancellationToken::new(),
        }
    }
}

/// Implement FromRef for Option<SqlitePool>
///
/// This allows Axum handlers to extract the optional database pool
/// directly from `AppState`.
impl FromRef<AppState> for Option<SqlitePool> {
    fn from_ref(app_state: &AppState) -> Self {
        app_state.db_pool.clone()
    }
}

impl FromRef<AppState> for TokenIssuer {
    fn from_ref(app_state: &AppState) -> Self {
        app_state.tokens.clone()
    }
}

impl FromRef<AppState> for Arc<ServerConfig> {
    fn from_ref(app_state: &AppState) -> Self {
        app_state.config.clone()
    }
}

/// Unwrap the optional pool, or fail with 503
pub fn require_pool(pool: Option<SqlitePool>) -> Result<SqlitePool, BackendError> {
    pool.ok_or_else(|| {
        tracing::error!("[Database] Database not configured");
        BackendError::state("Database not configured")
    })
}
