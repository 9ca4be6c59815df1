//! Middleware Module
//!
//! HTTP middleware for the backend server.
//!
//! - **`auth`** - Bearer-token authentication for protected routes
//!
//! # Example
//!
//! ```rust,no_run
//! use axum::{middleware, routing::get, Router};
//! use chatwire::backend::middleware::require_auth;
//! use chatwire::backend::server::AppState;
//!
//! fn protected(state: AppState) -> Router<AppState> {
//!     Router::new()
//!         .route("/users/me/", get(chatwire::backend::auth::get_me))
//!         .route_layer(middleware::from_fn_with_state(state, require_auth))
//! }
//! ```

pub mod auth;

pub use auth::{require_auth, AuthUser, AuthenticatedUser};
