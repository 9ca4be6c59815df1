//! Backend Module
//!
//! This module contains all server-side code. It is only compiled when the
//! `ssr` feature is enabled.
//!
//! # Architecture
//!
//! - **`server`** - Configuration, application state, initialization
//! - **`routes`** - HTTP route configuration and router assembly
//! - **`realtime`** - Channel subscription registry, WebSocket sessions
//! - **`chat`** - Stored message history
//! - **`channels`** - Channel storage and creation
//! - **`auth`** - Users, password hashing, JWT tokens
//! - **`middleware`** - Bearer-token authentication
//! - **`error`** - Backend-specific error types
//!
//! # Module Structure
//!
//! ```text
//! backend/
//! ├── mod.rs          - Module exports and documentation
//! ├── main.rs         - Server binary
//! ├── server/         - Server initialization and state
//! ├── routes/         - Route configuration
//! ├── realtime/       - WebSocket fan-out
//! ├── chat/           - Message history
//! ├── channels/       - Channels
//! ├── auth/           - Authentication
//! ├── middleware/     - Request middleware
//! └── error/          - Error types
//! ```
//!
//! # Message Flow
//!
//! A message reaches live subscribers two ways: as a text frame on a
//! channel's WebSocket (not stored), or through
//! `POST /channels/{id}/messages/` (stored, then broadcast). Both end in
//! `ChannelRegistry::broadcast`.
//!
//! # Thread Safety
//!
//! - `ChannelRegistry` is shared through an `Arc` and locks per channel
//! - Each WebSocket connection runs on its own task
//! - The SQLite pool is cloned into handlers through `FromRef`

/// Server setup and configuration
pub mod server;

/// Route configuration
pub mod routes;

/// Real-time fan-out
pub mod realtime;

/// Stored message history
pub mod chat;

/// Channel storage and creation
pub mod channels;

/// Backend error types
pub mod error;

/// Authentication and user management
pub mod auth;

/// Middleware for request processing
pub mod middleware;

#[cfg(test)]
pub(crate) mod test_helpers;

pub use error::{BackendError, RealtimeError};
pub use realtime::ChannelRegistry;
pub use server::{create_app, AppState};
