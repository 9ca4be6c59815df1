//! chatwire - Multi-channel Chat Backend
//!
//! A small chat server: users register and log in, create channels, read
//! and post channel history over REST, and receive new messages in real
//! time over WebSocket connections bound to one channel each.
//!
//! # Module Structure
//!
//! - **`shared`** - Plain data types exchanged over the API
//!   - Stored messages, channels, request bodies
//!   - Validation errors
//!
//! - **`backend`** - Server-side code (only compiled with `ssr` feature)
//!   - Axum HTTP and WebSocket server
//!   - Channel subscription registry and per-connection sessions
//!   - Authentication, SQLite persistence
//!
//! # Feature Flags
//!
//! - **`ssr`** (default) - Enables the backend modules and the server binary
//!
//! # Usage
//!
//! ```rust,no_run
//! use chatwire::backend::server::{config::ServerConfig, create_app};
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let config = ServerConfig::from_env()?;
//! let addr = config.bind_addr();
//! let (app, _state) = create_app(config).await;
//! let listener = tokio::net::TcpListener::bind(addr).await?;
//! axum::serve(listener, app).await?;
//! # Ok(())
//! # }
//! ```

/// Shared types
pub mod shared;

/// Backend server code (only with `ssr` feature)
#[cfg(feature = "ssr")]
pub mod backend;
