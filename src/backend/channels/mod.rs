//! Channels Module
//!
//! Channel storage and the channel creation endpoint.
//!
//! ```text
//! channels/
//! ├── mod.rs      - Module exports
//! ├── db.rs       - Channel queries
//! └── handlers.rs - POST /channels/
//! ```

/// Channel queries
pub mod db;

/// Channel HTTP handlers
pub mod handlers;

pub use handlers::create_channel;
