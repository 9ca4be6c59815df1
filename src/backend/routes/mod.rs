//! Route Configuration Module
//!
//! This module configures all HTTP routes for the backend server.
//!
//! # Module Structure
//!
//! ```text
//! routes/
//! ├── mod.rs          - Module exports and documentation
//! ├── router.rs       - Main router creation
//! ├── chat_routes.rs  - WebSocket endpoint
//! └── api_routes.rs   - REST endpoints
//! ```
//!
//! # Routes
//!
//! - `GET /ws/{channel_id}` - Real-time channel connection
//! - `POST /users/`, `POST /token`, `GET /users/me/` - Accounts
//! - `POST /channels/` - Channel creation
//! - `GET|POST /channels/{channel_id}/messages/` - History

/// Main router creation
pub mod router;

/// Real-time routes
pub mod chat_routes;

/// REST API routes
pub mod api_routes;

pub use router::create_router;
