//! Chat Backend Module
//!
//! Stored channel history over REST.
//!
//! - **`db`** - Message persistence (`create_message`, `list_messages`)
//! - **`handlers`** - History and send endpoints
//!
//! Messages posted here are also pushed to live WebSocket subscribers of
//! the channel through the `realtime` registry. Messages sent over a
//! WebSocket are not stored.

/// Database operations for chat messages
pub mod db;

/// HTTP handlers
pub mod handlers;

pub use handlers::{get_messages, send_message};
