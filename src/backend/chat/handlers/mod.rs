//! Chat Handlers Module
//!
//! - **`history`** - GET /channels/{channel_id}/messages/
//! - **`send`** - POST /channels/{channel_id}/messages/ (persist, then broadcast)

/// Message history handler
pub mod history;

/// Send message handler
pub mod send;

pub use history::get_messages;
pub use send::send_message;
