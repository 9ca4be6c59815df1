//! Shared Module
//!
//! Types exchanged over the HTTP API: stored messages, channels and the
//! validation errors raised while checking request bodies. Everything here
//! is plain data that serializes to JSON.

/// Message data structures
pub mod message;

/// Channel data structures
pub mod channel;

/// Shared error types
pub mod error;

/// Re-export commonly used types for convenience
pub use channel::{Channel, ChannelCreate};
pub use error::SharedError;
pub use message::{ChannelId, MessageCreate, MessageId, StoredMessage, UserId};
