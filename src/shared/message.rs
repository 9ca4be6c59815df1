/**
 * Message Data Structures
 *
 * This module defines the persisted chat message and the request body used
 * to post one. Stored messages carry the full metadata (id, sender,
 * timestamp); the real-time push path only ever carries the raw `content`.
 */
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::shared::error::SharedError;

/// Identifier of a channel, assigned by the database
pub type ChannelId = i64;

/// Identifier of a user, assigned by the database
pub type UserId = i64;

/// Identifier of a stored message, assigned by the database
pub type MessageId = i64;

/// Longest message body accepted through the REST API, in bytes
pub const MAX_CONTENT_LEN: usize = 4096;

/// A message as stored in the channel history
///
/// # Fields
/// * `id` - Row id assigned on insert
/// * `content` - Message text, exactly as posted
/// * `timestamp` - Server-assigned UTC timestamp
/// * `sender_id` - Author of the message
/// * `channel_id` - Channel the message was posted to
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[cfg_attr(feature = "ssr", derive(sqlx::FromRow))]
pub struct StoredMessage {
    pub id: MessageId,
    pub content: String,
    pub timestamp: DateTime<Utc>,
    pub sender_id: UserId,
    pub channel_id: ChannelId,
}

/// Body of `POST /channels/{channel_id}/messages/`
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct MessageCreate {
    pub content: String,
}

impl MessageCreate {
    /// Check the message body before it is persisted
    ///
    /// Empty (or whitespace-only) messages and bodies longer than
    /// [`MAX_CONTENT_LEN`] bytes are rejected. The content itself is never
    /// trimmed or rewritten.
    pub fn validate(&self) -> Result<(), SharedError> {
        if self.content.trim().is_empty() {
            return Err(SharedError::validation("content", "Message content cannot be empty"));
        }
        if self.content.len() > MAX_CONTENT_LEN {
            return Err(SharedError::validation(
                "content",
                format!("Message content cannot exceed {} bytes", MAX_CONTENT_LEN),
            ));
        }
        Ok(())
    }
}
