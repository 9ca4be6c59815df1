//! Channel Data Structures
//!
//! A channel is a named topic. It scopes both the stored message history
//! and the set of live WebSocket subscribers.

use serde::{Deserialize, Serialize};

use crate::shared::error::SharedError;
use crate::shared::message::ChannelId;

/// Longest accepted channel name, in characters
pub const MAX_CHANNEL_NAME_LEN: usize = 64;

/// A channel as stored in the database
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[cfg_attr(feature = "ssr", derive(sqlx::FromRow))]
pub struct Channel {
    pub id: ChannelId,
    pub name: String,
    /// Stored for every channel but not enforced anywhere yet
    pub is_private: bool,
}

/// Body of `POST /channels/`
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ChannelCreate {
    pub name: String,
}

impl ChannelCreate {
    pub fn validate(&self) -> Result<(), SharedError> {
        let name = self.name.trim();
        if name.is_empty() {
            return Err(SharedError::validation("name", "Channel name cannot be empty"));
        }
        if name.chars().count() > MAX_CHANNEL_NAME_LEN {
            return Err(SharedError::validation(
                "name",
                format!("Channel name cannot exceed {} characters", MAX_CHANNEL_NAME_LEN),
            ));
        }
        Ok(())
    }
}
