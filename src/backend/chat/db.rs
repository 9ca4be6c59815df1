/**
 * Database Operations for Chat Messages
 *
 * This module is the message half of the persistence gateway: an atomic
 * append that returns the stored row, and the ordered history of a channel.
 */

use chrono::Utc;
use sqlx::SqlitePool;

use crate::shared::{ChannelId, StoredMessage, UserId};

/// Append a message to a channel's history
///
/// The timestamp is assigned here, on the server, in UTC.
///
/// # Arguments
/// * `pool` - Database connection pool
/// * `channel_id` - Channel the message is posted to
/// * `sender_id` - Author
/// * `content` - Message text, stored unchanged
///
/// # Returns
/// The stored message with its assigned id and timestamp
pub async fn create_message(
    pool: &SqlitePool,
    channel_id: ChannelId,
    sender_id: UserId,
    content: &str,
) -> Result<StoredMessage, sqlx::Error> {
    let message = sqlx::query_as::<_, StoredMessage>(
        r#"
        INSERT INTO messages (content, timestamp, sender_id, channel_id)
        VALUES (?, ?, ?, ?)
        RETURNING id, content, timestamp, sender_id, channel_id
        "#,
    )
    .bind(content)
    .bind(Utc::now())
    .bind(sender_id)
    .bind(channel_id)
    .fetch_one(pool)
    .await?;

    Ok(message)
}

/// Load a channel's history, oldest first
///
/// Messages with the same timestamp are ordered by id.
pub async fn list_messages(pool: &SqlitePool, channel_id: ChannelId) -> Result<Vec<StoredMessage>, sqlx::Error> {
    let messages = sqlx::query_as::<_, StoredMessage>(
        r#"
        SELECT id, content, timestamp, sender_id, channel_id
        FROM messages
        WHERE channel_id = ?
        ORDER BY timestamp ASC, id ASC
        "#,
    )
    .bind(channel_id)
    .fetch_all(pool)
    .await?;

    Ok(messages)
}
