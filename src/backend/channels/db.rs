/**
 * Database Operations for Channels
 *
 * Channels are created once and never renamed or deleted. New channels are
 * always stored as private; nothing reads the flag yet.
 */

use sqlx::SqlitePool;

use crate::shared::{Channel, ChannelId};

/// Create a channel
///
/// # Returns
/// The stored channel, or a unique-constraint error if the name is taken
pub async fn create_channel(pool: &SqlitePool, name: &str) -> Result<Channel, sqlx::Error> {
    let channel = sqlx::query_as::<_, Channel>(
        r#"
        INSERT INTO channels (name, is_private)
        VALUES (?, 1)
        RETURNING id, name, is_private
        "#,
    )
    .bind(name)
    .fetch_one(pool)
    .await?;

    Ok(channel)
}

/// Get channel by name
pub async fn get_channel_by_name(pool: &SqlitePool, name: &str) -> Result<Option<Channel>, sqlx::Error> {
    let channel = sqlx::query_as::<_, Channel>(
        r#"
        SELECT id, name, is_private
        FROM channels
        WHERE name = ?
        "#,
    )
    .bind(name)
    .fetch_optional(pool)
    .await?;

    Ok(channel)
}

/// Get channel by ID
pub async fn get_channel_by_id(pool: &SqlitePool, id: ChannelId) -> Result<Option<Channel>, sqlx::Error> {
    let channel = sqlx::query_as::<_, Channel>(
        r#"
        SELECT id, name, is_private
        FROM channels
        WHERE id = ?
        "#,
    )
    .bind(id)
    .fetch_optional(pool)
    .await?;

    Ok(channel)
}
