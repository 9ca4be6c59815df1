/**
 * Message History Handler
 *
 * `GET /channels/{channel_id}/messages/` returns the stored history of a
 * channel, oldest first. An unknown channel simply has no history.
 */

use axum::{
    extract::{Path, State},
    response::Json,
};
use sqlx::SqlitePool;

use crate::backend::chat::db::list_messages;
use crate::backend::error::BackendError;
use crate::backend::middleware::auth::AuthUser;
use crate::backend::server::state::require_pool;
use crate::shared::{ChannelId, StoredMessage};

/// Get message history handler
pub async fn get_messages(
    State(pool): State<Option<SqlitePool>>,
    AuthUser(user): AuthUser,
    Path(channel_id): Path<ChannelId>,
) -> Result<Json<Vec<StoredMessage>>, BackendError> {
    let pool = require_pool(pool)?;
    let messages = list_messages(&pool, channel_id).await?;
    tracing::debug!(
        "[Chat] {} loaded {} messages from channel {}",
        user.username,
        messages.len(),
        channel_id
    );
    Ok(Json(messages))
}
