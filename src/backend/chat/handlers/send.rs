/**
 * Send Message Handler
 *
 * `POST /channels/{channel_id}/messages/` persists a message and then
 * pushes its content to every live WebSocket subscriber of the channel.
 *
 * # Ordering
 *
 * The broadcast happens after the insert has committed, so a subscriber
 * that fetches history on receipt always finds the message. Delivery is
 * best-effort; the response does not wait on slow subscribers beyond the
 * registry's per-subscriber timeout and never fails because of them.
 */

use axum::{
    extract::{Path, State},
    response::Json,
};

use crate::backend::channels::db::get_channel_by_id;
use crate::backend::chat::db::create_message;
use crate::backend::error::BackendError;
use crate::backend::middleware::auth::AuthUser;
use crate::backend::server::state::{require_pool, AppState};
use crate::shared::{ChannelId, MessageCreate, StoredMessage};

/// Send message handler
///
/// # Errors
///
/// * `400 Bad Request` - Empty or oversized content
/// * `404 Not Found` - No such channel
/// * `503 Service Unavailable` - If database is not configured
pub async fn send_message(
    State(state): State<AppState>,
    AuthUser(user): AuthUser,
    Path(channel_id): Path<ChannelId>,
    Json(request): Json<MessageCreate>,
) -> Result<Json<StoredMessage>, BackendError> {
    let pool = require_pool(state.db_pool.clone())?;
    request.validate()?;

    if get_channel_by_id(&pool, channel_id).await?.is_none() {
        tracing::warn!("[Chat] {} posted to unknown channel {}", user.username, channel_id);
        return Err(BackendError::not_found("Channel not found"));
    }

    let message = create_message(&pool, channel_id, user.user_id, &request.content).await?;
    tracing::info!(
        "[Chat] Stored message {} from {} in channel {}",
        message.id,
        user.username,
        channel_id
    );

    let report = state.registry.broadcast(channel_id, message.content.as_str()).await;
    if report.failed > 0 {
        tracing::warn!(
            "[Chat] Message {} reached {} of {} live subscribers",
            message.id,
            report.delivered,
            report.attempted()
        );
    }

    Ok(Json(message))
}
