/**
 * WebSocket Connection Handler
 *
 * Entry point for `GET /ws/{channel_id}`. The handshake is validated
 * before the upgrade is accepted; once upgraded, the socket is split and
 * handed to a `Session` that runs on the connection's own task.
 *
 * # Handshake Failures
 *
 * - Not a WebSocket upgrade, or a non-numeric channel id: rejected by the
 *   extractors before this handler runs.
 * - Unknown channel (when a database is configured): 404.
 *
 * Inbound messages are capped at `MAX_CONTENT_LEN`, the same limit the
 * REST send endpoint applies.
 *
 * In both cases the registry is never touched.
 */

use axum::{
    extract::{ws::WebSocket, Path, State, WebSocketUpgrade},
    response::Response,
};
use futures_util::StreamExt;

use crate::backend::channels::db::get_channel_by_id;
use crate::backend::error::{BackendError, RealtimeError};
use crate::backend::realtime::session::{Session, SessionConfig};
use crate::backend::server::state::AppState;
use crate::shared::message::MAX_CONTENT_LEN;
use crate::shared::ChannelId;

/// Accept a real-time connection bound to `channel_id`
///
/// # Errors
///
/// Returns `BackendError::Realtime(HandshakeFailure)` (404) if a database
/// is configured and has no such channel, or `BackendError::Database` if
/// the lookup itself fails.
pub async fn handle_channel_socket(
    State(state): State<AppState>,
    Path(channel_id): Path<ChannelId>,
    ws: WebSocketUpgrade,
) -> Result<Response, BackendError> {
    if let Some(pool) = state.db_pool.as_ref() {
        if get_channel_by_id(pool, channel_id).await?.is_none() {
            tracing::info!("[Realtime] Rejected connection to unknown channel {}", channel_id);
            return Err(RealtimeError::HandshakeFailure {
                channel_id,
                reason: "Channel not found".to_string(),
            }
            .into());
        }
    }

    let config = state.config.session_config();
    Ok(ws
        .max_message_size(MAX_CONTENT_LEN)
        .on_upgrade(move |socket| serve_socket(socket, channel_id, state, config)))
}

async fn serve_socket(socket: WebSocket, channel_id: ChannelId, state: AppState, config: SessionConfig) {
    let session = Session::new(channel_id, state.registry.clone());
    let session_id = session.id();
    tracing::debug!("[Realtime] Upgraded connection {} for channel {}", session_id, channel_id);

    let (sink, stream) = socket.split();
    if let Err(err) = session.run(sink, stream, state.shutdown.clone(), config).await {
        tracing::error!("[Realtime] Session {} could not start: {}", session_id, err);
    }
}
