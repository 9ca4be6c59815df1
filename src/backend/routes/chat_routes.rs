/**
 * Real-time Route Handlers
 *
 * - `GET /ws/{channel_id}` - WebSocket connection bound to one channel
 *
 * The socket endpoint is not behind `require_auth`: browsers cannot set an
 * Authorization header on a WebSocket handshake.
 */

use axum::{routing::get, Router};

use crate::backend::realtime::handle_channel_socket;
use crate::backend::server::state::AppState;

/// Configure real-time routes
pub fn configure_chat_routes(router: Router<AppState>) -> Router<AppState> {
    router.route("/ws/{channel_id}", get(handle_channel_socket))
}
