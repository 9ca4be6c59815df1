/**
 * API Route Handlers
 *
 * REST endpoints for accounts, channels and stored history.
 *
 * # Routes
 *
 * ## Public
 * - `POST /users/` - User registration
 * - `POST /token` - OAuth2 password flow, returns a bearer token
 *
 * ## Authenticated (`Authorization: Bearer <token>`)
 * - `GET /users/me/` - Current user
 * - `POST /channels/` - Create a channel
 * - `GET /channels/{channel_id}/messages/` - Channel history
 * - `POST /channels/{channel_id}/messages/` - Post a message (also broadcast live)
 */

use axum::{
    middleware,
    routing::{get, post},
    Router,
};

use crate::backend::auth::{get_me, login, signup};
use crate::backend::channels::create_channel;
use crate::backend::chat::{get_messages, send_message};
use crate::backend::middleware::auth::require_auth;
use crate::backend::server::state::AppState;

/// Configure API routes
///
/// # Arguments
///
/// * `router` - The router to add routes to
/// * `app_state` - State handed to the auth middleware
///
/// # Returns
///
/// Router with API routes configured
pub fn configure_api_routes(router: Router<AppState>, app_state: AppState) -> Router<AppState> {
    let protected = Router::new()
        .route("/users/me/", get(get_me))
        .route("/channels/", post(create_channel))
        .route(
            "/channels/{channel_id}/messages/",
            get(get_messages).post(send_message),
        )
        .route_layer(middleware::from_fn_with_state(app_state, require_auth));

    router
        .route("/users/", post(signup))
        .route("/token", post(login))
        .merge(protected)
}
