/**
 * Channel Handlers
 *
 * `POST /channels/` creates a channel. Any authenticated user may create
 * one; names are unique.
 */

use axum::{extract::State, http::StatusCode, response::Json};
use sqlx::SqlitePool;

use crate::backend::auth::users::is_unique_violation;
use crate::backend::channels::db::{create_channel as insert_channel, get_channel_by_name};
use crate::backend::error::BackendError;
use crate::backend::middleware::auth::AuthUser;
use crate::backend::server::state::require_pool;
use crate::shared::{Channel, ChannelCreate};

/// Create channel handler
///
/// # Errors
///
/// * `400 Bad Request` - Invalid name, or a channel with this name exists
/// * `503 Service Unavailable` - If database is not configured
pub async fn create_channel(
    State(pool): State<Option<SqlitePool>>,
    AuthUser(user): AuthUser,
    Json(request): Json<ChannelCreate>,
) -> Result<Json<Channel>, BackendError> {
    let pool = require_pool(pool)?;
    request.validate()?;

    if get_channel_by_name(&pool, &request.name).await?.is_some() {
        tracing::warn!("[Channels] Channel already exists: {}", request.name);
        return Err(channel_exists());
    }

    let channel = match insert_channel(&pool, &request.name).await {
        Ok(channel) => channel,
        Err(e) if is_unique_violation(&e) => return Err(channel_exists()),
        Err(e) => return Err(e.into()),
    };

    tracing::info!(
        "[Channels] {} created channel {} ({})",
        user.username,
        channel.name,
        channel.id
    );
    Ok(Json(channel))
}

fn channel_exists() -> BackendError {
    BackendError::handler(StatusCode::BAD_REQUEST, "Channel already exists")
}
