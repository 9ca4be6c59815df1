/**
 * Authentication Middleware
 *
 * This module provides middleware for protecting routes that require
 * user authentication. It extracts and verifies JWT tokens from the
 * Authorization header, loads the user, and hands it to handlers through
 * request extensions.
 */

use axum::{
    extract::{FromRequestParts, Request, State},
    http::{header::AUTHORIZATION, request::Parts, StatusCode},
    middleware::Next,
    response::Response,
};

use crate::backend::auth::users::get_user_by_id;
use crate::backend::error::BackendError;
use crate::backend::server::state::{require_pool, AppState};
use crate::shared::UserId;

/// Authenticated user data attached by `require_auth`
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AuthenticatedUser {
    pub user_id: UserId,
    pub username: String,
    pub is_moderator: bool,
}

/// Authentication middleware
///
/// This middleware:
/// 1. Extracts the bearer token from the Authorization header
/// 2. Verifies the token
/// 3. Loads the user named in `sub`
/// 4. Attaches user data to request extensions for use in handlers
///
/// # Errors
///
/// * `401 Unauthorized` - Missing, malformed or invalid token, or the user
///   no longer exists
/// * `400 Bad Request` - The user is inactive
/// * `503 Service Unavailable` - No database configured
pub async fn require_auth(
    State(app_state): State<AppState>,
    mut request: Request,
    next: Next,
) -> Result<Response, BackendError> {
    let token = bearer_token(&request).ok_or_else(|| {
        tracing::warn!("[Auth] Missing or malformed Authorization header");
        not_authenticated()
    })?;

    let claims = app_state.tokens.verify_token(token).map_err(|e| {
        tracing::warn!("[Auth] Invalid token: {:?}", e);
        BackendError::from(e)
    })?;

    let user_id = claims.user_id().ok_or_else(|| {
        tracing::warn!("[Auth] Token subject is not a user id: {}", claims.sub);
        not_authenticated()
    })?;

    let pool = require_pool(app_state.db_pool.clone())?;
    let user = get_user_by_id(&pool, user_id).await?.ok_or_else(|| {
        tracing::warn!("[Auth] Token for unknown user {}", user_id);
        not_authenticated()
    })?;

    if !user.is_active {
        tracing::warn!("[Auth] Inactive user {} rejected", user.username);
        return Err(BackendError::handler(StatusCode::BAD_REQUEST, "Inactive user"));
    }

    request.extensions_mut().insert(AuthenticatedUser {
        user_id: user.id,
        username: user.username,
        is_moderator: user.is_moderator,
    });

    Ok(next.run(request).await)
}

fn bearer_token(request: &Request) -> Option<&str> {
    request
        .headers()
        .get(AUTHORIZATION)
        .and_then(|h| h.to_str().ok())
        .and_then(|value| value.strip_prefix("Bearer "))
        .map(str::trim)
        .filter(|token| !token.is_empty())
}

fn not_authenticated() -> BackendError {
    BackendError::handler(StatusCode::UNAUTHORIZED, "Could not validate credentials")
}

/// Axum extractor for authenticated user
///
/// Use as a handler parameter on routes behind `require_auth`.
#[derive(Clone, Debug)]
pub struct AuthUser(pub AuthenticatedUser);

impl<S> FromRequestParts<S> for AuthUser
where
    S: Send + Sync,
{
    type Rejection = BackendError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let user = parts
            .extensions
            .get::<AuthenticatedUser>()
            .cloned()
            .ok_or_else(|| {
                tracing::warn!("[Auth] AuthenticatedUser not found in request extensions");
                not_authenticated()
            })?;

        Ok(AuthUser(user))
    }
}
