/**
 * Login Handler
 *
 * This module implements the token endpoint, POST /token.
 *
 * # Authentication Process
 *
 * 1. Look up user by username
 * 2. Verify password using bcrypt
 * 3. Generate JWT token
 *
 * # Security
 *
 * - Unknown user and wrong password produce the same 400 response
 * - Passwords are never logged or returned
 */

use axum::{
    extract::{Form, State},
    http::StatusCode,
    response::Json,
};
use sqlx::SqlitePool;

use crate::backend::auth::handlers::types::{LoginForm, TokenResponse};
use crate::backend::auth::sessions::TokenIssuer;
use crate::backend::auth::users::get_user_by_username;
use crate::backend::error::BackendError;
use crate::backend::server::state::require_pool;

/// Login handler
///
/// # Errors
///
/// * `400 Bad Request` - If user is not found or password is incorrect
/// * `503 Service Unavailable` - If database is not configured
/// * `500 Internal Server Error` - If the query or token generation fails
///
/// # Example Request
///
/// ```http
/// POST /token HTTP/1.1
/// Content-Type: application/x-www-form-urlencoded
///
/// username=alice&password=correct+horse
/// ```
///
/// # Example Response
///
/// ```json
/// {"access_token": "eyJhbGciOiJIUzI1NiIsInR5cCI6IkpXVCJ9...", "token_type": "bearer"}
/// ```
pub async fn login(
    State(pool): State<Option<SqlitePool>>,
    State(tokens): State<TokenIssuer>,
    Form(form): Form<LoginForm>,
) -> Result<Json<TokenResponse>, BackendError> {
    let pool = require_pool(pool)?;
    tracing::info!("[Auth] Login request for: {}", form.username);

    let user = match get_user_by_username(&pool, &form.username).await? {
        Some(user) => user,
        None => {
            tracing::warn!("[Auth] User not found: {}", form.username);
            return Err(bad_credentials());
        }
    };

    let hashed_password = user.hashed_password.clone();
    let password = form.password;
    let valid = tokio::task::spawn_blocking(move || bcrypt::verify(password, &hashed_password))
        .await
        .map_err(|e| {
            tracing::error!("[Auth] Password verification task failed: {:?}", e);
            BackendError::handler(StatusCode::INTERNAL_SERVER_ERROR, "Server error")
        })?
        .unwrap_or_else(|e| {
            tracing::warn!("[Auth] Stored hash for {} is unusable: {:?}", user.username, e);
            false
        });

    if !valid {
        tracing::warn!("[Auth] Invalid password for user: {}", form.username);
        return Err(bad_credentials());
    }

    let token = tokens.create_token(user.id, &user.username).map_err(|e| {
        tracing::error!("[Auth] Failed to create token: {:?}", e);
        BackendError::handler(StatusCode::INTERNAL_SERVER_ERROR, "Server error")
    })?;

    tracing::info!("[Auth] User logged in successfully: {} ({})", user.username, user.id);
    Ok(Json(TokenResponse::bearer(token)))
}

fn bad_credentials() -> BackendError {
    BackendError::handler(StatusCode::BAD_REQUEST, "Incorrect username or password")
}
