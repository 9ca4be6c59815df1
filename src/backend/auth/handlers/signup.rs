/**
 * Signup Handler
 *
 * This module implements the user registration handler for POST /users/.
 *
 * # Registration Process
 *
 * 1. Validate username format and password length
 * 2. Check if the username is taken
 * 3. Hash password using bcrypt (on the blocking pool)
 * 4. Create user in database
 * 5. Return the user
 *
 * # Validation
 *
 * - Username: 3-30 characters, starts with a letter, then letters,
 *   digits or underscores
 * - Password must be at least 8 characters long
 */

use std::sync::Arc;

use axum::{extract::State, http::StatusCode, response::Json};
use sqlx::SqlitePool;

use crate::backend::auth::handlers::types::{SignupRequest, UserResponse};
use crate::backend::auth::users::{create_user, get_user_by_username, is_unique_violation};
use crate::backend::error::BackendError;
use crate::backend::server::config::ServerConfig;
use crate::backend::server::state::require_pool;

/// Shortest accepted password, in characters
pub const MIN_PASSWORD_LEN: usize = 8;

/// Validate username format
///
/// Usernames must be:
/// - 3-30 characters long
/// - Contain only alphanumeric characters and underscores
/// - Start with a letter
pub fn is_valid_username(username: &str) -> bool {
    if username.len() < 3 || username.len() > 30 {
        return false;
    }

    let mut chars = username.chars();

    match chars.next() {
        Some(c) if c.is_ascii_alphabetic() => {}
        _ => return false,
    }

    chars.all(|c| c.is_ascii_alphanumeric() || c == '_')
}

/// Sign up handler
///
/// # Errors
///
/// * `400 Bad Request` - Invalid username or password, or username taken
/// * `503 Service Unavailable` - If database is not configured
/// * `500 Internal Server Error` - If hashing or the insert fails
///
/// # Example Request
///
/// ```http
/// POST /users/ HTTP/1.1
/// Content-Type: application/json
///
/// {"username": "alice", "password": "correct horse"}
/// ```
pub async fn signup(
    State(pool): State<Option<SqlitePool>>,
    State(config): State<Arc<ServerConfig>>,
    Json(request): Json<SignupRequest>,
) -> Result<Json<UserResponse>, BackendError> {
    let pool = require_pool(pool)?;
    tracing::info!("[Auth] Signup request for username: {}", request.username);

    if !is_valid_username(&request.username) {
        tracing::warn!("[Auth] Invalid username format: {}", request.username);
        return Err(BackendError::handler(
            StatusCode::BAD_REQUEST,
            "Username must be 3-30 chars, start with a letter, and contain only letters, numbers, and underscores",
        ));
    }

    if request.password.chars().count() < MIN_PASSWORD_LEN {
        tracing::warn!("[Auth] Password too short");
        return Err(BackendError::handler(
            StatusCode::BAD_REQUEST,
            format!("Password must be at least {} characters", MIN_PASSWORD_LEN),
        ));
    }

    if get_user_by_username(&pool, &request.username).await?.is_some() {
        tracing::warn!("[Auth] Username already exists: {}", request.username);
        return Err(username_taken());
    }

    let cost = config.bcrypt_cost;
    let password = request.password;
    let hashed_password = tokio::task::spawn_blocking(move || bcrypt::hash(password, cost))
        .await
        .map_err(|e| {
            tracing::error!("[Auth] Password hashing task failed: {:?}", e);
            BackendError::handler(StatusCode::INTERNAL_SERVER_ERROR, "Server error")
        })?
        .map_err(|e| {
            tracing::error!("[Auth] Failed to hash password: {:?}", e);
            BackendError::handler(StatusCode::INTERNAL_SERVER_ERROR, "Server error")
        })?;

    // The lookup above can race with a concurrent signup.
    let user = match create_user(&pool, &request.username, &hashed_password).await {
        Ok(user) => user,
        Err(e) if is_unique_violation(&e) => return Err(username_taken()),
        Err(e) => return Err(e.into()),
    };

    tracing::info!("[Auth] User created successfully: {} ({})", user.username, user.id);
    Ok(Json(user.into()))
}

fn username_taken() -> BackendError {
    BackendError::handler(StatusCode::BAD_REQUEST, "Username already registered")
}
