/**
 * Backend Error Types
 *
 * This module defines error types specific to the backend server.
 * `BackendError` is what HTTP handlers return; `RealtimeError` covers the
 * WebSocket fan-out layer and is folded into `BackendError` when it has to
 * reach an HTTP response (a rejected handshake).
 *
 * # Error Categories
 *
 * ## Handler Errors
 *
 * Problems with the request itself: unknown channel, taken username,
 * missing or bad credentials.
 *
 * ## State Errors
 *
 * The server is missing something it needs, e.g. the database pool.
 *
 * ## Realtime Errors
 *
 * Handshake rejections and registry inconsistencies. Per-connection read
 * and write failures never become errors here; they end that one session.
 */

use axum::http::StatusCode;
use thiserror::Error;
use uuid::Uuid;

use crate::shared::{ChannelId, SharedError};

/// Errors raised by the real-time layer
#[derive(Debug, Error)]
pub enum RealtimeError {
    /// The connection was refused before the session became active
    ///
    /// No registry mutation has happened when this is returned.
    #[error("Handshake rejected for channel {channel_id}: {reason}")]
    HandshakeFailure {
        channel_id: ChannelId,
        reason: String,
    },

    /// `join` was called for a session that is already registered
    #[error("Session {session_id} is already registered in channel {channel_id}")]
    AlreadyJoined {
        session_id: Uuid,
        channel_id: ChannelId,
    },
}

/// Backend-specific error types
///
/// Each variant maps to an HTTP status code and renders as a JSON body
/// through the `IntoResponse` implementation in `conversion`.
///
/// # Usage
///
/// ```rust
/// use chatwire::backend::error::BackendError;
/// use axum::http::StatusCode;
///
/// let err = BackendError::handler(StatusCode::BAD_REQUEST, "Channel already exists");
/// let err = BackendError::state("Database not configured");
/// ```
#[derive(Debug, Error)]
pub enum BackendError {
    /// Handler error (e.g., bad input, unknown resource)
    #[error("Handler error: {message}")]
    HandlerError {
        /// HTTP status code for this error
        status: StatusCode,
        /// Human-readable error message
        message: String,
    },

    /// The server is missing a service this request needs
    #[error("State error: {message}")]
    StateError {
        /// Human-readable error message
        message: String,
    },

    /// Shared error (validation of API types)
    #[error(transparent)]
    SharedError(#[from] SharedError),

    /// Database error from the persistence layer
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    /// Token could not be issued or verified
    #[error("Token error: {0}")]
    Token(#[from] jsonwebtoken::errors::Error),

    /// Real-time layer error
    #[error(transparent)]
    Realtime(#[from] RealtimeError),
}

impl BackendError {
    /// Create a new handler error with a status code
    pub fn handler(status: StatusCode, message: impl Into<String>) -> Self {
        Self::HandlerError {
            status,
            message: message.into(),
        }
    }

    /// Create a new state error
    pub fn state(message: impl Into<String>) -> Self {
        Self::StateError {
            message: message.into(),
        }
    }

    /// Shorthand for a 404 handler error
    pub fn not_found(message: impl Into<String>) -> Self {
        Self::handler(StatusCode::NOT_FOUND, message)
    }

    /// Get the HTTP status code for this error
    ///
    /// # Status Code Mapping
    ///
    /// - `HandlerError` - Uses the status code from the error
    /// - `StateError` - 503 Service Unavailable
    /// - `SharedError` - 400 Bad Request
    /// - `Database` - 500 Internal Server Error
    /// - `Token` - 401 Unauthorized
    /// - `Realtime` - 404 for a rejected handshake, 409 for a duplicate join
    pub fn status_code(&self) -> StatusCode {
        match self {
            Self::HandlerError { status, .. } => *status,
            Self::StateError { .. } => StatusCode::SERVICE_UNAVAILABLE,
            Self::SharedError(_) => StatusCode::BAD_REQUEST,
            Self::Database(_) => StatusCode::INTERNAL_SERVER_ERROR,
            Self::Token(_) => StatusCode::UNAUTHORIZED,
            Self::Realtime(err) => match err {
                RealtimeError::HandshakeFailure { .. } => StatusCode::NOT_FOUND,
                RealtimeError::AlreadyJoined { .. } => StatusCode::CONFLICT,
            },
        }
    }

    /// Get the error message that is safe to show to a client
    ///
    /// Database and token internals are not echoed back.
    pub fn message(&self) -> String {
        match self {
            Self::HandlerError { message, .. } => message.clone(),
            Self::StateError { message } => message.clone(),
            Self::SharedError(err) => err.to_string(),
            Self::Database(_) => "Database error".to_string(),
            Self::Token(_) => "Could not validate credentials".to_string(),
            Self::Realtime(err) => err.to_string(),
        }
    }
}
