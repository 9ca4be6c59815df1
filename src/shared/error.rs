//! Request Validation Errors
//!
//! Raised by the `validate` methods on request bodies before anything is
//! stored or broadcast. The backend turns every one into a 400.
//!
//! ```rust
//! use chatwire::shared::error::SharedError;
//!
//! let error = SharedError::validation("content", "Message content cannot be empty");
//! assert_eq!(error.field, "content");
//! ```
use thiserror::Error;

/// A request body field that failed its checks
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[error("Invalid {field}: {message}")]
pub struct SharedError {
    /// Name of the offending field, as it appears in the JSON body
    pub field: &'static str,
    pub message: String,
}

impl SharedError {
    pub fn validation(field: &'static str, message: impl Into<String>) -> Self {
        Self {
            field,
            message: message.into(),
        }
    }
}
