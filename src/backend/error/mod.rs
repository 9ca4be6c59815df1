//! Backend Error Module
//!
//! This module defines error types specific to the backend server.
//!
//! # Module Structure
//!
//! ```text
//! error/
//! ├── mod.rs        - Module exports and documentation
//! ├── types.rs      - BackendError and RealtimeError
//! └── conversion.rs - IntoResponse for BackendError
//! ```
//!
//! Handlers return `Result<_, BackendError>` and use `?` on database,
//! token and validation errors; the `From` impls pick the right status.

/// Error type definitions
pub mod types;

/// Error conversion implementations
pub mod conversion;

// Re-export commonly used types
pub use types::{BackendError, RealtimeError};
