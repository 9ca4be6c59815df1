//! Authentication Handlers Module
//!
//! This module contains all HTTP handlers for authentication endpoints.
//!
//! # Module Structure
//!
//! ```text
//! handlers/
//! ├── mod.rs      - Module exports and documentation
//! ├── types.rs    - Request and response types
//! ├── signup.rs   - User registration handler
//! ├── login.rs    - Token endpoint
//! └── me.rs       - Get current user handler
//! ```
//!
//! # Handlers
//!
//! - **`signup`** - POST /users/ - User registration
//! - **`login`** - POST /token - OAuth2 password flow, returns a bearer token
//! - **`get_me`** - GET /users/me/ - Current user info

/// Request and response types
pub mod types;

/// Signup handler
pub mod signup;

/// Login handler
pub mod login;

/// Get current user handler
pub mod me;

pub use types::{LoginForm, SignupRequest, TokenResponse, UserResponse};

pub use login::login;
pub use me::get_me;
pub use signup::signup;
