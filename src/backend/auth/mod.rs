//! Authentication Module
//!
//! This module handles user registration, login and bearer-token sessions.
//!
//! # Architecture
//!
//! - **`users`** - User data model and database operations
//! - **`sessions`** - JWT token generation and validation
//! - **`handlers`** - HTTP handlers for authentication endpoints
//!
//! # Module Structure
//!
//! ```text
//! auth/
//! ├── mod.rs          - Module exports and documentation
//! ├── users.rs        - User model and database operations
//! ├── sessions.rs     - JWT token management
//! └── handlers/       - HTTP handlers
//!     ├── mod.rs      - Handler exports
//!     ├── types.rs    - Request/response types
//!     ├── signup.rs   - User registration handler
//!     ├── login.rs    - Token endpoint
//!     └── me.rs       - Get current user handler
//! ```
//!
//! # Authentication Flow
//!
//! 1. **Signup**: username and password → user created
//! 2. **Login**: OAuth2 password form → credentials verified → bearer token
//! 3. **Authenticated requests**: `Authorization: Bearer <token>` →
//!    `middleware::auth::require_auth` → `AuthUser` in the handler
//!
//! # Security
//!
//! - Passwords are hashed using bcrypt before storage
//! - Tokens are HS256 JWTs that expire after `ACCESS_TOKEN_EXPIRE_MINUTES`
//! - Invalid credentials return 400 without saying which part was wrong

/// User data model and database operations
pub mod users;

/// JWT token generation and validation
pub mod sessions;

/// HTTP handlers for authentication endpoints
pub mod handlers;

pub use handlers::{get_me, login, signup};
pub use handlers::{LoginForm, SignupRequest, TokenResponse, UserResponse};
pub use sessions::{Claims, TokenIssuer};
pub use users::User;
