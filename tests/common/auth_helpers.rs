//! Authentication test helpers
//!
//! Provides utilities for creating test users and their tokens.

use chatwire::backend::auth::sessions::TokenIssuer;
use chatwire::backend::auth::users::create_user;
use chatwire::shared::UserId;
use sqlx::SqlitePool;

/// Lowest cost bcrypt accepts; keeps tests fast
pub const TEST_BCRYPT_COST: u32 = 4;

/// Test user credentials
pub struct TestUser {
    pub id: UserId,
    pub username: String,
    pub password: String,
    pub token: String,
}

impl TestUser {
    pub fn bearer(&self) -> String {
        format!("Bearer {}", self.token)
    }
}

/// Create a test user in the database and issue a token for it
pub async fn create_test_user(
    pool: &SqlitePool,
    tokens: &TokenIssuer,
    username: &str,
    password: &str,
) -> TestUser {
    let hashed = bcrypt::hash(password, TEST_BCRYPT_COST).expect("Failed to hash test password");
    let user = create_user(pool, username, &hashed)
        .await
        .expect("Failed to create test user");
    let token = tokens
        .create_token(user.id, &user.username)
        .expect("Failed to create test token");

    TestUser {
        id: user.id,
        username: user.username,
        password: password.to_string(),
        token,
    }
}
