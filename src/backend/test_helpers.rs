/**
 * Test Helpers
 *
 * Shared fixtures for unit tests inside the backend modules.
 */

use sqlx::sqlite::{SqlitePool, SqlitePoolOptions};

use crate::backend::auth::users::{create_user, User};
use crate::backend::channels::db::create_channel;
use crate::shared::Channel;

/// Fresh in-memory database with the schema applied
///
/// A single connection: every connection to `sqlite::memory:` would
/// otherwise get its own empty database.
pub async fn test_pool() -> SqlitePool {
    let pool = SqlitePoolOptions::new()
        .max_connections(1)
        .connect("sqlite::memory:")
        .await
        .expect("Failed to open in-memory database");
    sqlx::migrate!()
        .run(&pool)
        .await
        .expect("Failed to run migrations");
    pool
}

/// Insert a user with a throwaway password hash
pub async fn seed_user(pool: &SqlitePool, username: &str) -> User {
    create_user(pool, username, "not-a-real-hash")
        .await
        .expect("Failed to create test user")
}

pub async fn seed_channel(pool: &SqlitePool, name: &str) -> Channel {
    create_channel(pool, name)
        .await
        .expect("Failed to create test channel")
}
