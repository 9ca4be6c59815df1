//! Database test fixtures
//!
//! Every fixture is a private in-memory SQLite database with the schema
//! applied, so tests never share state.

use sqlx::sqlite::{SqlitePool, SqlitePoolOptions};

/// Create a fresh in-memory database with migrations applied
pub async fn create_test_pool() -> SqlitePool {
    // One connection: each `sqlite::memory:` connection is its own database.
    let pool = SqlitePoolOptions::new()
        .max_connections(1)
        .connect("sqlite::memory:")
        .await
        .expect("Failed to create test database pool");
    run_migrations(&pool)
        .await
        .expect("Failed to run migrations");
    pool
}

/// Run database migrations for testing
pub async fn run_migrations(pool: &SqlitePool) -> Result<(), sqlx::migrate::MigrateError> {
    sqlx::migrate!("./migrations").run(pool).await
}

/// Test database fixture
pub struct TestDatabase {
    pool: SqlitePool,
}

impl TestDatabase {
    pub async fn new() -> Self {
        Self {
            pool: create_test_pool().await,
        }
    }

    /// Get the database pool
    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }
}
