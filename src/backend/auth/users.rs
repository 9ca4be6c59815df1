/**
 * User Model and Database Operations
 *
 * This module handles user data and database operations.
 */

use serde::{Deserialize, Serialize};
use sqlx::SqlitePool;

use crate::shared::UserId;

/// User struct representing a user in the database
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct User {
    /// Row id assigned on insert
    pub id: UserId,
    /// Username (unique, 3-30 chars, letters, digits and underscore)
    pub username: String,
    /// Hashed password (bcrypt), never serialized
    #[serde(skip_serializing, default)]
    pub hashed_password: String,
    pub is_moderator: bool,
    /// Inactive users cannot authenticate
    pub is_active: bool,
}

/// Create a new user
///
/// # Arguments
/// * `pool` - Database connection pool
/// * `username` - User's chosen username
/// * `hashed_password` - bcrypt hash of the password
///
/// # Returns
/// Created user or error (a taken username is a unique-constraint error)
pub async fn create_user(
    pool: &SqlitePool,
    username: &str,
    hashed_password: &str,
) -> Result<User, sqlx::Error> {
    let user = sqlx::query_as::<_, User>(
        r#"
        INSERT INTO users (username, hashed_password)
        VALUES (?, ?)
        RETURNING id, username, hashed_password, is_moderator, is_active
        "#,
    )
    .bind(username)
    .bind(hashed_password)
    .fetch_one(pool)
    .await?;

    Ok(user)
}

/// Get user by username
///
/// # Returns
/// User or None if not found
pub async fn get_user_by_username(
    pool: &SqlitePool,
    username: &str,
) -> Result<Option<User>, sqlx::Error> {
    let user = sqlx::query_as::<_, User>(
        r#"
        SELECT id, username, hashed_password, is_moderator, is_active
        FROM users
        WHERE username = ?
        "#,
    )
    .bind(username)
    .fetch_optional(pool)
    .await?;

    Ok(user)
}

/// Get user by ID
///
/// # Returns
/// User or None if not found
pub async fn get_user_by_id(pool: &SqlitePool, id: UserId) -> Result<Option<User>, sqlx::Error> {
    let user = sqlx::query_as::<_, User>(
        r#"
        SELECT id, username, hashed_password, is_moderator, is_active
        FROM users
        WHERE id = ?
        "#,
    )
    .bind(id)
    .fetch_optional(pool)
    .await?;

    Ok(user)
}

/// Whether a database error is a unique-constraint violation
pub fn is_unique_violation(err: &sqlx::Error) -> bool {
    matches!(err, sqlx::Error::Database(db) if db.is_unique_violation())
}
