/**
 * Server Configuration
 *
 * This module handles loading and validation of server configuration and
 * opening the SQLite database.
 *
 * # Configuration Sources
 *
 * Configuration is read from environment variables (a `.env` file is
 * loaded by the binary first), with defaults suitable for local
 * development:
 *
 * | Variable                      | Default                 |
 * |-------------------------------|-------------------------|
 * | `SERVER_HOST`                 | `0.0.0.0`               |
 * | `SERVER_PORT`                 | `8000`                  |
 * | `DATABASE_URL`                | `sqlite://chat_app.db`  |
 * | `JWT_SECRET`                  | development secret      |
 * | `ACCESS_TOKEN_EXPIRE_MINUTES` | `30`                    |
 * | `BCRYPT_COST`                 | `bcrypt::DEFAULT_COST`  |
 * | `WS_DELIVERY_TIMEOUT_MS`      | `2000`                  |
 * | `WS_WRITE_TIMEOUT_MS`         | `5000`                  |
 * | `WS_OUTBOUND_BUFFER`          | `64`                    |
 *
 * # Error Handling
 *
 * Malformed values are a `ConfigError` and stop startup. A database that
 * cannot be opened is logged and the server continues without it;
 * handlers that need it answer 503.
 */

use std::net::{IpAddr, SocketAddr};
use std::str::FromStr;
use std::time::Duration;

use sqlx::sqlite::{SqliteConnectOptions, SqlitePool, SqlitePoolOptions};
use thiserror::Error;

use crate::backend::realtime::registry::DEFAULT_DELIVERY_TIMEOUT;
use crate::backend::realtime::session::{SessionConfig, DEFAULT_OUTBOUND_BUFFER, DEFAULT_WRITE_TIMEOUT};

/// Secret used when `JWT_SECRET` is not set
pub const DEV_JWT_SECRET: &str = "chatwire-development-secret-change-me";

pub const DEFAULT_DATABASE_URL: &str = "sqlite://chat_app.db";

/// Longest accepted access token lifetime (one year)
pub const MAX_TOKEN_TTL: Duration = Duration::from_secs(365 * 24 * 60 * 60);

/// Configuration errors
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    /// An environment variable could not be parsed
    #[error("Invalid value {value:?} for {key}: {reason}")]
    InvalidValue {
        key: &'static str,
        value: String,
        reason: String,
    },

    /// A value parsed but is out of range
    #[error("Invalid configuration for {field}: {reason}")]
    Invalid { field: &'static str, reason: String },
}

/// Database configuration result
///
/// `None` when the database could not be opened.
pub type DatabaseConfig = Option<SqlitePool>;

/// Complete server configuration
#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub host: IpAddr,
    pub port: u16,
    pub database_url: String,
    pub jwt_secret: String,
    pub token_ttl: Duration,
    pub bcrypt_cost: u32,
    /// Bound on one subscriber delivery during a broadcast
    pub delivery_timeout: Duration,
    /// Bound on one socket write
    pub write_timeout: Duration,
    /// Capacity of each session's outbound queue
    pub outbound_buffer: usize,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: IpAddr::from([0, 0, 0, 0]),
            port: 8000,
            database_url: DEFAULT_DATABASE_URL.to_string(),
            jwt_secret: DEV_JWT_SECRET.to_string(),
            token_ttl: Duration::from_secs(30 * 60),
            bcrypt_cost: bcrypt::DEFAULT_COST,
            delivery_timeout: DEFAULT_DELIVERY_TIMEOUT,
            write_timeout: DEFAULT_WRITE_TIMEOUT,
            outbound_buffer: DEFAULT_OUTBOUND_BUFFER,
        }
    }
}

impl ServerConfig {
    /// Start from defaults
    pub fn builder() -> ServerConfigBuilder {
        ServerConfigBuilder {
            config: ServerConfig::default(),
        }
    }

    /// Load configuration from the process environment
    ///
    /// # Errors
    ///
    /// Returns a `ConfigError` for the first variable that does not parse
    /// or a value that fails validation.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Load configuration through an arbitrary key lookup
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = ServerConfig::default();

        if let Some(host) = lookup("SERVER_HOST") {
            config.host = parse("SERVER_HOST", &host)?;
        }
        if let Some(port) = lookup("SERVER_PORT") {
            config.port = parse("SERVER_PORT", &port)?;
        }
        if let Some(url) = lookup("DATABASE_URL") {
            config.database_url = url;
        }
        match lookup("JWT_SECRET") {
            Some(secret) => config.jwt_secret = secret,
            None => tracing::warn!("[Config] JWT_SECRET not set, using the development secret"),
        }
        if let Some(minutes) = lookup("ACCESS_TOKEN_EXPIRE_MINUTES") {
            let parsed: u64 = parse("ACCESS_TOKEN_EXPIRE_MINUTES", &minutes)?;
            let secs = parsed.checked_mul(60).ok_or_else(|| ConfigError::InvalidValue {
                key: "ACCESS_TOKEN_EXPIRE_MINUTES",
                value: minutes.clone(),
                reason: "number of minutes is too large".to_string(),
            })?;
            config.token_ttl = Duration::from_secs(secs);
        }
        if let Some(cost) = lookup("BCRYPT_COST") {
            config.bcrypt_cost = parse("BCRYPT_COST", &cost)?;
        }
        if let Some(ms) = lookup("WS_DELIVERY_TIMEOUT_MS") {
            config.delivery_timeout = Duration::from_millis(parse("WS_DELIVERY_TIMEOUT_MS", &ms)?);
        }
        if let Some(ms) = lookup("WS_WRITE_TIMEOUT_MS") {
            config.write_timeout = Duration::from_millis(parse("WS_WRITE_TIMEOUT_MS", &ms)?);
        }
        if let Some(size) = lookup("WS_OUTBOUND_BUFFER") {
            config.outbound_buffer = parse("WS_OUTBOUND_BUFFER", &size)?;
        }

        config.validate()?;
        Ok(config)
    }

    /// Check value ranges
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.jwt_secret.is_empty() {
            return Err(invalid("jwt_secret", "must not be empty"));
        }
        if self.token_ttl.is_zero() {
            return Err(invalid("token_ttl", "must be greater than zero"));
        }
        if self.token_ttl > MAX_TOKEN_TTL {
            return Err(invalid("token_ttl", "must not exceed one year"));
        }
        if !(4..=31).contains(&self.bcrypt_cost) {
            return Err(invalid("bcrypt_cost", "must be between 4 and 31"));
        }
        if self.delivery_timeout.is_zero() {
            return Err(invalid("delivery_timeout", "must be greater than zero"));
        }
        if self.write_timeout.is_zero() {
            return Err(invalid("write_timeout", "must be greater than zero"));
        }
        if self.outbound_buffer == 0 {
            return Err(invalid("outbound_buffer", "must be greater than zero"));
        }
        Ok(())
    }

    /// Address the listener binds to
    pub fn bind_addr(&self) -> SocketAddr {
        SocketAddr::new(self.host, self.port)
    }

    /// Per-session settings handed to every real-time connection
    pub fn session_config(&self) -> SessionConfig {
        SessionConfig {
            outbound_buffer: self.outbound_buffer,
            write_timeout: self.write_timeout,
        }
    }
}

/// Builder for `ServerConfig`, validated on `build`
#[derive(Debug, Clone)]
pub struct ServerConfigBuilder {
    config: ServerConfig,
}

impl ServerConfigBuilder {
    pub fn host(mut self, host: IpAddr) -> Self {
        self.config.host = host;
        self
    }

    pub fn port(mut self, port: u16) -> Self {
        self.config.port = port;
        self
    }

    pub fn database_url(mut self, url: impl Into<String>) -> Self {
        self.config.database_url = url.into();
        self
    }

    pub fn jwt_secret(mut self, secret: impl Into<String>) -> Self {
        self.config.jwt_secret = secret.into();
        self
    }

    pub fn token_ttl(mut self, ttl: Duration) -> Self {
        self.config.token_ttl = ttl;
        self
    }

    pub fn bcrypt_cost(mut self, cost: u32) -> Self {
        self.config.bcrypt_cost = cost;
        self
    }

    pub fn delivery_timeout(mut self, timeout: Duration) -> Self {
        self.config.delivery_timeout = timeout;
        self
    }

    pub fn write_timeout(mut self, timeout: Duration) -> Self {
        self.config.write_timeout = timeout;
        self
    }

    pub fn outbound_buffer(mut self, capacity: usize) -> Self {
        self.config.outbound_buffer = capacity;
        self
    }

    pub fn build(self) -> Result<ServerConfig, ConfigError> {
        self.config.validate()?;
        Ok(self.config)
    }
}

fn parse<T>(key: &'static str, value: &str) -> Result<T, ConfigError>
where
    T: FromStr,
    T::Err: std::fmt::Display,
{
    value.trim().parse().map_err(|err: T::Err| ConfigError::InvalidValue {
        key,
        value: value.to_string(),
        reason: err.to_string(),
    })
}

fn invalid(field: &'static str, reason: &str) -> ConfigError {
    ConfigError::Invalid {
        field,
        reason: reason.to_string(),
    }
}

/// Open the SQLite database and run migrations
///
/// The database file is created if it does not exist.
///
/// # Returns
///
/// - `Some(SqlitePool)` if the database is ready
/// - `None` if the URL is invalid or the connection fails
pub async fn load_database(config: &ServerConfig) -> DatabaseConfig {
    let options = match SqliteConnectOptions::from_str(&config.database_url) {
        Ok(options) => options.create_if_missing(true),
        Err(e) => {
            tracing::error!("[Database] Invalid DATABASE_URL {}: {}", config.database_url, e);
            tracing::warn!("[Database] Database features will be disabled.");
            return None;
        }
    };

    tracing::info!("[Database] Connecting to {}", config.database_url);

    let pool = match SqlitePoolOptions::new().connect_with(options).await {
        Ok(pool) => pool,
        Err(e) => {
            tracing::error!("[Database] Failed to create connection pool: {:?}", e);
            tracing::warn!("[Database] Database features will be disabled.");
            return None;
        }
    };

    tracing::info!("[Database] Running migrations...");
    match sqlx::migrate!().run(&pool).await {
        Ok(_) => tracing::info!("[Database] Migrations completed successfully"),
        Err(e) => {
            tracing::error!("[Database] Failed to run migrations: {}", e);
            tracing::warn!("[Database] Continuing, the schema may be out of date");
        }
    }

    Some(pool)
}
