//! Database connection pool management
//!
//! This module provides connection pool configuration and creation for PostgreSQL
//! using SQLx.

use sqlx::postgres::{PgPool, PgPoolOptions};
use std::time::Duration;
use tracing::info;

use crate::error::DatabaseError;
use crate::settings::DatabaseSettings;

/// Type alias for the PostgreSQL connection pool
pub type DatabasePool = PgPool;

/// Configuration options for the database connection pool
///
/// # Example
///
/// ```rust
/// use infra_db::DatabaseConfig;
/// use std::time::Duration;
///
/// let config = DatabaseConfig::new()
///     .max_connections(20)
///     .acquire_timeout(Duration::from_secs(10));
/// assert_eq!(config.max_connections, 20);
/// ```
#[derive(Debug, Clone)]
pub struct DatabaseConfig {
    /// Maximum number of connections in the pool
    pub max_connections: u32,
    /// Minimum number of connections to maintain
    pub min_connections: u32,
    /// How long a request waits for a connection
    pub acquire_timeout: Duration,
    /// Maximum lifetime of a connection
    pub max_lifetime: Duration,
    /// Idle timeout before closing a connection
    pub idle_timeout: Duration,
}

impl DatabaseConfig {
    /// Creates a pool configuration with the service defaults
    pub fn new() -> Self {
        Self {
            max_connections: 10,
            min_connections: 0,
            acquire_timeout: Duration::from_secs(30),
            max_lifetime: Duration::from_secs(30 * 60), // 30 minutes
            idle_timeout: Duration::from_secs(10 * 60), // 10 minutes
        }
    }

    /// Sets the maximum number of connections in the pool
    ///
    /// # Arguments
    ///
    /// * `max` - Maximum connection count (default: 10)
    pub fn max_connections(mut self, max: u32) -> Self {
        self.max_connections = max;
        self
    }

    /// Sets the minimum number of connections to maintain
    ///
    /// # Arguments
    ///
    /// * `min` - Minimum connection count (default: 0)
    pub fn min_connections(mut self, min: u32) -> Self {
        self.min_connections = min;
        self
    }

    /// Sets how long to wait for a connection
    ///
    /// # Arguments
    ///
    /// * `timeout` - Acquire timeout (default: 30s)
    pub fn acquire_timeout(mut self, timeout: Duration) -> Self {
        self.acquire_timeout = timeout;
        self
    }

    /// Sets the maximum lifetime of a connection
    pub fn max_lifetime(mut self, lifetime: Duration) -> Self {
        self.max_lifetime = lifetime;
        self
    }

    /// Sets the idle timeout before closing a connection
    pub fn idle_timeout(mut self, timeout: Duration) -> Self {
        self.idle_timeout = timeout;
        self
    }

    fn pool_options(&self) -> PgPoolOptions {
        PgPoolOptions::new()
            .max_connections(self.max_connections)
            .min_connections(self.min_connections)
            .acquire_timeout(self.acquire_timeout)
            .max_lifetime(self.max_lifetime)
            .idle_timeout(self.idle_timeout)
    }
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self::new()
    }
}

/// Creates a pool and opens its first connection
///
/// # Errors
///
/// Returns `DatabaseError::ConnectionFailed` if the database cannot be reached
///
/// # Example
///
/// ```rust,ignore
/// use infra_db::{DatabaseConfig, DatabaseSettings, create_pool};
///
/// let settings = DatabaseSettings::from_url("postgres://localhost/etf")?;
/// let pool = create_pool(&settings, &DatabaseConfig::default()).await?;
/// ```
pub async fn create_pool(
    settings: &DatabaseSettings,
    config: &DatabaseConfig,
) -> Result<DatabasePool, DatabaseError> {
    info!(
        database = %settings,
        max_connections = config.max_connections,
        "Creating database pool"
    );

    let pool = config
        .pool_options()
        .connect_with(settings.connect_options())
        .await
        .map_err(|e| DatabaseError::ConnectionFailed(e.to_string()))?;

    info!("Database pool created successfully");
    Ok(pool)
}

/// Creates a pool without connecting
///
/// Connections are opened on first use, so a database that is down at
/// startup surfaces as a failure of the first request instead of a failure
/// to boot.
pub fn create_lazy_pool(settings: &DatabaseSettings, config: &DatabaseConfig) -> DatabasePool {
    info!(
        database = %settings,
        max_connections = config.max_connections,
        "Creating lazy database pool"
    );

    config.pool_options().connect_lazy_with(settings.connect_options())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_builder() {
        let config = DatabaseConfig::new()
            .max_connections(50)
            .min_connections(10)
            .acquire_timeout(Duration::from_secs(60));

        assert_eq!(config.max_connections, 50);
        assert_eq!(config.min_connections, 10);
        assert_eq!(config.acquire_timeout, Duration::from_secs(60));
    }

    #[tokio::test]
    async fn test_lazy_pool_does_not_connect() {
        let settings = DatabaseSettings::from_url("postgres://nobody@127.0.0.1:1/missing").unwrap();
        let pool = create_lazy_pool(&settings, &DatabaseConfig::default());

        assert_eq!(pool.size(), 0);
    }
}
