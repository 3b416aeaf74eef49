//! API configuration

use std::collections::HashMap;
use std::time::Duration;

use config::{Config, ConfigError, Environment};
use serde::Deserialize;

use core_kernel::CoreError;
use infra_db::{DatabaseConfig, DatabaseSettings};

/// Output format of the log subscriber
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    /// Human readable lines
    Pretty,
    /// One JSON object per event
    Json,
}

/// API configuration
///
/// Built once at startup and handed to the router; never mutated afterwards.
#[derive(Debug, Clone, Deserialize)]
pub struct ApiConfig {
    /// Server host
    pub host: String,
    /// Server port
    pub port: u16,
    /// PostgreSQL connection string
    pub database_url: String,
    /// Log level
    pub log_level: String,
    /// Log output format
    pub log_format: LogFormat,
    /// Forward data-source failure messages to clients in 500 bodies
    pub expose_error_details: bool,
    /// Maximum pooled database connections
    pub db_max_connections: u32,
    /// Seconds a request waits for a pooled connection
    pub db_acquire_timeout_secs: u64,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 5000,
            database_url: "postgres://localhost/etf".to_string(),
            log_level: "info".to_string(),
            log_format: LogFormat::Pretty,
            expose_error_details: true,
            db_max_connections: 10,
            db_acquire_timeout_secs: 30,
        }
    }
}

impl ApiConfig {
    /// Loads configuration from `API_`-prefixed environment variables
    ///
    /// `DATABASE_URL` takes precedence over `API_DATABASE_URL`.
    pub fn from_env() -> Result<Self, CoreError> {
        Self::load(None, std::env::var("DATABASE_URL").ok())
    }

    /// Loads configuration from the given variables instead of the process environment
    pub fn from_vars(vars: HashMap<String, String>) -> Result<Self, CoreError> {
        let database_url = vars.get("DATABASE_URL").cloned();
        Self::load(Some(vars), database_url)
    }

    fn load(
        vars: Option<HashMap<String, String>>,
        database_url: Option<String>,
    ) -> Result<Self, CoreError> {
        Self::build(vars, database_url).map_err(|e| CoreError::configuration(e.to_string()))
    }

    fn build(
        vars: Option<HashMap<String, String>>,
        database_url: Option<String>,
    ) -> Result<Self, ConfigError> {
        let defaults = Self::default();

        Config::builder()
            .set_default("host", defaults.host)?
            .set_default("port", i64::from(defaults.port))?
            .set_default("database_url", defaults.database_url)?
            .set_default("log_level", defaults.log_level)?
            .set_default("log_format", "pretty")?
            .set_default("expose_error_details", defaults.expose_error_details)?
            .set_default("db_max_connections", i64::from(defaults.db_max_connections))?
            .set_default("db_acquire_timeout_secs", defaults.db_acquire_timeout_secs as i64)?
            .add_source(Environment::with_prefix("API").try_parsing(true).source(vars))
            .set_override_option("database_url", database_url)?
            .build()?
            .try_deserialize()
    }

    /// Returns the server address
    pub fn server_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    /// Parses the connection string into its components
    ///
    /// # Errors
    ///
    /// Returns `CoreError::Configuration` for an unparseable or non-Postgres URL
    pub fn database_settings(&self) -> Result<DatabaseSettings, CoreError> {
        DatabaseSettings::from_url(&self.database_url).map_err(|e| CoreError::configuration(e.to_string()))
    }

    /// Pool tuning derived from the `db_*` settings
    pub fn database_config(&self) -> DatabaseConfig {
        DatabaseConfig::new()
            .max_connections(self.db_max_connections)
            .acquire_timeout(Duration::from_secs(self.db_acquire_timeout_secs))
    }
}
