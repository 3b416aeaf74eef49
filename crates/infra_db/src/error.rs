//! Database error types
//!
//! This module defines the error types that can occur during database operations,
//! classifying SQLx failures so callers can tell an unreachable database from a
//! bad query.

use thiserror::Error;

/// Message of `sqlx::Error::PoolTimedOut`
const POOL_TIMED_OUT: &str = "pool timed out while waiting for an open connection";

/// Errors that can occur during database operations
#[derive(Debug, Error)]
pub enum DatabaseError {
    /// The connection string could not be parsed
    #[error("Invalid connection string: {0}")]
    InvalidConnectionString(String),

    /// Failed to establish a database connection
    #[error("Failed to connect to database: {0}")]
    ConnectionFailed(String),

    /// Query execution failed
    #[error("Query failed: {0}")]
    QueryFailed(String),

    /// A column could not be decoded into its Rust type
    #[error("Failed to decode column: {0}")]
    Decode(String),

    /// Pool exhaustion - no available connections
    #[error("Connection pool exhausted")]
    PoolExhausted,
}

impl DatabaseError {
    /// The underlying driver or server message, without this type's prefix
    ///
    /// # Example
    ///
    /// ```rust
    /// use infra_db::DatabaseError;
    ///
    /// let error = DatabaseError::QueryFailed("relation \"etfsummary\" does not exist".to_string());
    /// assert_eq!(error.detail(), "relation \"etfsummary\" does not exist");
    /// ```
    pub fn detail(&self) -> &str {
        match self {
            DatabaseError::InvalidConnectionString(msg)
            | DatabaseError::ConnectionFailed(msg)
            | DatabaseError::QueryFailed(msg)
            | DatabaseError::Decode(msg) => msg,
            DatabaseError::PoolExhausted => POOL_TIMED_OUT,
        }
    }

    /// Checks if this error is a connection-related issue
    pub fn is_connection_error(&self) -> bool {
        matches!(
            self,
            DatabaseError::ConnectionFailed(_) | DatabaseError::PoolExhausted
        )
    }
}

/// Maps SQLx errors to the matching DatabaseError variant
impl From<sqlx::Error> for DatabaseError {
    fn from(error: sqlx::Error) -> Self {
        match error {
            sqlx::Error::PoolTimedOut => DatabaseError::PoolExhausted,
            sqlx::Error::Io(_)
            | sqlx::Error::Tls(_)
            | sqlx::Error::PoolClosed
            | sqlx::Error::WorkerCrashed
            | sqlx::Error::Configuration(_) => DatabaseError::ConnectionFailed(error.to_string()),
            sqlx::Error::Database(db_err) => {
                // 08xxx connection exceptions, 28xxx authorization failures, 3D000 unknown database
                // https://www.postgresql.org/docs/current/errcodes-appendix.html
                let message = db_err.message().to_string();
                match db_err.code().as_deref() {
                    Some(code) if code.starts_with("08") || code.starts_with("28") || code == "3D000" => {
                        DatabaseError::ConnectionFailed(message)
                    }
                    _ => DatabaseError::QueryFailed(message),
                }
            }
            sqlx::Error::ColumnDecode { .. } | sqlx::Error::Decode(_) | sqlx::Error::ColumnNotFound(_) => {
                DatabaseError::Decode(error.to_string())
            }
            _ => DatabaseError::QueryFailed(error.to_string()),
        }
    }
}
