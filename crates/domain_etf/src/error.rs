//! ETF domain errors

use core_kernel::PortError;
use thiserror::Error;

/// Errors that can occur in the ETF domain
#[derive(Debug, Error)]
pub enum EtfError {
    /// The data source failed; the message is the source's own
    #[error(transparent)]
    DataSource(#[from] PortError),
}

impl EtfError {
    /// Whether retrying the same request could succeed
    pub fn is_transient(&self) -> bool {
        match self {
            EtfError::DataSource(err) => err.is_transient(),
        }
    }

    /// The failure message as the data source reported it
    pub fn detail(&self) -> &str {
        match self {
            EtfError::DataSource(err) => err.detail(),
        }
    }
}
