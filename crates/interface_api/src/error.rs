//! API error handling

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use thiserror::Error;
use tracing::error;

use domain_etf::EtfError;

/// Message returned when the `date` query parameter is missing or empty
pub const MISSING_DATE_MESSAGE: &str = "Date parameter is required.";

/// Message returned in place of failure details when they are not exposed
pub const GENERIC_INTERNAL_MESSAGE: &str = "Internal server error";

/// API error types
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("Date parameter is required.")]
    MissingDate,

    #[error("{0}")]
    Internal(String),
}

/// Error response body
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
}

impl ApiError {
    /// Logs a service failure and turns it into a 500
    ///
    /// With `expose_details` the client sees the data source's own message,
    /// otherwise a generic one. The log line always carries the full error.
    pub fn from_service(err: EtfError, expose_details: bool) -> Self {
        error!(error = %err, debug = ?err, transient = err.is_transient(), "Failed to load ETF data");

        if expose_details {
            ApiError::Internal(err.detail().to_string())
        } else {
            ApiError::Internal(GENERIC_INTERNAL_MESSAGE.to_string())
        }
    }

    /// HTTP status the error maps to
    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::MissingDate => StatusCode::BAD_REQUEST,
            ApiError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let body = ErrorResponse {
            error: self.to_string(),
        };

        (self.status(), Json(body)).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use core_kernel::PortError;

    #[test]
    fn test_missing_date_message() {
        let err = ApiError::MissingDate;
        assert_eq!(err.status(), StatusCode::BAD_REQUEST);
        assert_eq!(err.to_string(), "Date parameter is required.");
    }

    #[test]
    fn test_service_error_exposed() {
        let err = ApiError::from_service(EtfError::from(PortError::connection("connection refused")), true);
        assert_eq!(err.status(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(err.to_string(), "connection refused");
    }

    #[test]
    fn test_service_error_hidden() {
        let err = ApiError::from_service(EtfError::from(PortError::connection("password authentication failed")), false);
        assert_eq!(err.to_string(), GENERIC_INTERNAL_MESSAGE);
    }
}
