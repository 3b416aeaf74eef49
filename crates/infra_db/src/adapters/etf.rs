//! PostgreSQL ETF Adapter
//!
//! This module provides the database adapter for the ETF domain, implementing
//! `EtfCompositionPort` via the `EtfRepository`.
//!
//! # Overview
//!
//! The `PostgresEtfAdapter` serves as the bridge between the domain layer's
//! port interface and the database layer. It:
//!
//! - Translates snapshot queries into repository calls
//! - Converts database row types back to domain models
//! - Handles error translation between database and port errors

use async_trait::async_trait;
use sqlx::PgPool;
use tracing::{debug, instrument};

use core_kernel::{
    DomainPort, EtfCode, FundDate, HealthCheckResult, HealthCheckable, PortError, StockCode,
};
use domain_etf::{CompositionSnapshot, EtfCompositionPort, EtfHolding, EtfSummary, SnapshotQuery};

use crate::error::DatabaseError;
use crate::repositories::etf::{EtfDetailRow, EtfRepository, EtfSummaryRow};

const ADAPTER_ID: &str = "postgres-etf-adapter";

/// PostgreSQL-backed implementation of the EtfCompositionPort trait
///
/// # Error Handling
///
/// Database errors are translated to `PortError` variants:
/// - connection failures and pool exhaustion -> `PortError::Connection`
/// - column decode failures -> `PortError::Transformation`
/// - everything else -> `PortError::Internal`
#[derive(Debug, Clone)]
pub struct PostgresEtfAdapter {
    repository: EtfRepository,
}

impl PostgresEtfAdapter {
    /// Creates a new PostgreSQL ETF adapter
    ///
    /// # Arguments
    ///
    /// * `pool` - The PostgreSQL connection pool
    pub fn new(pool: PgPool) -> Self {
        Self {
            repository: EtfRepository::new(pool),
        }
    }
}

// Mark as a domain port
impl DomainPort for PostgresEtfAdapter {}

#[async_trait]
impl HealthCheckable for PostgresEtfAdapter {
    /// Checks database connectivity with a `SELECT 1`
    async fn health_check(&self) -> HealthCheckResult {
        let start = std::time::Instant::now();
        let result = self.repository.ping().await;
        let latency_ms = start.elapsed().as_millis() as u64;

        match result {
            Ok(()) => HealthCheckResult::healthy(ADAPTER_ID, latency_ms),
            Err(e) => HealthCheckResult::unhealthy(ADAPTER_ID, latency_ms, format!("Database error: {}", e)),
        }
    }
}

#[async_trait]
impl EtfCompositionPort for PostgresEtfAdapter {
    #[instrument(skip(self), fields(fund_date = %query.fund_date, order = ?query.order))]
    async fn load_snapshot(&self, query: &SnapshotQuery) -> Result<CompositionSnapshot, PortError> {
        let (summary_rows, detail_rows) = self
            .repository
            .load_snapshot_rows(query.fund_date.as_key(), query.order)
            .await
            .map_err(to_port_error)?;

        debug!(
            summaries = summary_rows.len(),
            holdings = detail_rows.len(),
            "Fetched composition rows"
        );

        Ok(CompositionSnapshot::new(
            summary_rows.into_iter().map(summary_from_row).collect(),
            detail_rows.into_iter().map(holding_from_row).collect(),
        ))
    }
}

fn summary_from_row(row: EtfSummaryRow) -> EtfSummary {
    EtfSummary {
        id: row.id,
        etf_code: EtfCode::from(row.etf_code),
        etf_name: row.etf_name,
        fund_cash_component: row.fund_cash_component,
        shares_outstanding: row.shares_outstanding,
        // Stored key, kept verbatim
        fund_date: FundDate::from_query(&row.fund_date),
    }
}

fn holding_from_row(row: EtfDetailRow) -> EtfHolding {
    EtfHolding {
        etf_code: EtfCode::from(row.etf_code),
        stock_code: StockCode::from(row.stock_code),
        stock_name: row.stock_name,
        isin: row.isin,
        exchange: row.exchange,
        currency: row.currency,
        shares_amount: row.shares_amount,
        stock_price: row.stock_price,
    }
}

/// Port messages carry the driver's text only; the database prefix stays on
/// the boxed source.
fn to_port_error(err: DatabaseError) -> PortError {
    let message = err.detail().to_string();
    if err.is_connection_error() {
        return PortError::Connection {
            message,
            source: Some(Box::new(err)),
        };
    }
    match err {
        DatabaseError::Decode(_) => PortError::transformation(message),
        _ => PortError::Internal {
            message,
            source: Some(Box::new(err)),
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_summary_from_row() {
        let summary = summary_from_row(EtfSummaryRow {
            id: Some(4),
            etf_code: "2800".to_string(),
            etf_name: "Tracker Fund".to_string(),
            fund_cash_component: dec!(-120.55),
            shares_outstanding: dec!(9000000),
            fund_date: "20240115".to_string(),
        });

        assert_eq!(summary.etf_code.as_str(), "2800");
        assert_eq!(summary.fund_date.as_key(), "20240115");
        assert_eq!(summary.fund_cash_component, dec!(-120.55));
    }

    #[test]
    fn test_holding_from_row() {
        let holding = holding_from_row(EtfDetailRow {
            etf_code: "2800".to_string(),
            stock_code: "0700".to_string(),
            stock_name: "Tencent".to_string(),
            isin: "KYG875721634".to_string(),
            exchange: "XHKG".to_string(),
            currency: "HKD".to_string(),
            shares_amount: dec!(1200),
            stock_price: dec!(290.4),
        });

        assert_eq!(holding.stock_code.as_str(), "0700");
        assert_eq!(holding.exchange, "XHKG");
    }

    #[test]
    fn test_connection_errors_map_to_connection() {
        let err = to_port_error(DatabaseError::PoolExhausted);
        assert!(matches!(err, PortError::Connection { .. }));
        assert!(err.is_transient());
    }

    #[test]
    fn test_query_errors_map_to_internal() {
        let err = to_port_error(DatabaseError::QueryFailed("relation \"etfsummary\" does not exist".to_string()));
        assert!(matches!(err, PortError::Internal { .. }));
        assert!(err.to_string().contains("does not exist"));
    }

    #[test]
    fn test_port_message_is_not_double_prefixed() {
        let err = to_port_error(DatabaseError::ConnectionFailed("Connection refused (os error 111)".to_string()));

        assert_eq!(err.detail(), "Connection refused (os error 111)");
        assert_eq!(err.to_string(), "Connection error: Connection refused (os error 111)");
    }
}
