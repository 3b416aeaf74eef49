//! ETF composition repository
//!
//! This module owns the SQL against the upstream `ETFSummary` and `ETFDetail`
//! tables. Both are written by the ingestion job; nothing here mutates them.
//!
//! Numeric columns are cast to `NUMERIC` and `fund_date` to `TEXT` so the
//! queries decode the same whether upstream stores those columns as numbers,
//! strings or decimals.

use rust_decimal::Decimal;
use sqlx::{PgConnection, PgPool};
use tracing::debug;

use domain_etf::SummaryOrder;

use crate::error::DatabaseError;

const SUMMARIES_BY_ETF_CODE: &str = r#"
    SELECT
        etf_code,
        etf_name,
        fund_cash_component::NUMERIC AS fund_cash_component,
        shares_outstanding::NUMERIC AS shares_outstanding,
        fund_date::TEXT AS fund_date
    FROM ETFSummary
    WHERE fund_date::TEXT = $1
    ORDER BY etf_code
"#;

const SUMMARIES_BY_ID: &str = r#"
    SELECT
        id::BIGINT AS id,
        etf_code,
        etf_name,
        fund_cash_component::NUMERIC AS fund_cash_component,
        shares_outstanding::NUMERIC AS shares_outstanding,
        fund_date::TEXT AS fund_date
    FROM ETFSummary
    WHERE fund_date::TEXT = $1
    ORDER BY id
"#;

const DETAILS_BY_ETF_CODES: &str = r#"
    SELECT
        etf_code,
        stock_code,
        stock_name,
        isin,
        exchange,
        currency,
        shares_amount::NUMERIC AS shares_amount,
        stock_price::NUMERIC AS stock_price
    FROM ETFDetail
    WHERE etf_code = ANY($1)
    ORDER BY stock_code, etf_code
"#;

/// Repository for the per-date ETF composition tables
#[derive(Debug, Clone)]
pub struct EtfRepository {
    pool: PgPool,
}

impl EtfRepository {
    /// Creates a new EtfRepository with the given connection pool
    ///
    /// # Arguments
    ///
    /// * `pool` - The PostgreSQL connection pool
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Runs the two-phase fetch for one fund date on a single connection
    ///
    /// The holdings query is skipped when no summaries match. The connection
    /// returns to the pool when this function returns, on success or error.
    ///
    /// # Arguments
    ///
    /// * `fund_date` - Compact `YYYYMMDD` key
    /// * `order` - Summary ordering
    pub async fn load_snapshot_rows(
        &self,
        fund_date: &str,
        order: SummaryOrder,
    ) -> Result<(Vec<EtfSummaryRow>, Vec<EtfDetailRow>), DatabaseError> {
        let mut conn = self.pool.acquire().await?;

        let summaries = Self::summaries_for_date(&mut *conn, fund_date, order).await?;

        let mut codes: Vec<String> = Vec::with_capacity(summaries.len());
        for row in &summaries {
            if !codes.contains(&row.etf_code) {
                codes.push(row.etf_code.clone());
            }
        }

        if codes.is_empty() {
            debug!(fund_date, "No summaries for date, skipping holdings query");
            return Ok((summaries, Vec::new()));
        }

        let details = Self::details_for_codes(&mut *conn, &codes).await?;
        Ok((summaries, details))
    }

    /// Retrieves the summaries of one fund date
    ///
    /// # Arguments
    ///
    /// * `conn` - Connection to run on
    /// * `fund_date` - Compact `YYYYMMDD` key
    /// * `order` - Summary ordering
    pub async fn summaries_for_date(
        conn: &mut PgConnection,
        fund_date: &str,
        order: SummaryOrder,
    ) -> Result<Vec<EtfSummaryRow>, DatabaseError> {
        let sql = match order {
            SummaryOrder::EtfCode => SUMMARIES_BY_ETF_CODE,
            SummaryOrder::Id => SUMMARIES_BY_ID,
        };

        let rows = sqlx::query_as::<_, EtfSummaryRow>(sql)
            .bind(fund_date)
            .fetch_all(&mut *conn)
            .await?;

        Ok(rows)
    }

    /// Retrieves every holding of the given funds, ordered by stock code
    ///
    /// # Arguments
    ///
    /// * `conn` - Connection to run on
    /// * `etf_codes` - Fund codes to filter by
    pub async fn details_for_codes(
        conn: &mut PgConnection,
        etf_codes: &[String],
    ) -> Result<Vec<EtfDetailRow>, DatabaseError> {
        let rows = sqlx::query_as::<_, EtfDetailRow>(DETAILS_BY_ETF_CODES)
            .bind(etf_codes)
            .fetch_all(&mut *conn)
            .await?;

        Ok(rows)
    }

    /// Runs `SELECT 1` to prove the database answers
    pub async fn ping(&self) -> Result<(), DatabaseError> {
        sqlx::query_scalar::<_, i32>("SELECT 1")
            .fetch_one(&self.pool)
            .await?;
        Ok(())
    }
}

/// Database row for `ETFSummary`
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct EtfSummaryRow {
    /// Only selected when ordering by id
    #[sqlx(default)]
    pub id: Option<i64>,
    pub etf_code: String,
    pub etf_name: String,
    pub fund_cash_component: Decimal,
    pub shares_outstanding: Decimal,
    pub fund_date: String,
}

/// Database row for `ETFDetail`
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct EtfDetailRow {
    pub etf_code: String,
    pub stock_code: String,
    pub stock_name: String,
    pub isin: String,
    pub exchange: String,
    pub currency: String,
    pub shares_amount: Decimal,
    pub stock_price: Decimal,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_only_id_ordering_selects_id() {
        assert!(!SUMMARIES_BY_ETF_CODE.contains("id::BIGINT"));
        assert!(SUMMARIES_BY_ID.contains("id::BIGINT AS id"));
        assert!(SUMMARIES_BY_ID.trim_end().ends_with("ORDER BY id"));
    }
}
