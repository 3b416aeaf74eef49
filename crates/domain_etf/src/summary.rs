//! Fund summary records
//!
//! A summary is a fund's headline position on a fund date: cash component and
//! shares outstanding. Summaries are written by the upstream ingestion job and
//! only ever read here.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use core_kernel::{EtfCode, FundDate};

/// A fund's summary row for one fund date
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EtfSummary {
    /// Surrogate row identifier, when the source has one
    pub id: Option<i64>,
    /// Fund code
    pub etf_code: EtfCode,
    /// Fund name
    pub etf_name: String,
    /// Cash component of the fund
    pub fund_cash_component: Decimal,
    /// Units outstanding
    pub shares_outstanding: Decimal,
    /// As-of key of the snapshot
    pub fund_date: FundDate,
}

impl EtfSummary {
    /// Creates a summary with zero cash and no units outstanding
    ///
    /// # Arguments
    ///
    /// * `etf_code` - Fund code
    /// * `etf_name` - Fund name
    /// * `fund_date` - Snapshot key the summary belongs to
    pub fn new(
        etf_code: impl Into<EtfCode>,
        etf_name: impl Into<String>,
        fund_date: FundDate,
    ) -> Self {
        Self {
            id: None,
            etf_code: etf_code.into(),
            etf_name: etf_name.into(),
            fund_cash_component: Decimal::ZERO,
            shares_outstanding: Decimal::ZERO,
            fund_date,
        }
    }

    /// Sets the surrogate identifier
    pub fn with_id(mut self, id: i64) -> Self {
        self.id = Some(id);
        self
    }

    /// Sets the cash component
    pub fn with_cash_component(mut self, cash: Decimal) -> Self {
        self.fund_cash_component = cash;
        self
    }

    /// Sets the shares outstanding
    pub fn with_shares_outstanding(mut self, shares: Decimal) -> Self {
        self.shares_outstanding = shares;
        self
    }
}
