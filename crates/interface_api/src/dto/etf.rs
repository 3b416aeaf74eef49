//! ETF DTOs
//!
//! Numeric fields serialize as decimal strings, preserving the scale stored
//! in the database.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use domain_etf::{CompositionSnapshot, EtfHolding, EtfSummary, FundComposition};

/// Query string of the ETF endpoints, kept as raw pairs so a repeated key
/// still parses
#[derive(Debug, Default, Deserialize)]
#[serde(transparent)]
pub struct DateQuery(pub Vec<(String, String)>);

impl DateQuery {
    /// The first `date` value, if any
    pub fn date(&self) -> Option<&str> {
        self.0
            .iter()
            .find(|(key, _)| key == "date")
            .map(|(_, value)| value.as_str())
    }
}

/// A holding nested under its fund
#[derive(Debug, Serialize)]
pub struct StockResponse {
    pub stock_code: String,
    pub stock_name: String,
    pub isin: String,
    pub exchange: String,
    pub currency: String,
    pub shares_amount: Decimal,
    pub stock_price: Decimal,
}

/// A fund with its holdings, as returned by `/api/etf_data`
#[derive(Debug, Serialize)]
pub struct EtfWithStocksResponse {
    pub etf_code: String,
    pub etf_name: String,
    pub fund_cash_component: Decimal,
    pub shares_outstanding: Decimal,
    pub fund_date: String,
    pub stocks: Vec<StockResponse>,
}

/// Summary row including the surrogate id
#[derive(Debug, Serialize)]
pub struct SolactiveEtfResponse {
    pub id: Option<i64>,
    pub etf_code: String,
    pub etf_name: String,
    pub fund_cash_component: Decimal,
    pub shares_outstanding: Decimal,
    pub fund_date: String,
}

/// Summary row without the surrogate id
#[derive(Debug, Serialize)]
pub struct SpEtfResponse {
    pub etf_code: String,
    pub etf_name: String,
    pub fund_cash_component: Decimal,
    pub shares_outstanding: Decimal,
    pub fund_date: String,
}

/// A holding in the flat list, carrying its fund code
#[derive(Debug, Serialize)]
pub struct StockDetailResponse {
    pub etf_code: String,
    pub stock_code: String,
    pub stock_name: String,
    pub isin: String,
    pub exchange: String,
    pub currency: String,
    pub shares_amount: Decimal,
    pub stock_price: Decimal,
}

/// Two parallel lists correlated by `etf_code`
#[derive(Debug, Serialize)]
pub struct EtfDetailsResponse<T> {
    pub etf_details: Vec<T>,
    pub stock_details: Vec<StockDetailResponse>,
}

impl From<EtfHolding> for StockResponse {
    fn from(h: EtfHolding) -> Self {
        Self {
            stock_code: h.stock_code.into_inner(),
            stock_name: h.stock_name,
            isin: h.isin,
            exchange: h.exchange,
            currency: h.currency,
            shares_amount: h.shares_amount,
            stock_price: h.stock_price,
        }
    }
}

impl From<FundComposition> for EtfWithStocksResponse {
    fn from(c: FundComposition) -> Self {
        let s = c.summary;
        Self {
            etf_code: s.etf_code.into_inner(),
            etf_name: s.etf_name,
            fund_cash_component: s.fund_cash_component,
            shares_outstanding: s.shares_outstanding,
            fund_date: s.fund_date.to_string(),
            stocks: c.holdings.into_iter().map(StockResponse::from).collect(),
        }
    }
}

impl From<EtfSummary> for SolactiveEtfResponse {
    fn from(s: EtfSummary) -> Self {
        Self {
            id: s.id,
            etf_code: s.etf_code.into_inner(),
            etf_name: s.etf_name,
            fund_cash_component: s.fund_cash_component,
            shares_outstanding: s.shares_outstanding,
            fund_date: s.fund_date.to_string(),
        }
    }
}

impl From<EtfSummary> for SpEtfResponse {
    fn from(s: EtfSummary) -> Self {
        Self {
            etf_code: s.etf_code.into_inner(),
            etf_name: s.etf_name,
            fund_cash_component: s.fund_cash_component,
            shares_outstanding: s.shares_outstanding,
            fund_date: s.fund_date.to_string(),
        }
    }
}

impl From<EtfHolding> for StockDetailResponse {
    fn from(h: EtfHolding) -> Self {
        Self {
            etf_code: h.etf_code.into_inner(),
            stock_code: h.stock_code.into_inner(),
            stock_name: h.stock_name,
            isin: h.isin,
            exchange: h.exchange,
            currency: h.currency,
            shares_amount: h.shares_amount,
            stock_price: h.stock_price,
        }
    }
}

impl<T: From<EtfSummary>> From<CompositionSnapshot> for EtfDetailsResponse<T> {
    fn from(snapshot: CompositionSnapshot) -> Self {
        Self {
            etf_details: snapshot.summaries.into_iter().map(T::from).collect(),
            stock_details: snapshot.holdings.into_iter().map(StockDetailResponse::from).collect(),
        }
    }
}
