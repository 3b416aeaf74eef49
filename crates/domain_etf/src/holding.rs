//! Constituent holdings

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use core_kernel::{EtfCode, StockCode};

/// One stock position inside a fund
///
/// Holdings are keyed to a fund only by `etf_code`; they carry no date of
/// their own.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EtfHolding {
    /// Owning fund
    pub etf_code: EtfCode,
    /// Constituent stock code
    pub stock_code: StockCode,
    /// Constituent name
    pub stock_name: String,
    /// ISIN of the constituent
    pub isin: String,
    /// Listing exchange
    pub exchange: String,
    /// Trading currency
    pub currency: String,
    /// Number of shares held
    pub shares_amount: Decimal,
    /// Price per share
    pub stock_price: Decimal,
}

impl EtfHolding {
    /// Creates a holding with empty listing data and a zero position
    pub fn new(
        etf_code: impl Into<EtfCode>,
        stock_code: impl Into<StockCode>,
        stock_name: impl Into<String>,
    ) -> Self {
        Self {
            etf_code: etf_code.into(),
            stock_code: stock_code.into(),
            stock_name: stock_name.into(),
            isin: String::new(),
            exchange: String::new(),
            currency: String::new(),
            shares_amount: Decimal::ZERO,
            stock_price: Decimal::ZERO,
        }
    }

    /// Sets ISIN, exchange and currency
    pub fn with_listing(
        mut self,
        isin: impl Into<String>,
        exchange: impl Into<String>,
        currency: impl Into<String>,
    ) -> Self {
        self.isin = isin.into();
        self.exchange = exchange.into();
        self.currency = currency.into();
        self
    }

    /// Sets share count and price
    pub fn with_position(mut self, shares_amount: Decimal, stock_price: Decimal) -> Self {
        self.shares_amount = shares_amount;
        self.stock_price = stock_price;
        self
    }
}
