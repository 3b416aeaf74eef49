//! A fund together with its holdings

use serde::Serialize;

use crate::holding::EtfHolding;
use crate::summary::EtfSummary;

/// A summary with its own holdings nested under it
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FundComposition {
    /// The fund's summary row
    pub summary: EtfSummary,
    /// The fund's holdings, ordered by stock code
    pub holdings: Vec<EtfHolding>,
}

impl FundComposition {
    pub fn new(summary: EtfSummary, holdings: Vec<EtfHolding>) -> Self {
        Self { summary, holdings }
    }
}
