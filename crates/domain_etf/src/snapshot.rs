//! Per-date composition snapshots
//!
//! A snapshot is the result of the two-phase fetch: the summaries of one fund
//! date in the requested order, plus the holdings of exactly those funds
//! ordered by stock code.

use std::collections::{HashMap, HashSet};

use serde::Serialize;

use core_kernel::EtfCode;

use crate::composition::FundComposition;
use crate::holding::EtfHolding;
use crate::summary::EtfSummary;

/// Summaries and holdings of one fund date
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct CompositionSnapshot {
    /// Summary rows in the order the query asked for
    pub summaries: Vec<EtfSummary>,
    /// Holdings of the summarized funds, ordered by stock code
    pub holdings: Vec<EtfHolding>,
}

impl CompositionSnapshot {
    /// Creates a snapshot from already-ordered rows
    pub fn new(summaries: Vec<EtfSummary>, holdings: Vec<EtfHolding>) -> Self {
        Self { summaries, holdings }
    }

    /// A snapshot with no rows
    pub fn empty() -> Self {
        Self::default()
    }

    /// True when the date had no summary rows
    pub fn is_empty(&self) -> bool {
        self.summaries.is_empty()
    }

    /// Fund codes of the summaries, in summary order, without repeats
    ///
    /// This is the key set the holdings query is filtered by.
    pub fn fund_codes(&self) -> Vec<EtfCode> {
        let mut seen = HashSet::new();
        self.summaries
            .iter()
            .filter(|s| seen.insert(s.etf_code.as_str()))
            .map(|s| s.etf_code.clone())
            .collect()
    }

    /// Drops holdings whose fund code matches no summary
    ///
    /// # Returns
    ///
    /// The number of holdings removed
    pub fn retain_linked_holdings(&mut self) -> usize {
        let codes: HashSet<&str> = self.summaries.iter().map(|s| s.etf_code.as_str()).collect();
        let before = self.holdings.len();
        self.holdings.retain(|h| codes.contains(h.etf_code.as_str()));
        before - self.holdings.len()
    }

    /// Nests each fund's holdings under its summary
    ///
    /// Summary order and per-fund holding order are preserved. Holdings
    /// belonging to no summary are dropped.
    pub fn into_compositions(self) -> Vec<FundComposition> {
        let mut by_fund: HashMap<EtfCode, Vec<EtfHolding>> = HashMap::new();
        for holding in self.holdings {
            by_fund.entry(holding.etf_code.clone()).or_default().push(holding);
        }

        self.summaries
            .into_iter()
            .map(|summary| {
                let holdings = by_fund.get(&summary.etf_code).cloned().unwrap_or_default();
                FundComposition::new(summary, holdings)
            })
            .collect()
    }
}
