//! ETF Domain Ports
//!
//! This module defines the port the ETF domain needs from its data source.
//!
//! # Architecture
//!
//! - **Postgres Adapter**: reads `ETFSummary` / `ETFDetail` (infra_db)
//! - **In-memory Adapter**: fixed rows for tests (test_utils)
//!
//! # Usage
//!
//! ```rust,ignore
//! use domain_etf::{EtfCompositionPort, SnapshotQuery};
//! use core_kernel::FundDate;
//!
//! let query = SnapshotQuery::by_etf_code(FundDate::from_query("2024-01-15"));
//! let snapshot = port.load_snapshot(&query).await?;
//! ```

use async_trait::async_trait;

use core_kernel::{DomainPort, FundDate, HealthCheckable, PortError};

use crate::snapshot::CompositionSnapshot;

/// Sort key applied to the summary rows of a snapshot
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SummaryOrder {
    /// Ascending fund code
    EtfCode,
    /// Ascending surrogate id
    Id,
}

/// What to load for one request
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SnapshotQuery {
    /// Snapshot key
    pub fund_date: FundDate,
    /// Summary ordering
    pub order: SummaryOrder,
}

impl SnapshotQuery {
    /// Summaries of `fund_date` ordered by fund code
    pub fn by_etf_code(fund_date: FundDate) -> Self {
        Self { fund_date, order: SummaryOrder::EtfCode }
    }

    /// Summaries of `fund_date` ordered by surrogate id
    pub fn by_id(fund_date: FundDate) -> Self {
        Self { fund_date, order: SummaryOrder::Id }
    }
}

/// Read access to per-date fund compositions
///
/// Implementations run the two-phase fetch:
///
/// 1. Select the summaries whose fund date equals `query.fund_date`, ordered
///    by `query.order`.
/// 2. If any were found, select the holdings whose fund code is among their
///    codes, ordered by stock code. Otherwise skip the second query.
///
/// Both phases should share one connection that is released on every exit
/// path.
#[async_trait]
pub trait EtfCompositionPort: DomainPort + HealthCheckable {
    /// Loads the summaries and holdings of one fund date
    async fn load_snapshot(&self, query: &SnapshotQuery) -> Result<CompositionSnapshot, PortError>;
}
