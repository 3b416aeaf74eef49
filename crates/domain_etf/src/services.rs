//! ETF query services
//!
//! This module holds the read operations behind the HTTP endpoints. Each one
//! loads a snapshot through the [`EtfCompositionPort`] and shapes it the way
//! its endpoint returns it.

use std::sync::Arc;

use tracing::{debug, info, warn};

use core_kernel::{FundDate, HealthCheckResult};

use crate::composition::FundComposition;
use crate::error::EtfError;
use crate::ports::{EtfCompositionPort, SnapshotQuery};
use crate::snapshot::CompositionSnapshot;

/// Service answering per-date composition queries
///
/// The service is cheap to clone; clones share the same port.
#[derive(Clone)]
pub struct EtfQueryService {
    port: Arc<dyn EtfCompositionPort>,
}

impl EtfQueryService {
    /// Creates a service over the given data source
    pub fn new(port: Arc<dyn EtfCompositionPort>) -> Self {
        Self { port }
    }

    /// Every fund of the date with its holdings nested under it
    ///
    /// Funds are ordered by fund code, each fund's holdings by stock code.
    /// A date without summaries yields an empty list.
    ///
    /// # Errors
    ///
    /// Returns `EtfError::DataSource` if the snapshot cannot be loaded
    pub async fn compositions_by_fund(&self, date: &FundDate) -> Result<Vec<FundComposition>, EtfError> {
        let snapshot = self.load(SnapshotQuery::by_etf_code(date.clone())).await?;
        Ok(snapshot.into_compositions())
    }

    /// Summaries ordered by surrogate id plus the flat holding list
    ///
    /// # Errors
    ///
    /// Returns `EtfError::DataSource` if the snapshot cannot be loaded
    pub async fn solactive_details(&self, date: &FundDate) -> Result<CompositionSnapshot, EtfError> {
        self.load(SnapshotQuery::by_id(date.clone())).await
    }

    /// Summaries ordered by fund code plus the flat holding list
    ///
    /// Returns an empty snapshot as soon as the date turns out to have no
    /// summaries.
    ///
    /// # Errors
    ///
    /// Returns `EtfError::DataSource` if the snapshot cannot be loaded
    pub async fn sp_details(&self, date: &FundDate) -> Result<CompositionSnapshot, EtfError> {
        let snapshot = self.load(SnapshotQuery::by_etf_code(date.clone())).await?;
        if snapshot.is_empty() {
            info!(fund_date = %date, "No data found for date");
            return Ok(CompositionSnapshot::empty());
        }
        Ok(snapshot)
    }

    /// Reports whether the data source is reachable
    pub async fn health(&self) -> HealthCheckResult {
        self.port.health_check().await
    }

    async fn load(&self, query: SnapshotQuery) -> Result<CompositionSnapshot, EtfError> {
        if !query.fund_date.is_calendar_date() {
            debug!(fund_date = %query.fund_date, "Fund date key is not a calendar date");
        }

        let mut snapshot = self.port.load_snapshot(&query).await?;

        let orphans = snapshot.retain_linked_holdings();
        if orphans > 0 {
            warn!(fund_date = %query.fund_date, orphans, "Dropped holdings without a matching summary");
        }

        debug!(
            fund_date = %query.fund_date,
            order = ?query.order,
            summaries = snapshot.summaries.len(),
            holdings = snapshot.holdings.len(),
            "Loaded composition snapshot"
        );
        Ok(snapshot)
    }
}

impl std::fmt::Debug for EtfQueryService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EtfQueryService").finish_non_exhaustive()
    }
}
