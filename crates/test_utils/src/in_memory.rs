//! In-memory port implementations
//!
//! `InMemoryEtfStore` answers snapshot queries from vectors using the same
//! filtering, ordering and skip rules as the SQL. `FailingEtfStore` fails
//! every call, standing in for an unreachable database.

use std::cmp::Ordering;
use std::sync::Mutex;

use async_trait::async_trait;

use core_kernel::{DomainPort, HealthCheckResult, HealthCheckable, PortError};
use domain_etf::{
    CompositionSnapshot, EtfCompositionPort, EtfHolding, EtfSummary, SnapshotQuery, SummaryOrder,
};

/// Port backed by fixed rows
#[derive(Debug, Default)]
pub struct InMemoryEtfStore {
    summaries: Vec<EtfSummary>,
    holdings: Vec<EtfHolding>,
    log: Mutex<QueryLog>,
}

/// What an `InMemoryEtfStore` was asked
#[derive(Debug, Clone, Default)]
pub struct QueryLog {
    /// Every snapshot query, in arrival order
    pub snapshot_queries: Vec<SnapshotQuery>,
    /// How many times the holdings phase ran
    pub holdings_queries: usize,
}

impl InMemoryEtfStore {
    /// Creates a store over the given rows
    pub fn new(summaries: Vec<EtfSummary>, holdings: Vec<EtfHolding>) -> Self {
        Self {
            summaries,
            holdings,
            log: Mutex::new(QueryLog::default()),
        }
    }

    /// A store with no rows at all
    pub fn empty() -> Self {
        Self::default()
    }

    /// Snapshot of the query log
    pub fn log(&self) -> QueryLog {
        self.log.lock().map(|log| log.clone()).unwrap_or_default()
    }

    fn select_summaries(&self, query: &SnapshotQuery) -> Vec<EtfSummary> {
        let mut rows: Vec<EtfSummary> = self
            .summaries
            .iter()
            .filter(|s| s.fund_date == query.fund_date)
            .cloned()
            .collect();

        match query.order {
            SummaryOrder::EtfCode => rows.sort_by(|a, b| a.etf_code.cmp(&b.etf_code)),
            // Postgres sorts NULL ids last
            SummaryOrder::Id => rows.sort_by(|a, b| match (a.id, b.id) {
                (Some(x), Some(y)) => x.cmp(&y),
                (Some(_), None) => Ordering::Less,
                (None, Some(_)) => Ordering::Greater,
                (None, None) => Ordering::Equal,
            }),
        }
        rows
    }

    fn select_holdings(&self, summaries: &[EtfSummary]) -> Vec<EtfHolding> {
        let mut rows: Vec<EtfHolding> = self
            .holdings
            .iter()
            .filter(|h| summaries.iter().any(|s| s.etf_code == h.etf_code))
            .cloned()
            .collect();
        rows.sort_by(|a, b| {
            a.stock_code
                .cmp(&b.stock_code)
                .then_with(|| a.etf_code.cmp(&b.etf_code))
        });
        rows
    }
}

impl DomainPort for InMemoryEtfStore {}

#[async_trait]
impl HealthCheckable for InMemoryEtfStore {
    async fn health_check(&self) -> HealthCheckResult {
        HealthCheckResult::healthy("in-memory-etf-store", 0)
    }
}

#[async_trait]
impl EtfCompositionPort for InMemoryEtfStore {
    async fn load_snapshot(&self, query: &SnapshotQuery) -> Result<CompositionSnapshot, PortError> {
        let summaries = self.select_summaries(query);
        let holdings = if summaries.is_empty() {
            Vec::new()
        } else {
            self.select_holdings(&summaries)
        };

        let mut log = self
            .log
            .lock()
            .map_err(|_| PortError::internal("query log poisoned"))?;
        log.snapshot_queries.push(query.clone());
        if !summaries.is_empty() {
            log.holdings_queries += 1;
        }

        Ok(CompositionSnapshot::new(summaries, holdings))
    }
}

/// Port whose every call fails with a connection error
#[derive(Debug, Clone)]
pub struct FailingEtfStore {
    message: String,
}

impl FailingEtfStore {
    /// Creates a store failing with the given message
    pub fn new(message: impl Into<String>) -> Self {
        Self { message: message.into() }
    }

    /// Message the failures carry
    pub fn message(&self) -> &str {
        &self.message
    }
}

impl Default for FailingEtfStore {
    fn default() -> Self {
        Self::new("connection to server at \"localhost\" (127.0.0.1), port 5432 failed: Connection refused")
    }
}

impl DomainPort for FailingEtfStore {}

#[async_trait]
impl HealthCheckable for FailingEtfStore {
    async fn health_check(&self) -> HealthCheckResult {
        HealthCheckResult::unhealthy("failing-etf-store", 0, self.message.clone())
    }
}

#[async_trait]
impl EtfCompositionPort for FailingEtfStore {
    async fn load_snapshot(&self, _query: &SnapshotQuery) -> Result<CompositionSnapshot, PortError> {
        Err(PortError::connection(self.message.clone()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fixtures::{DateFixtures, EtfFixtures};

    #[tokio::test]
    async fn test_orders_by_id() {
        let store = EtfFixtures::store();
        let snapshot = store
            .load_snapshot(&SnapshotQuery::by_id(DateFixtures::fund_date()))
            .await
            .unwrap();

        let codes: Vec<&str> = snapshot.summaries.iter().map(|s| s.etf_code.as_str()).collect();
        assert_eq!(codes, vec!["3033", "2800", "2828"]);
    }

    #[tokio::test]
    async fn test_skips_holdings_phase_without_summaries() {
        let store = EtfFixtures::store();
        let snapshot = store
            .load_snapshot(&SnapshotQuery::by_etf_code(core_kernel::FundDate::from_query(
                DateFixtures::EMPTY_QUERY_DATE,
            )))
            .await
            .unwrap();

        assert!(snapshot.is_empty());
        assert!(snapshot.holdings.is_empty());
        assert_eq!(store.log().holdings_queries, 0);
        assert_eq!(store.log().snapshot_queries.len(), 1);
    }

    #[tokio::test]
    async fn test_unlinked_fund_holdings_never_returned() {
        let store = EtfFixtures::store();
        let snapshot = store
            .load_snapshot(&SnapshotQuery::by_etf_code(DateFixtures::fund_date()))
            .await
            .unwrap();

        assert!(snapshot.holdings.iter().all(|h| h.etf_code.as_str() != "7500"));
        assert_eq!(snapshot.holdings.len(), 8);
    }

    #[tokio::test]
    async fn test_failing_store() {
        let store = FailingEtfStore::new("boom");
        let err = store
            .load_snapshot(&SnapshotQuery::by_etf_code(DateFixtures::fund_date()))
            .await
            .unwrap_err();

        assert!(err.is_transient());
        assert!(!store.health_check().await.is_operational());
    }
}
