//! ETF Composition Domain
//!
//! This crate models the per-date composition of exchange-traded funds and
//! the read-side services the HTTP layer exposes.
//!
//! # Key Concepts
//!
//! - **Summary**: one fund's headline figures for a fund date
//! - **Holding**: one constituent stock position of a fund
//! - **Snapshot**: the summaries of a date plus every holding of those funds
//! - **Composition**: a summary with its own holdings nested under it
//!
//! # Two-phase fetch
//!
//! Holdings carry no date. A snapshot is built by selecting the summaries of
//! a date first, collecting their fund codes, then selecting the holdings
//! whose fund code is among them. Every holding of a snapshot therefore
//! belongs to one of its summaries.

pub mod summary;
pub mod holding;
pub mod snapshot;
pub mod composition;
pub mod ports;
pub mod services;
pub mod error;

pub use summary::EtfSummary;
pub use holding::EtfHolding;
pub use snapshot::CompositionSnapshot;
pub use composition::FundComposition;
pub use ports::{EtfCompositionPort, SnapshotQuery, SummaryOrder};
pub use services::EtfQueryService;
pub use error::EtfError;
