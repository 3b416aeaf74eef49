//! Domain Adapters
//!
//! This module provides adapter implementations for domain ports,
//! connecting domain interfaces to the PostgreSQL database layer.
//!
//! # Usage
//!
//! ```rust,ignore
//! use infra_db::adapters::PostgresEtfAdapter;
//! use domain_etf::{EtfCompositionPort, SnapshotQuery};
//!
//! let adapter = PostgresEtfAdapter::new(pool);
//! let snapshot = adapter.load_snapshot(&query).await?;
//! ```

pub mod etf;

pub use etf::PostgresEtfAdapter;
