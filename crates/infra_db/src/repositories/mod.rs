//! Repository implementations
//!
//! Repositories encapsulate SQL queries and the row types they decode into.
//! Mapping rows to domain types is left to the adapters.

pub mod etf;

pub use etf::{EtfRepository, EtfSummaryRow, EtfDetailRow};
