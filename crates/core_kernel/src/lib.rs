//! Core Kernel - Foundational types for the ETF composition service
//!
//! This crate provides the building blocks shared by every layer:
//! - `FundDate`, the compact `YYYYMMDD` key snapshots are stored under
//! - Strongly-typed fund and stock codes
//! - Port abstractions used to plug data sources into the domain

pub mod fund_date;
pub mod identifiers;
pub mod ports;
pub mod error;

pub use fund_date::FundDate;
pub use identifiers::{EtfCode, StockCode};
pub use ports::{PortError, DomainPort, HealthCheckable, HealthCheckResult, AdapterHealth};
pub use error::CoreError;
