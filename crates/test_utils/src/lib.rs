//! Test Utilities Crate
//!
//! Provides shared test infrastructure, fixtures, and helpers for the
//! ETF composition test suite.
//!
//! # Modules
//!
//! - `fixtures`: Pre-built summaries and holdings for a known fund date
//! - `in_memory`: Port implementations backed by vectors, plus a failing one
//! - `database`: PostgreSQL test container management and seeding
//! - `assertions`: Assertion helpers for JSON response bodies
//! - `generators`: Property-based test data generators

pub mod fixtures;
pub mod in_memory;
pub mod database;
pub mod assertions;
pub mod generators;

pub use fixtures::*;
pub use in_memory::*;
pub use database::*;
pub use assertions::*;
pub use generators::*;
