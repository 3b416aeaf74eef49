//! Fund date keys
//!
//! Snapshots are stored under a compact `YYYYMMDD` string rather than a SQL
//! date. Callers send `YYYY-MM-DD`; the key is obtained by stripping hyphens.
//! No other validation happens here: a malformed date still produces a key,
//! it just matches no rows.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Format of the stored key
pub const FUND_DATE_FORMAT: &str = "%Y%m%d";

/// The as-of date key of a fund snapshot, in compact `YYYYMMDD` form
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FundDate(String);

impl FundDate {
    /// Normalizes a request date (`YYYY-MM-DD`) into the stored key
    ///
    /// # Example
    ///
    /// ```rust
    /// use core_kernel::FundDate;
    ///
    /// let date = FundDate::from_query("2024-01-15");
    /// assert_eq!(date.as_key(), "20240115");
    /// ```
    pub fn from_query(raw: &str) -> Self {
        Self(raw.replace('-', ""))
    }

    /// Builds a key from a calendar date
    pub fn from_naive_date(date: NaiveDate) -> Self {
        Self(date.format(FUND_DATE_FORMAT).to_string())
    }

    /// Returns the key as bound into queries
    pub fn as_key(&self) -> &str {
        &self.0
    }

    /// Parses the key back into a calendar date, if it is one
    pub fn to_naive_date(&self) -> Option<NaiveDate> {
        if self.0.len() != 8 {
            return None;
        }
        NaiveDate::parse_from_str(&self.0, FUND_DATE_FORMAT).ok()
    }

    /// Whether the key names a real calendar date
    pub fn is_calendar_date(&self) -> bool {
        self.to_naive_date().is_some()
    }
}

impl fmt::Display for FundDate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<NaiveDate> for FundDate {
    fn from(date: NaiveDate) -> Self {
        Self::from_naive_date(date)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_strips_hyphens() {
        assert_eq!(FundDate::from_query("2024-01-15").as_key(), "20240115");
    }

    #[test]
    fn test_compact_input_is_unchanged() {
        assert_eq!(FundDate::from_query("20240115").as_key(), "20240115");
    }

    #[test]
    fn test_malformed_input_passes_through() {
        let date = FundDate::from_query("not-a-date");
        assert_eq!(date.as_key(), "notadate");
        assert!(!date.is_calendar_date());
    }

    #[test]
    fn test_from_naive_date() {
        let date = FundDate::from(NaiveDate::from_ymd_opt(2023, 7, 4).unwrap());
        assert_eq!(date.as_key(), "20230704");
        assert!(date.is_calendar_date());
    }

    #[test]
    fn test_invalid_calendar_day() {
        assert!(!FundDate::from_query("2024-02-30").is_calendar_date());
    }
}
