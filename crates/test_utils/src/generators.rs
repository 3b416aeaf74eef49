//! Property-Based Test Generators
//!
//! Provides proptest strategies for fund dates, codes and composition rows,
//! plus `fake`-backed helpers for one-off rows with realistic names.

use chrono::{Duration, NaiveDate};
use fake::faker::company::en::CompanyName;
use fake::Fake;
use proptest::prelude::*;
use rust_decimal::Decimal;

use core_kernel::FundDate;
use domain_etf::{EtfHolding, EtfSummary};

/// Strategy for calendar dates in 2020..2030
pub fn naive_date_strategy() -> impl Strategy<Value = NaiveDate> {
    (0i64..3650i64).prop_map(|days| {
        NaiveDate::from_ymd_opt(2020, 1, 1).unwrap_or_default() + Duration::days(days)
    })
}

/// Strategy for `date` query values in either `YYYY-MM-DD` or `YYYYMMDD` form
pub fn query_date_strategy() -> impl Strategy<Value = String> {
    (naive_date_strategy(), any::<bool>()).prop_map(|(date, dashed)| {
        if dashed {
            date.format("%Y-%m-%d").to_string()
        } else {
            date.format("%Y%m%d").to_string()
        }
    })
}

/// Strategy for fund date keys
pub fn fund_date_strategy() -> impl Strategy<Value = FundDate> {
    naive_date_strategy().prop_map(FundDate::from)
}

/// Strategy for four digit exchange codes
pub fn code_strategy() -> impl Strategy<Value = String> {
    "[0-9]{4}"
}

/// Strategy for non-negative amounts with up to four decimal places
pub fn amount_strategy() -> impl Strategy<Value = Decimal> {
    (0i64..10_000_000_000i64, 0u32..=4u32).prop_map(|(m, s)| Decimal::new(m, s))
}

/// Strategy for fund cash components, which may be negative
pub fn cash_component_strategy() -> impl Strategy<Value = Decimal> {
    (-100_000_000i64..100_000_000i64).prop_map(|m| Decimal::new(m, 2))
}

/// Strategy for summaries on the given date
pub fn summary_strategy(fund_date: FundDate) -> impl Strategy<Value = EtfSummary> {
    (
        code_strategy(),
        "[A-Z][a-z]{3,12} ETF",
        cash_component_strategy(),
        amount_strategy(),
        1i64..100_000i64,
    )
        .prop_map(move |(code, name, cash, shares, id)| {
            EtfSummary::new(code, name, fund_date.clone())
                .with_id(id)
                .with_cash_component(cash)
                .with_shares_outstanding(shares)
        })
}

/// Strategy for holdings of one of the given funds
pub fn holding_strategy(etf_codes: Vec<String>) -> impl Strategy<Value = EtfHolding> {
    (
        proptest::sample::select(etf_codes),
        code_strategy(),
        amount_strategy(),
        amount_strategy(),
    )
        .prop_map(|(etf_code, stock_code, shares, price)| {
            EtfHolding::new(etf_code, stock_code.clone(), format!("Stock {}", stock_code))
                .with_listing(format!("HK{:0>10}", stock_code), "XHKG", "HKD")
                .with_position(shares, price)
        })
}

/// Generates a summary with a realistic fund name
pub fn fake_summary(etf_code: &str, fund_date: FundDate) -> EtfSummary {
    let sponsor: String = CompanyName().fake();
    EtfSummary::new(etf_code, format!("{} Index ETF", sponsor), fund_date)
        .with_shares_outstanding(Decimal::from((1_000_000u32..500_000_000u32).fake::<u32>()))
}

/// Generates a holding with a realistic issuer name
pub fn fake_holding(etf_code: &str, stock_code: &str) -> EtfHolding {
    let issuer: String = CompanyName().fake();
    EtfHolding::new(etf_code, stock_code, issuer)
        .with_listing(format!("HK{:0>10}", stock_code), "XHKG", "HKD")
        .with_position(
            Decimal::from((100u32..5_000_000u32).fake::<u32>()),
            Decimal::new((1i64..100_000i64).fake::<i64>(), 2),
        )
}

#[cfg(test)]
mod tests {
    use super::*;

    proptest! {
        #[test]
        fn test_query_dates_normalize_to_eight_digits(raw in query_date_strategy()) {
            let date = FundDate::from_query(&raw);
            prop_assert_eq!(date.as_key().len(), 8);
            prop_assert!(date.is_calendar_date());
        }

        #[test]
        fn test_summaries_keep_date(summary in summary_strategy(FundDate::from_query("20240115"))) {
            prop_assert_eq!(summary.fund_date.as_key(), "20240115");
            prop_assert!(summary.id.is_some());
        }
    }

    #[test]
    fn test_fake_rows() {
        let summary = fake_summary("2800", FundDate::from_query("2024-01-15"));
        assert!(summary.etf_name.ends_with("Index ETF"));

        let holding = fake_holding("2800", "0700");
        assert_eq!(holding.isin, "HK0000000700");
    }
}
