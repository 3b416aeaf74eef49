//! Pre-built Test Fixtures
//!
//! Provides ready-to-use ETF rows. The data is fixed so tests can assert on
//! exact orderings:
//!
//! - Three funds on 2024-01-15 whose id order (3033, 2800, 2828) differs from
//!   their code order (2800, 2828, 3033)
//! - One fund on 2024-01-16
//! - Holdings for a fund (7500) that has no summary on any date

use chrono::NaiveDate;
use core_kernel::FundDate;
use domain_etf::{EtfHolding, EtfSummary};
use rust_decimal_macros::dec;

use crate::in_memory::InMemoryEtfStore;

/// Fixture for fund dates
pub struct DateFixtures;

impl DateFixtures {
    /// Date with three funds, as sent by clients
    pub const QUERY_DATE: &'static str = "2024-01-15";

    /// Date with a single fund, as sent by clients
    pub const NEXT_QUERY_DATE: &'static str = "2024-01-16";

    /// Date without any data, as sent by clients
    pub const EMPTY_QUERY_DATE: &'static str = "2023-12-25";

    /// Key of `QUERY_DATE`
    pub fn fund_date() -> FundDate {
        FundDate::from_query(Self::QUERY_DATE)
    }

    /// Key of `NEXT_QUERY_DATE`
    pub fn next_fund_date() -> FundDate {
        FundDate::from_query(Self::NEXT_QUERY_DATE)
    }

    /// `QUERY_DATE` as a calendar date
    pub fn naive_date() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 1, 15).unwrap()
    }
}

/// Fixture for ETF summaries and holdings
pub struct EtfFixtures;

impl EtfFixtures {
    /// Tracker Fund of Hong Kong on 2024-01-15
    pub fn tracker_fund() -> EtfSummary {
        EtfSummary::new("2800", "Tracker Fund of Hong Kong", DateFixtures::fund_date())
            .with_id(2)
            .with_cash_component(dec!(-58213.72))
            .with_shares_outstanding(dec!(5713500000))
    }

    /// CSOP Hang Seng TECH Index ETF on 2024-01-15
    pub fn hang_seng_tech() -> EtfSummary {
        EtfSummary::new("3033", "CSOP Hang Seng TECH Index ETF", DateFixtures::fund_date())
            .with_id(1)
            .with_cash_component(dec!(1523.40))
            .with_shares_outstanding(dec!(2046200000))
    }

    /// Hang Seng China Enterprises Index ETF on 2024-01-15
    pub fn china_enterprises() -> EtfSummary {
        EtfSummary::new("2828", "Hang Seng China Enterprises Index ETF", DateFixtures::fund_date())
            .with_id(3)
            .with_cash_component(dec!(0))
            .with_shares_outstanding(dec!(254000000))
    }

    /// Tracker Fund of Hong Kong on 2024-01-16
    pub fn tracker_fund_next_day() -> EtfSummary {
        EtfSummary::new("2800", "Tracker Fund of Hong Kong", DateFixtures::next_fund_date())
            .with_id(4)
            .with_cash_component(dec!(-60110.05))
            .with_shares_outstanding(dec!(5714000000))
    }

    /// Every summary, in insertion order
    pub fn summaries() -> Vec<EtfSummary> {
        vec![
            Self::hang_seng_tech(),
            Self::tracker_fund(),
            Self::china_enterprises(),
            Self::tracker_fund_next_day(),
        ]
    }

    /// Every holding, in insertion order
    pub fn holdings() -> Vec<EtfHolding> {
        vec![
            Self::holding("2800", "0700", "Tencent Holdings", "KYG875721634", dec!(152000), dec!(290.20)),
            Self::holding("2800", "0005", "HSBC Holdings", "GB0005405286", dec!(610000), dec!(61.05)),
            Self::holding("2800", "0941", "China Mobile", "HK0941009539", dec!(98000), dec!(64.30)),
            Self::holding("3033", "9988", "Alibaba Group", "KYG017191142", dec!(420000), dec!(71.85)),
            Self::holding("3033", "0700", "Tencent Holdings", "KYG875721634", dec!(130000), dec!(290.20)),
            Self::holding("3033", "0020", "SenseTime Group", "KYG8062F1039", dec!(2100000), dec!(1.43)),
            Self::holding("2828", "1398", "ICBC", "CNE1000003G1", dec!(3900000), dec!(3.79)),
            Self::holding("2828", "0939", "China Construction Bank", "CNE1000002H1", dec!(5100000), dec!(4.66)),
            Self::holding("7500", "0001", "CK Hutchison", "KYG217651051", dec!(12000), dec!(40.15)),
        ]
    }

    /// An in-memory store seeded with every summary and holding
    pub fn store() -> InMemoryEtfStore {
        InMemoryEtfStore::new(Self::summaries(), Self::holdings())
    }

    fn holding(
        etf_code: &str,
        stock_code: &str,
        stock_name: &str,
        isin: &str,
        shares: rust_decimal::Decimal,
        price: rust_decimal::Decimal,
    ) -> EtfHolding {
        EtfHolding::new(etf_code, stock_code, stock_name)
            .with_listing(isin, "XHKG", "HKD")
            .with_position(shares, price)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fixture_dates_normalize() {
        assert_eq!(DateFixtures::fund_date().as_key(), "20240115");
        assert_eq!(DateFixtures::fund_date(), FundDate::from(DateFixtures::naive_date()));
    }

    #[test]
    fn test_three_funds_on_query_date() {
        let count = EtfFixtures::summaries()
            .iter()
            .filter(|s| s.fund_date == DateFixtures::fund_date())
            .count();
        assert_eq!(count, 3);
    }
}
