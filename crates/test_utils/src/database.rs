//! Database Test Utilities
//!
//! Provides a throwaway PostgreSQL container with the ETF schema applied,
//! plus helpers to seed and reset the composition tables.

use sqlx::PgPool;
use testcontainers::core::IntoContainerPort;
use testcontainers::runners::AsyncRunner;
use testcontainers::{ContainerAsync, ImageExt};
use testcontainers_modules::postgres::Postgres;

use domain_etf::{EtfHolding, EtfSummary};
use infra_db::{create_pool, DatabaseConfig, DatabaseSettings};

const POSTGRES_TAG: &str = "16-alpine";
const POSTGRES_USER: &str = "test_user";
const POSTGRES_PASSWORD: &str = "test_password";
const POSTGRES_DB: &str = "etf_test";

const SCHEMA: &str = include_str!("../../../migrations/20240101_000001_etf_schema.sql");

type BoxError = Box<dyn std::error::Error + Send + Sync>;

/// A wrapper around a PostgreSQL test container
pub struct TestDatabase {
    _container: ContainerAsync<Postgres>,
    pub settings: DatabaseSettings,
    pub pool: PgPool,
}

impl TestDatabase {
    /// Starts a new PostgreSQL container and applies the schema
    ///
    /// # Errors
    ///
    /// Returns an error if the container fails to start or the schema fails to apply
    pub async fn new() -> Result<Self, BoxError> {
        let container = Postgres::default()
            .with_db_name(POSTGRES_DB)
            .with_user(POSTGRES_USER)
            .with_password(POSTGRES_PASSWORD)
            .with_tag(POSTGRES_TAG)
            .start()
            .await?;

        let host = container.get_host().await?;
        let port = container.get_host_port_ipv4(5432.tcp()).await?;

        let settings = DatabaseSettings::from_url(&format!(
            "postgres://{POSTGRES_USER}:{POSTGRES_PASSWORD}@{host}:{port}/{POSTGRES_DB}"
        ))?;
        let pool = create_pool(&settings, &DatabaseConfig::new().max_connections(5)).await?;

        sqlx::raw_sql(SCHEMA).execute(&pool).await?;

        Ok(Self {
            _container: container,
            settings,
            pool,
        })
    }

    /// Returns a reference to the connection pool
    pub fn pool(&self) -> &PgPool {
        &self.pool
    }

    /// Inserts summaries and holdings
    ///
    /// Summaries carrying an id keep it; the id sequence is moved past the
    /// largest id afterwards.
    pub async fn seed(&self, summaries: &[EtfSummary], holdings: &[EtfHolding]) -> Result<(), BoxError> {
        let mut tx = self.pool.begin().await?;

        for summary in summaries {
            match summary.id {
                Some(id) => {
                    sqlx::query(
                        "INSERT INTO ETFSummary (id, etf_code, etf_name, fund_cash_component, shares_outstanding, fund_date) \
                         VALUES ($1, $2, $3, $4, $5, $6)",
                    )
                    .bind(id as i32)
                    .bind(summary.etf_code.as_str())
                    .bind(&summary.etf_name)
                    .bind(summary.fund_cash_component)
                    .bind(summary.shares_outstanding)
                    .bind(summary.fund_date.as_key())
                    .execute(&mut *tx)
                    .await?;
                }
                None => {
                    sqlx::query(
                        "INSERT INTO ETFSummary (etf_code, etf_name, fund_cash_component, shares_outstanding, fund_date) \
                         VALUES ($1, $2, $3, $4, $5)",
                    )
                    .bind(summary.etf_code.as_str())
                    .bind(&summary.etf_name)
                    .bind(summary.fund_cash_component)
                    .bind(summary.shares_outstanding)
                    .bind(summary.fund_date.as_key())
                    .execute(&mut *tx)
                    .await?;
                }
            }
        }

        for holding in holdings {
            sqlx::query(
                "INSERT INTO ETFDetail (etf_code, stock_code, stock_name, isin, exchange, currency, shares_amount, stock_price) \
                 VALUES ($1, $2, $3, $4, $5, $6, $7, $8)",
            )
            .bind(holding.etf_code.as_str())
            .bind(holding.stock_code.as_str())
            .bind(&holding.stock_name)
            .bind(&holding.isin)
            .bind(&holding.exchange)
            .bind(&holding.currency)
            .bind(holding.shares_amount)
            .bind(holding.stock_price)
            .execute(&mut *tx)
            .await?;
        }

        sqlx::raw_sql(
            "SELECT setval(pg_get_serial_sequence('etfsummary', 'id'), COALESCE(MAX(id), 0) + 1, false) FROM ETFSummary",
        )
        .execute(&mut *tx)
        .await?;

        tx.commit().await?;
        Ok(())
    }

    /// Clears all rows while preserving the schema
    pub async fn clear_data(&self) -> Result<(), BoxError> {
        sqlx::raw_sql("TRUNCATE TABLE ETFDetail, ETFSummary RESTART IDENTITY")
            .execute(&self.pool)
            .await?;
        Ok(())
    }
}

/// Creates an isolated test database for a single test
pub async fn create_isolated_test_database() -> Result<TestDatabase, BoxError> {
    TestDatabase::new().await
}
