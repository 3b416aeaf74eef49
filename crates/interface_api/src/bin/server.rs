//! ETF Composition API - Server Binary
//!
//! This binary starts the HTTP API server over the ETF composition tables.
//!
//! # Usage
//!
//! ```bash
//! # Run with default configuration
//! cargo run --bin etf-api
//!
//! # Run with environment variables
//! API_PORT=8080 DATABASE_URL=postgres://... cargo run --bin etf-api
//! ```
//!
//! # Environment Variables
//!
//! * `DATABASE_URL` / `API_DATABASE_URL` - PostgreSQL connection string
//! * `API_HOST` - Server host (default: 0.0.0.0)
//! * `API_PORT` - Server port (default: 5000)
//! * `API_LOG_LEVEL` - Log level, overridden by `RUST_LOG` (default: info)
//! * `API_LOG_FORMAT` - `pretty` or `json` (default: pretty)
//! * `API_EXPOSE_ERROR_DETAILS` - Forward failure messages to clients (default: true)
//! * `API_DB_MAX_CONNECTIONS` - Pool size (default: 10)
//! * `API_DB_ACQUIRE_TIMEOUT_SECS` - Pool acquire timeout (default: 30)

use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::Context;
use core_kernel::HealthCheckable;
use infra_db::{create_lazy_pool, PostgresEtfAdapter};
use interface_api::config::{ApiConfig, LogFormat};
use interface_api::create_router;
use tokio::net::TcpListener;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Main entry point for the API server.
///
/// The database pool connects lazily, so the server starts even when the
/// database is down; requests then fail with 500 until it comes back.
///
/// # Errors
///
/// Returns an error if:
/// - Configuration cannot be loaded from environment
/// - The connection string is not a Postgres URL
/// - Server fails to bind to the configured address
#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load .env file if present (useful for local development)
    dotenvy::dotenv().ok();

    let config = ApiConfig::from_env().context("Failed to load configuration")?;

    init_tracing(&config.log_level, config.log_format);

    let settings = config
        .database_settings()
        .context("Invalid database connection string")?;

    tracing::info!(
        host = %config.host,
        port = %config.port,
        database = %settings,
        "Starting ETF Composition API Server"
    );

    let pool = create_lazy_pool(&settings, &config.database_config());
    let adapter = Arc::new(PostgresEtfAdapter::new(pool));

    let probe = adapter.health_check().await;
    if probe.is_operational() {
        tracing::info!(latency_ms = probe.latency_ms, "Database reachable");
    } else {
        tracing::warn!(
            message = probe.message.as_deref().unwrap_or(""),
            "Database not reachable at startup; requests will fail until it is"
        );
    }

    let app = create_router(adapter, config.clone());

    let addr: SocketAddr = config
        .server_addr()
        .parse()
        .with_context(|| format!("Invalid server address {}", config.server_addr()))?;

    tracing::info!(%addr, "Server listening");

    let listener = TcpListener::bind(addr)
        .await
        .with_context(|| format!("Failed to bind {addr}"))?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("Server shutdown complete");
    Ok(())
}

/// Initializes the tracing subscriber.
///
/// `RUST_LOG` takes precedence over the configured level.
fn init_tracing(log_level: &str, format: LogFormat) {
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(log_level))
        .unwrap_or_else(|_| EnvFilter::new("info"));

    let registry = tracing_subscriber::registry().with(filter);

    match format {
        LogFormat::Json => registry
            .with(tracing_subscriber::fmt::layer().json().with_target(true))
            .init(),
        LogFormat::Pretty => registry
            .with(tracing_subscriber::fmt::layer().with_target(true))
            .init(),
    }
}

/// Waits for shutdown signal (Ctrl+C or SIGTERM).
///
/// In-flight requests complete before the process exits.
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!(error = %e, "Failed to listen for Ctrl+C");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                tracing::error!(error = %e, "Failed to install SIGTERM handler");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            tracing::info!("Received Ctrl+C, initiating graceful shutdown");
        }
        _ = terminate => {
            tracing::info!("Received SIGTERM, initiating graceful shutdown");
        }
    }
}
