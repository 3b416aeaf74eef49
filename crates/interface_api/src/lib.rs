//! HTTP API Layer
//!
//! This crate provides the REST API over per-date ETF compositions using Axum.
//!
//! # Architecture
//!
//! - **Handlers**: the three composition endpoints plus health checks
//! - **Middleware**: request ids, tracing, request logging, CORS
//! - **DTOs**: Response data transfer objects
//! - **Error Handling**: `{"error": ...}` bodies with 400/500 statuses
//!
//! # Example
//!
//! ```rust,ignore
//! use interface_api::create_router;
//!
//! let app = create_router(Arc::new(PostgresEtfAdapter::new(pool)), config);
//! axum::serve(listener, app).await?;
//! ```

pub mod config;
pub mod error;
pub mod middleware;
pub mod handlers;
pub mod dto;

use std::sync::Arc;

use axum::{middleware as axum_middleware, routing::get, Router};
use tower::ServiceBuilder;
use tower_http::cors::{Any, CorsLayer};
use tower_http::request_id::{MakeRequestUuid, PropagateRequestIdLayer, SetRequestIdLayer};
use tower_http::trace::TraceLayer;

use domain_etf::{EtfCompositionPort, EtfQueryService};

use crate::config::ApiConfig;
use crate::handlers::{etf, health};
use crate::middleware::log_requests;

/// Application state shared across handlers
#[derive(Clone)]
pub struct AppState {
    pub service: EtfQueryService,
    pub config: ApiConfig,
}

/// Creates the main API router
///
/// # Arguments
///
/// * `port` - Data source the endpoints read from
/// * `config` - API configuration
///
/// # Returns
///
/// Configured Axum router with all routes and middleware
pub fn create_router(port: Arc<dyn EtfCompositionPort>, config: ApiConfig) -> Router {
    let state = AppState {
        service: EtfQueryService::new(port),
        config,
    };

    let health_routes = Router::new()
        .route("/health", get(health::health_check))
        .route("/health/ready", get(health::readiness_check));

    let api_routes = Router::new()
        .route("/etf_data", get(etf::etf_data))
        .route("/solactive_etf_details", get(etf::solactive_etf_details))
        .route("/sp_etf_details", get(etf::sp_etf_details));

    Router::new()
        .merge(health_routes)
        .nest("/api", api_routes)
        .layer(
            ServiceBuilder::new()
                .layer(SetRequestIdLayer::x_request_id(MakeRequestUuid))
                .layer(PropagateRequestIdLayer::x_request_id())
                .layer(TraceLayer::new_for_http())
                .layer(axum_middleware::from_fn(log_requests)),
        )
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        )
        .with_state(state)
}
