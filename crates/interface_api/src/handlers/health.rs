//! Health check handlers

use axum::{extract::State, http::StatusCode, Json};
use serde::Serialize;

use core_kernel::AdapterHealth;

use crate::AppState;

#[derive(Serialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub database: Option<AdapterHealth>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub latency_ms: Option<u64>,
}

/// Health check endpoint
pub async fn health_check() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "healthy".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        database: None,
        latency_ms: None,
    })
}

/// Readiness check (includes database)
pub async fn readiness_check(State(state): State<AppState>) -> (StatusCode, Json<HealthResponse>) {
    let result = state.service.health().await;

    let (code, status) = if result.is_operational() {
        (StatusCode::OK, "ready")
    } else {
        tracing::warn!(
            adapter = %result.adapter_id,
            message = result.message.as_deref().unwrap_or(""),
            "Readiness check failed"
        );
        (StatusCode::SERVICE_UNAVAILABLE, "unavailable")
    };

    (
        code,
        Json(HealthResponse {
            status: status.to_string(),
            version: env!("CARGO_PKG_VERSION").to_string(),
            database: Some(result.status),
            latency_ms: Some(result.latency_ms),
        }),
    )
}
