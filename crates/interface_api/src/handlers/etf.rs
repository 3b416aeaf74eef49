//! ETF composition handlers
//!
//! All three endpoints take a required `date` query parameter in
//! `YYYY-MM-DD` form. Hyphens are stripped to build the stored fund date key;
//! nothing else is validated, so a malformed date simply matches no rows.

use axum::{
    extract::{Query, State},
    Json,
};

use core_kernel::FundDate;

use crate::dto::etf::*;
use crate::{error::ApiError, AppState};

/// Funds of the date ordered by code, each with its holdings nested
pub async fn etf_data(
    State(state): State<AppState>,
    Query(query): Query<DateQuery>,
) -> Result<Json<Vec<EtfWithStocksResponse>>, ApiError> {
    let date = required_date(&query)?;

    let compositions = state
        .service
        .compositions_by_fund(&date)
        .await
        .map_err(|e| ApiError::from_service(e, state.config.expose_error_details))?;

    Ok(Json(compositions.into_iter().map(Into::into).collect()))
}

/// Summaries ordered by id, with the flat holding list
pub async fn solactive_etf_details(
    State(state): State<AppState>,
    Query(query): Query<DateQuery>,
) -> Result<Json<EtfDetailsResponse<SolactiveEtfResponse>>, ApiError> {
    let date = required_date(&query)?;

    let snapshot = state
        .service
        .solactive_details(&date)
        .await
        .map_err(|e| ApiError::from_service(e, state.config.expose_error_details))?;

    Ok(Json(snapshot.into()))
}

/// Summaries ordered by code without ids, with the flat holding list
pub async fn sp_etf_details(
    State(state): State<AppState>,
    Query(query): Query<DateQuery>,
) -> Result<Json<EtfDetailsResponse<SpEtfResponse>>, ApiError> {
    let date = required_date(&query)?;

    let snapshot = state
        .service
        .sp_details(&date)
        .await
        .map_err(|e| ApiError::from_service(e, state.config.expose_error_details))?;

    Ok(Json(snapshot.into()))
}

/// Only the first `date` counts when the parameter is repeated
fn required_date(query: &DateQuery) -> Result<FundDate, ApiError> {
    query
        .date()
        .filter(|raw| !raw.is_empty())
        .map(FundDate::from_query)
        .ok_or(ApiError::MissingDate)
}
