//! Usage counter endpoints

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
};
use serde::Deserialize;

use crate::api::types::{ApiError, Json};
use crate::domain::AccountUsage;

use super::state::AppState;

/// Request body for usage mutations
#[derive(Debug, Deserialize)]
pub struct UsageRequest {
    pub account_number: String,
    /// Bytes to apply; omitted means 0.
    #[serde(default)]
    pub amount: i64,
}

/// Increase an account's usage counter
pub async fn increase_usage(
    State(state): State<AppState>,
    Json(request): Json<UsageRequest>,
) -> Result<Json<AccountUsage>, ApiError> {
    let total = state
        .usage
        .increase(&request.account_number, request.amount)
        .await?;

    Ok(Json(AccountUsage::new(request.account_number, total)))
}

/// Decrease an account's usage counter, clamping at zero
pub async fn decrease_usage(
    State(state): State<AppState>,
    Json(request): Json<UsageRequest>,
) -> Result<Json<AccountUsage>, ApiError> {
    let total = state
        .usage
        .decrease(&request.account_number, request.amount)
        .await?;

    Ok(Json(AccountUsage::new(request.account_number, total)))
}

/// Get an account's current usage; unknown accounts read as 0
pub async fn get_usage(
    State(state): State<AppState>,
    Path(account_number): Path<String>,
) -> Result<Json<AccountUsage>, ApiError> {
    let total = state.usage.current(&account_number).await?;

    Ok(Json(AccountUsage::new(account_number, total)))
}

/// Reset an account's usage counter to zero
pub async fn reset_usage(
    State(state): State<AppState>,
    Path(account_number): Path<String>,
) -> Result<impl IntoResponse, ApiError> {
    state.usage.reset(&account_number).await?;

    Ok(StatusCode::NO_CONTENT)
}

/// Delete an account's usage counter
pub async fn remove_usage(
    State(state): State<AppState>,
    Path(account_number): Path<String>,
) -> Result<impl IntoResponse, ApiError> {
    state.usage.remove(&account_number).await?;

    Ok(StatusCode::NO_CONTENT)
}
