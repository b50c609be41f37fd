//! Tier registry endpoints

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
};
use serde::Deserialize;

use crate::api::types::{ApiError, Json};
use crate::domain::{AccountUsage, Tier};

use super::state::AppState;

/// Request body for registering a tier
#[derive(Debug, Deserialize)]
pub struct TierRequest {
    pub speed: String,
    pub threshold: i64,
}

/// List all registered tiers, ascending by threshold.
/// An empty registry is a 404, not an empty list.
pub async fn list_tiers(
    State(state): State<AppState>,
) -> Result<Json<Vec<Tier>>, ApiError> {
    let tiers = state.tiers.list().await?;

    Ok(Json(tiers))
}

/// Register a tier, overwriting any existing threshold for the speed
pub async fn add_tier(
    State(state): State<AppState>,
    Json(request): Json<TierRequest>,
) -> Result<impl IntoResponse, ApiError> {
    state.tiers.add(&request.speed, request.threshold).await?;

    Ok(StatusCode::CREATED)
}

/// Remove a tier; removing an absent tier succeeds
pub async fn delete_tier(
    State(state): State<AppState>,
    Path(speed): Path<String>,
) -> Result<impl IntoResponse, ApiError> {
    state.tiers.remove(&speed).await?;

    Ok(StatusCode::NO_CONTENT)
}

/// Resolve the bandwidth tier for an account's current usage.
/// Always succeeds; accounts with no matching tier get UNKNOWN.
pub async fn account_tier(
    State(state): State<AppState>,
    Path(account_number): Path<String>,
) -> Result<Json<AccountUsage>, ApiError> {
    let total = state.usage.current(&account_number).await?;
    let tier = state.tiers.resolve(total).await?;

    Ok(Json(AccountUsage::new(account_number, total).with_speed(tier.speed)))
}
