//! Router wiring for the throttle API

use axum::{
    routing::{delete, get, post},
    Router,
};
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use super::state::AppState;
use super::{health, tier, usage};

/// Create the application router with all endpoints
pub fn create_router(state: AppState) -> Router {
    Router::new()
        // Health endpoints
        .route("/health", get(health::health_check))
        .route("/ready", get(health::ready_check))
        .route("/live", get(health::live_check))
        // Usage counter
        .route("/throttle/usage/increase", post(usage::increase_usage))
        .route("/throttle/usage/decrease", post(usage::decrease_usage))
        .route("/throttle/usage/reset/{account_number}", delete(usage::reset_usage))
        .route(
            "/throttle/usage/{account_number}",
            get(usage::get_usage).delete(usage::remove_usage),
        )
        // Tier registry
        .route("/throttle/tier", get(tier::list_tiers).put(tier::add_tier))
        .route(
            "/throttle/tier/{speed}",
            delete(tier::delete_tier).get(tier::account_tier),
        )
        .with_state(state)
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
}
