//! Usage Throttle
//!
//! Tracks per-account bandwidth usage and resolves the applicable speed
//! tier for an account's current consumption. Counters are TTL-bounded
//! and backed by either Redis or an in-memory store.

pub mod api;
pub mod cli;
pub mod config;
pub mod domain;
pub mod infrastructure;

pub use config::AppConfig;

use std::sync::Arc;
use std::time::Duration;

use tracing::info;

use api::state::AppState;
use infrastructure::store::{StoreFactory, StoreType};
use infrastructure::tier::TierRegistry;
use infrastructure::usage::UsageCounter;

/// Create the application state from configuration
pub async fn create_app_state(config: &AppConfig) -> anyhow::Result<AppState> {
    let store_type: StoreType = config.store.backend.parse()?;
    info!("Store backend: {}", store_type);

    let store = StoreFactory::create(store_type, config.store.redis_url.as_deref()).await?;

    let expiry = Duration::from_secs(config.throttle.expiry_seconds);
    let usage = Arc::new(UsageCounter::new(store.clone(), expiry));
    let tiers = Arc::new(TierRegistry::new(store));

    Ok(AppState::new(usage, tiers))
}
