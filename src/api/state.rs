//! Application state for shared services

use std::sync::Arc;

use crate::infrastructure::tier::TierRegistry;
use crate::infrastructure::usage::UsageCounter;

/// Application state containing the throttle services
#[derive(Clone)]
pub struct AppState {
    pub usage: Arc<UsageCounter>,
    pub tiers: Arc<TierRegistry>,
}

impl AppState {
    pub fn new(usage: Arc<UsageCounter>, tiers: Arc<TierRegistry>) -> Self {
        Self { usage, tiers }
    }
}
