//! Tier registry implementation

mod registry;

pub use registry::{TierRegistry, TIERS_KEY};
