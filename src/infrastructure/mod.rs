//! Infrastructure layer - store backends and the services built on them

pub mod logging;
pub mod store;
pub mod tier;
pub mod usage;

pub use store::{InMemoryThrottleStore, RedisThrottleStore, StoreFactory, StoreType};
pub use tier::TierRegistry;
pub use usage::UsageCounter;
