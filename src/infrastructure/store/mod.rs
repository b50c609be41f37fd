//! Store implementations

mod factory;
mod in_memory;
mod redis;

pub use factory::{StoreFactory, StoreType};
pub use in_memory::InMemoryThrottleStore;
pub use redis::{RedisStoreConfig, RedisThrottleStore};
