//! Store factory for runtime backend selection

use std::sync::Arc;

use crate::domain::store::ThrottleStore;
use crate::domain::DomainError;

use super::in_memory::InMemoryThrottleStore;
use super::redis::{RedisStoreConfig, RedisThrottleStore};

/// Supported store backends
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum StoreType {
    /// In-memory store, for tests and local development
    #[default]
    InMemory,
    /// Redis store
    Redis,
}

impl std::fmt::Display for StoreType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            StoreType::InMemory => write!(f, "in_memory"),
            StoreType::Redis => write!(f, "redis"),
        }
    }
}

impl std::str::FromStr for StoreType {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "in_memory" | "inmemory" | "memory" => Ok(StoreType::InMemory),
            "redis" => Ok(StoreType::Redis),
            _ => Err(DomainError::configuration(format!(
                "Unknown store backend: {}. Valid backends: in_memory, redis",
                s
            ))),
        }
    }
}

/// Factory for creating store instances
#[derive(Debug, Default)]
pub struct StoreFactory;

impl StoreFactory {
    /// Creates a store instance for the selected backend
    pub async fn create(
        store_type: StoreType,
        redis_url: Option<&str>,
    ) -> Result<Arc<dyn ThrottleStore>, DomainError> {
        match store_type {
            StoreType::InMemory => Ok(Arc::new(InMemoryThrottleStore::new())),
            StoreType::Redis => {
                let url = redis_url.ok_or_else(|| {
                    DomainError::configuration("Redis URL is required for the redis backend")
                })?;

                let store = RedisThrottleStore::new(RedisStoreConfig::new(url)).await?;
                Ok(Arc::new(store))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_store_type_from_str() {
        assert_eq!("in_memory".parse::<StoreType>().unwrap(), StoreType::InMemory);
        assert_eq!("memory".parse::<StoreType>().unwrap(), StoreType::InMemory);
        assert_eq!("redis".parse::<StoreType>().unwrap(), StoreType::Redis);
        assert_eq!("REDIS".parse::<StoreType>().unwrap(), StoreType::Redis);
    }

    #[test]
    fn test_store_type_from_str_invalid() {
        assert!("cassandra".parse::<StoreType>().is_err());
    }

    #[tokio::test]
    async fn test_factory_create_in_memory() {
        let store = StoreFactory::create(StoreType::InMemory, None).await.unwrap();

        let val = store.increment("counter", 5).await.unwrap();
        assert_eq!(val, 5);
    }

    #[tokio::test]
    async fn test_factory_create_redis_missing_url() {
        let result = StoreFactory::create(StoreType::Redis, None).await;
        assert!(result.is_err());
    }

    #[test]
    fn test_store_type_display() {
        assert_eq!(StoreType::InMemory.to_string(), "in_memory");
        assert_eq!(StoreType::Redis.to_string(), "redis");
    }
}
