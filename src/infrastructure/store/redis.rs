//! Redis throttle store implementation

use std::fmt;
use std::time::Duration;

use async_trait::async_trait;
use redis::aio::ConnectionManager;
use redis::{AsyncCommands, Client};

use crate::domain::store::ThrottleStore;
use crate::domain::DomainError;

/// Configuration for the Redis store
#[derive(Debug, Clone)]
pub struct RedisStoreConfig {
    /// Redis connection URL (e.g., "redis://127.0.0.1:6379")
    pub url: String,
    /// Connection timeout
    pub connection_timeout: Duration,
}

impl Default for RedisStoreConfig {
    fn default() -> Self {
        Self {
            url: "redis://127.0.0.1:6379".to_string(),
            connection_timeout: Duration::from_secs(5),
        }
    }
}

impl RedisStoreConfig {
    /// Creates a new configuration with the given URL
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            ..Default::default()
        }
    }

    /// Sets the connection timeout
    pub fn with_connection_timeout(mut self, timeout: Duration) -> Self {
        self.connection_timeout = timeout;
        self
    }
}

/// Redis-backed throttle store
///
/// Counters map onto plain string keys (GET/SET/INCRBY/EXPIRE), the tier
/// container onto a sorted set (ZADD/ZREM/ZRANGE WITHSCORES) where the
/// threshold is the member's score. `expire_if_unset` uses `EXPIRE ... NX`,
/// which requires Redis 7.0 or later.
#[derive(Clone)]
pub struct RedisThrottleStore {
    connection: ConnectionManager,
    config: RedisStoreConfig,
}

impl fmt::Debug for RedisThrottleStore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RedisThrottleStore")
            .field("config", &self.config)
            .field("connection", &"<ConnectionManager>")
            .finish()
    }
}

impl RedisThrottleStore {
    /// Creates a new Redis store connection
    pub async fn new(config: RedisStoreConfig) -> Result<Self, DomainError> {
        let client = Client::open(config.url.as_str())
            .map_err(|e| DomainError::store(format!("Failed to create Redis client: {}", e)))?;

        let connection =
            tokio::time::timeout(config.connection_timeout, ConnectionManager::new(client))
                .await
                .map_err(|_| {
                    DomainError::store(format!(
                        "Timed out connecting to Redis after {:?}",
                        config.connection_timeout
                    ))
                })?
                .map_err(|e| DomainError::store(format!("Failed to connect to Redis: {}", e)))?;

        Ok(Self { connection, config })
    }

    /// Creates a Redis store with default configuration
    pub async fn with_url(url: impl Into<String>) -> Result<Self, DomainError> {
        Self::new(RedisStoreConfig::new(url)).await
    }
}

#[async_trait]
impl ThrottleStore for RedisThrottleStore {
    async fn get(&self, key: &str) -> Result<Option<i64>, DomainError> {
        let mut conn = self.connection.clone();

        let value: Option<i64> = conn
            .get(key)
            .await
            .map_err(|e| DomainError::store(format!("Failed to get key '{}': {}", key, e)))?;

        Ok(value)
    }

    async fn set(&self, key: &str, value: i64) -> Result<(), DomainError> {
        let mut conn = self.connection.clone();

        let _: () = conn
            .set(key, value)
            .await
            .map_err(|e| DomainError::store(format!("Failed to set key '{}': {}", key, e)))?;

        Ok(())
    }

    async fn increment(&self, key: &str, delta: i64) -> Result<i64, DomainError> {
        let mut conn = self.connection.clone();

        let new_value: i64 = conn.incr(key, delta).await.map_err(|e| {
            DomainError::store(format!("Failed to increment key '{}': {}", key, e))
        })?;

        Ok(new_value)
    }

    async fn delete(&self, key: &str) -> Result<bool, DomainError> {
        let mut conn = self.connection.clone();

        let deleted: i32 = conn
            .del(key)
            .await
            .map_err(|e| DomainError::store(format!("Failed to delete key '{}': {}", key, e)))?;

        Ok(deleted > 0)
    }

    async fn expire(&self, key: &str, ttl: Duration) -> Result<bool, DomainError> {
        let mut conn = self.connection.clone();

        let ttl_secs = ttl.as_secs().max(1) as i64;

        let updated: bool = conn.expire(key, ttl_secs).await.map_err(|e| {
            DomainError::store(format!("Failed to update TTL for key '{}': {}", key, e))
        })?;

        Ok(updated)
    }

    async fn expire_if_unset(&self, key: &str, ttl: Duration) -> Result<bool, DomainError> {
        let mut conn = self.connection.clone();

        let ttl_secs = ttl.as_secs().max(1) as i64;

        // EXPIRE NX arms the TTL only when the key has none, so concurrent
        // first increments cannot double-arm or skip it.
        let updated: i64 = redis::cmd("EXPIRE")
            .arg(key)
            .arg(ttl_secs)
            .arg("NX")
            .query_async(&mut conn)
            .await
            .map_err(|e| {
                DomainError::store(format!("Failed to arm TTL for key '{}': {}", key, e))
            })?;

        Ok(updated > 0)
    }

    async fn sorted_insert(
        &self,
        key: &str,
        member: &str,
        score: i64,
    ) -> Result<(), DomainError> {
        let mut conn = self.connection.clone();

        let _: () = conn.zadd(key, member, score).await.map_err(|e| {
            DomainError::store(format!(
                "Failed to insert member '{}' into '{}': {}",
                member, key, e
            ))
        })?;

        Ok(())
    }

    async fn sorted_remove(&self, key: &str, member: &str) -> Result<bool, DomainError> {
        let mut conn = self.connection.clone();

        let removed: i32 = conn.zrem(key, member).await.map_err(|e| {
            DomainError::store(format!(
                "Failed to remove member '{}' from '{}': {}",
                member, key, e
            ))
        })?;

        Ok(removed > 0)
    }

    async fn sorted_range(&self, key: &str) -> Result<Vec<(String, i64)>, DomainError> {
        let mut conn = self.connection.clone();

        // Scores come back as doubles; thresholds stay well inside the
        // exactly-representable integer range.
        let members: Vec<(String, f64)> = conn.zrange_withscores(key, 0, -1).await.map_err(
            |e| DomainError::store(format!("Failed to range over '{}': {}", key, e)),
        )?;

        Ok(members
            .into_iter()
            .map(|(member, score)| (member, score as i64))
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // Note: These tests require a running Redis instance

    fn get_test_config() -> RedisStoreConfig {
        RedisStoreConfig::new("redis://127.0.0.1:6379")
    }

    #[tokio::test]
    async fn test_connection_attempt_bounded_by_timeout() {
        // TEST-NET address, nothing listens there; the attempt must fail
        // within the configured timeout rather than hang.
        let config = RedisStoreConfig::new("redis://192.0.2.1:6379")
            .with_connection_timeout(Duration::from_millis(200));

        let result = RedisThrottleStore::new(config).await;
        assert!(matches!(result, Err(DomainError::Store { .. })));
    }

    #[tokio::test]
    #[ignore = "Requires running Redis instance"]
    async fn test_redis_increment_and_get() {
        let store = RedisThrottleStore::new(get_test_config()).await.unwrap();

        store.delete("test:counter").await.unwrap();

        let val = store.increment("test:counter", 5).await.unwrap();
        assert_eq!(val, 5);

        let val = store.increment("test:counter", 3).await.unwrap();
        assert_eq!(val, 8);

        assert_eq!(store.get("test:counter").await.unwrap(), Some(8));

        // Cleanup
        store.delete("test:counter").await.unwrap();
    }

    #[tokio::test]
    #[ignore = "Requires running Redis instance"]
    async fn test_redis_expire_if_unset() {
        let store = RedisThrottleStore::new(get_test_config()).await.unwrap();

        store.delete("test:ttl").await.unwrap();
        store.increment("test:ttl", 1).await.unwrap();

        // First arm succeeds, second is a no-op
        assert!(store
            .expire_if_unset("test:ttl", Duration::from_secs(60))
            .await
            .unwrap());
        assert!(!store
            .expire_if_unset("test:ttl", Duration::from_secs(60))
            .await
            .unwrap());

        // Cleanup
        store.delete("test:ttl").await.unwrap();
    }

    #[tokio::test]
    #[ignore = "Requires running Redis instance"]
    async fn test_redis_sorted_container() {
        let store = RedisThrottleStore::new(get_test_config()).await.unwrap();

        store.delete("test:tiers").await.unwrap();

        store.sorted_insert("test:tiers", "SLOW", 100).await.unwrap();
        store.sorted_insert("test:tiers", "FAST", -1).await.unwrap();
        store.sorted_insert("test:tiers", "MEDIUM", 50).await.unwrap();

        let members = store.sorted_range("test:tiers").await.unwrap();
        assert_eq!(
            members,
            vec![
                ("FAST".to_string(), -1),
                ("MEDIUM".to_string(), 50),
                ("SLOW".to_string(), 100),
            ]
        );

        assert!(store.sorted_remove("test:tiers", "MEDIUM").await.unwrap());
        assert!(!store.sorted_remove("test:tiers", "MEDIUM").await.unwrap());

        // Cleanup
        store.delete("test:tiers").await.unwrap();
    }
}
