//! In-memory throttle store implementation
//!
//! Backs tests and local development; TTLs are tracked as deadlines and
//! checked lazily on access, so an expired counter reads as absent exactly
//! like a Redis key that has expired.

use std::collections::HashMap;
use std::time::{Duration, Instant};

use async_trait::async_trait;
use tokio::sync::RwLock;

use crate::domain::store::ThrottleStore;
use crate::domain::DomainError;

#[derive(Debug, Clone)]
struct CounterEntry {
    value: i64,
    expires_at: Option<Instant>,
}

impl CounterEntry {
    fn is_expired(&self) -> bool {
        self.expires_at.is_some_and(|deadline| Instant::now() >= deadline)
    }
}

#[derive(Debug, Default)]
struct StoreInner {
    counters: HashMap<String, CounterEntry>,
    /// member -> score, per container key
    sorted: HashMap<String, HashMap<String, i64>>,
}

impl StoreInner {
    fn live_counter(&mut self, key: &str) -> Option<&mut CounterEntry> {
        if self.counters.get(key).is_some_and(CounterEntry::is_expired) {
            self.counters.remove(key);
        }

        self.counters.get_mut(key)
    }
}

/// Thread-safe in-memory throttle store
#[derive(Debug, Default)]
pub struct InMemoryThrottleStore {
    inner: RwLock<StoreInner>,
}

impl InMemoryThrottleStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl ThrottleStore for InMemoryThrottleStore {
    async fn get(&self, key: &str) -> Result<Option<i64>, DomainError> {
        let mut inner = self.inner.write().await;

        Ok(inner.live_counter(key).map(|entry| entry.value))
    }

    async fn set(&self, key: &str, value: i64) -> Result<(), DomainError> {
        let mut inner = self.inner.write().await;

        inner.counters.insert(
            key.to_string(),
            CounterEntry {
                value,
                expires_at: None,
            },
        );

        Ok(())
    }

    async fn increment(&self, key: &str, delta: i64) -> Result<i64, DomainError> {
        let mut inner = self.inner.write().await;

        match inner.live_counter(key) {
            Some(entry) => {
                entry.value += delta;
                Ok(entry.value)
            }
            None => {
                inner.counters.insert(
                    key.to_string(),
                    CounterEntry {
                        value: delta,
                        expires_at: None,
                    },
                );
                Ok(delta)
            }
        }
    }

    async fn delete(&self, key: &str) -> Result<bool, DomainError> {
        let mut inner = self.inner.write().await;

        let existed = inner.live_counter(key).is_some();
        inner.counters.remove(key);

        Ok(existed)
    }

    async fn expire(&self, key: &str, ttl: Duration) -> Result<bool, DomainError> {
        let mut inner = self.inner.write().await;

        match inner.live_counter(key) {
            Some(entry) => {
                entry.expires_at = Some(Instant::now() + ttl);
                Ok(true)
            }
            None => Ok(false),
        }
    }

    async fn expire_if_unset(&self, key: &str, ttl: Duration) -> Result<bool, DomainError> {
        let mut inner = self.inner.write().await;

        match inner.live_counter(key) {
            Some(entry) if entry.expires_at.is_none() => {
                entry.expires_at = Some(Instant::now() + ttl);
                Ok(true)
            }
            _ => Ok(false),
        }
    }

    async fn sorted_insert(
        &self,
        key: &str,
        member: &str,
        score: i64,
    ) -> Result<(), DomainError> {
        let mut inner = self.inner.write().await;

        inner
            .sorted
            .entry(key.to_string())
            .or_default()
            .insert(member.to_string(), score);

        Ok(())
    }

    async fn sorted_remove(&self, key: &str, member: &str) -> Result<bool, DomainError> {
        let mut inner = self.inner.write().await;

        Ok(inner
            .sorted
            .get_mut(key)
            .is_some_and(|members| members.remove(member).is_some()))
    }

    async fn sorted_range(&self, key: &str) -> Result<Vec<(String, i64)>, DomainError> {
        let inner = self.inner.read().await;

        let mut members: Vec<(String, i64)> = inner
            .sorted
            .get(key)
            .map(|members| {
                members
                    .iter()
                    .map(|(member, score)| (member.clone(), *score))
                    .collect()
            })
            .unwrap_or_default();

        // Score order, lexicographic within equal scores, matching the
        // ordering Redis sorted sets guarantee.
        members.sort_by(|a, b| a.1.cmp(&b.1).then_with(|| a.0.cmp(&b.0)));

        Ok(members)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_increment_creates_counter() {
        let store = InMemoryThrottleStore::new();

        let val = store.increment("counter", 5).await.unwrap();
        assert_eq!(val, 5);

        let val = store.increment("counter", 3).await.unwrap();
        assert_eq!(val, 8);

        assert_eq!(store.get("counter").await.unwrap(), Some(8));
    }

    #[tokio::test]
    async fn test_get_missing_counter() {
        let store = InMemoryThrottleStore::new();

        assert_eq!(store.get("missing").await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_set_clears_ttl() {
        let store = InMemoryThrottleStore::new();

        store.increment("counter", 1).await.unwrap();
        store
            .expire("counter", Duration::from_secs(60))
            .await
            .unwrap();

        store.set("counter", 0).await.unwrap();

        // TTL was cleared, so expire_if_unset arms a fresh one
        assert!(store
            .expire_if_unset("counter", Duration::from_secs(60))
            .await
            .unwrap());
    }

    #[tokio::test]
    async fn test_expired_counter_reads_as_absent() {
        let store = InMemoryThrottleStore::new();

        store.increment("counter", 10).await.unwrap();
        store
            .expire("counter", Duration::from_millis(20))
            .await
            .unwrap();

        tokio::time::sleep(Duration::from_millis(40)).await;

        assert_eq!(store.get("counter").await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_expire_if_unset_is_one_shot() {
        let store = InMemoryThrottleStore::new();

        store.increment("counter", 1).await.unwrap();

        assert!(store
            .expire_if_unset("counter", Duration::from_secs(60))
            .await
            .unwrap());
        assert!(!store
            .expire_if_unset("counter", Duration::from_secs(60))
            .await
            .unwrap());
    }

    #[tokio::test]
    async fn test_expire_missing_counter() {
        let store = InMemoryThrottleStore::new();

        assert!(!store
            .expire("missing", Duration::from_secs(60))
            .await
            .unwrap());
        assert!(!store
            .expire_if_unset("missing", Duration::from_secs(60))
            .await
            .unwrap());
    }

    #[tokio::test]
    async fn test_delete() {
        let store = InMemoryThrottleStore::new();

        store.increment("counter", 1).await.unwrap();

        assert!(store.delete("counter").await.unwrap());
        assert!(!store.delete("counter").await.unwrap());
        assert_eq!(store.get("counter").await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_sorted_range_orders_by_score_then_member() {
        let store = InMemoryThrottleStore::new();

        store.sorted_insert("tiers", "SLOW", 100).await.unwrap();
        store.sorted_insert("tiers", "MEDIUM", 50).await.unwrap();
        store.sorted_insert("tiers", "FAST", 50).await.unwrap();

        let members = store.sorted_range("tiers").await.unwrap();
        assert_eq!(
            members,
            vec![
                ("FAST".to_string(), 50),
                ("MEDIUM".to_string(), 50),
                ("SLOW".to_string(), 100),
            ]
        );
    }

    #[tokio::test]
    async fn test_sorted_insert_overwrites_score() {
        let store = InMemoryThrottleStore::new();

        store.sorted_insert("tiers", "FAST", 10).await.unwrap();
        store.sorted_insert("tiers", "FAST", 20).await.unwrap();

        let members = store.sorted_range("tiers").await.unwrap();
        assert_eq!(members, vec![("FAST".to_string(), 20)]);
    }

    #[tokio::test]
    async fn test_sorted_remove() {
        let store = InMemoryThrottleStore::new();

        store.sorted_insert("tiers", "FAST", -1).await.unwrap();

        assert!(store.sorted_remove("tiers", "FAST").await.unwrap());
        assert!(!store.sorted_remove("tiers", "FAST").await.unwrap());
        assert!(store.sorted_range("tiers").await.unwrap().is_empty());
    }
}
