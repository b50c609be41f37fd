//! Throttle store trait definition

use std::fmt::Debug;
use std::time::Duration;

use async_trait::async_trait;

use crate::domain::DomainError;

/// Key-value store primitives the throttle core relies on.
///
/// All shared state lives behind this trait; the core keeps no copy of a
/// counter or tier between calls. `increment` must be a single atomic
/// read-modify-write round trip - it is the only concurrency primitive the
/// core depends on.
#[async_trait]
pub trait ThrottleStore: Send + Sync + Debug {
    /// Reads an integer counter; absent or expired keys read as `None`.
    async fn get(&self, key: &str) -> Result<Option<i64>, DomainError>;

    /// Sets a counter to an exact value, clearing any existing TTL.
    async fn set(&self, key: &str, value: i64) -> Result<(), DomainError>;

    /// Atomically adds `delta` to a counter, creating it at `delta` when
    /// absent. Returns the new value.
    async fn increment(&self, key: &str, delta: i64) -> Result<i64, DomainError>;

    /// Deletes a key. Returns whether it existed.
    async fn delete(&self, key: &str) -> Result<bool, DomainError>;

    /// Arms or re-arms a TTL on an existing key. Returns false if the key
    /// does not exist.
    async fn expire(&self, key: &str, ttl: Duration) -> Result<bool, DomainError>;

    /// Arms a TTL only when the key currently has none. Returns whether the
    /// TTL was set.
    async fn expire_if_unset(&self, key: &str, ttl: Duration) -> Result<bool, DomainError>;

    /// Inserts or updates a scored member in a sorted container.
    async fn sorted_insert(&self, key: &str, member: &str, score: i64)
        -> Result<(), DomainError>;

    /// Removes a member from a sorted container. Returns whether it existed.
    async fn sorted_remove(&self, key: &str, member: &str) -> Result<bool, DomainError>;

    /// Returns all members of a sorted container ordered ascending by score;
    /// members sharing a score are ordered lexicographically.
    async fn sorted_range(&self, key: &str) -> Result<Vec<(String, i64)>, DomainError>;
}
