//! Per-account usage counter with TTL-driven reset

use std::sync::Arc;
use std::time::Duration;

use tracing::debug;

use crate::domain::store::ThrottleStore;
use crate::domain::DomainError;

/// Store key prefix for per-account counters.
/// Fixed for compatibility with existing deployments.
pub const ACCOUNT_PREFIX: &str = "ACCOUNT:";

/// Maintains a TTL-bounded, non-negative cumulative usage counter per
/// account.
///
/// Counters are created implicitly on first increase and read as zero once
/// absent or expired. The store's atomic increment serializes concurrent
/// mutations; TTL arming relies on the store's expire-if-unset primitive so
/// racing first increments cannot skip or double-arm the expiry.
#[derive(Debug)]
pub struct UsageCounter {
    store: Arc<dyn ThrottleStore>,
    expiry: Duration,
}

impl UsageCounter {
    /// Creates a counter with the configured expiry applied to every
    /// account.
    pub fn new(store: Arc<dyn ThrottleStore>, expiry: Duration) -> Self {
        Self { store, expiry }
    }

    /// Increases an account's usage and returns the new total.
    ///
    /// The counter is created at `amount` when absent, in which case the
    /// TTL is armed. A negative amount is rejected without touching the
    /// counter.
    pub async fn increase(&self, account: &str, amount: i64) -> Result<i64, DomainError> {
        let amount = validate_amount(amount)?;
        let key = account_key(account);

        let total = self.store.increment(&key, amount).await?;
        self.store.expire_if_unset(&key, self.expiry).await?;

        debug!(account, amount, total, "usage increased");
        Ok(total)
    }

    /// Decreases an account's usage and returns the new total.
    ///
    /// A result at or below zero clamps the stored value to exactly 0 and
    /// re-arms the TTL. The clamp is two store round trips (set, then
    /// expire); a reader in between can observe a without-TTL zero, which
    /// the next write corrects.
    pub async fn decrease(&self, account: &str, amount: i64) -> Result<i64, DomainError> {
        let amount = validate_amount(amount)?;
        let key = account_key(account);

        let total = self.store.increment(&key, -amount).await?;

        if total <= 0 {
            self.store.set(&key, 0).await?;
            self.store.expire(&key, self.expiry).await?;

            debug!(account, amount, "usage clamped to zero");
            return Ok(0);
        }

        debug!(account, amount, total, "usage decreased");
        Ok(total)
    }

    /// Returns the account's current total; absent or expired counters
    /// read as 0.
    pub async fn current(&self, account: &str) -> Result<i64, DomainError> {
        let total = self.store.get(&account_key(account)).await?.unwrap_or(0);
        Ok(total)
    }

    /// Sets the counter to 0 and arms the TTL, regardless of prior state.
    pub async fn reset(&self, account: &str) -> Result<(), DomainError> {
        let key = account_key(account);

        self.store.set(&key, 0).await?;
        self.store.expire(&key, self.expiry).await?;

        debug!(account, "usage reset");
        Ok(())
    }

    /// Deletes the counter outright; subsequent reads return 0.
    pub async fn remove(&self, account: &str) -> Result<(), DomainError> {
        self.store.delete(&account_key(account)).await?;

        debug!(account, "usage counter removed");
        Ok(())
    }
}

fn account_key(account: &str) -> String {
    format!("{}{}", ACCOUNT_PREFIX, account)
}

fn validate_amount(amount: i64) -> Result<i64, DomainError> {
    if amount < 0 {
        return Err(DomainError::validation(format!(
            "usage amount must not be negative, got {}",
            amount
        )));
    }

    Ok(amount)
}
