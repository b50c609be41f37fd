//! Tier registry backed by the store's sorted container

use std::sync::Arc;

use tracing::debug;

use crate::domain::store::ThrottleStore;
use crate::domain::tier::{Speed, Tier};
use crate::domain::DomainError;

/// Store key of the sorted container holding speed -> threshold pairs.
/// Fixed for compatibility with existing deployments.
pub const TIERS_KEY: &str = "TIERS";

/// Maintains the ordered set of bandwidth tiers and resolves a usage amount
/// to the applicable tier.
///
/// Tiers live in a single sorted container where the member is the speed
/// label and the score is the threshold; the registry holds no state of its
/// own between calls.
#[derive(Debug)]
pub struct TierRegistry {
    store: Arc<dyn ThrottleStore>,
}

impl TierRegistry {
    pub fn new(store: Arc<dyn ThrottleStore>) -> Self {
        Self { store }
    }

    /// Adds a tier, overwriting any existing threshold for the same speed.
    ///
    /// Fails with a validation error when the label is not in the closed
    /// speed set. A tier meant to cover usage from zero upward must be
    /// registered with a negative threshold (see [`Tier::applies_to`]).
    pub async fn add(&self, speed: &str, threshold: i64) -> Result<(), DomainError> {
        let speed = Speed::from_label(speed)?;

        debug!(%speed, threshold, "adding tier");
        self.store
            .sorted_insert(TIERS_KEY, speed.as_label(), threshold)
            .await
    }

    /// Removes a tier. Removing an absent tier is a no-op success; an
    /// unrecognized label still fails validation.
    pub async fn remove(&self, speed: &str) -> Result<(), DomainError> {
        let speed = Speed::from_label(speed)?;

        debug!(%speed, "removing tier");
        self.store.sorted_remove(TIERS_KEY, speed.as_label()).await?;
        Ok(())
    }

    /// Returns all tiers ordered ascending by threshold.
    ///
    /// An empty registry is an error, not an empty list.
    pub async fn list(&self) -> Result<Vec<Tier>, DomainError> {
        let tiers = self.fetch().await?;

        if tiers.is_empty() {
            return Err(DomainError::not_found("no tiers registered"));
        }

        Ok(tiers)
    }

    /// Resolves the tier with the greatest threshold strictly below
    /// `current_usage`. Never fails: when no tier matches (including the
    /// empty-registry case) the UNKNOWN fallback is returned.
    ///
    /// Ties on equal thresholds break to the lexicographically smallest
    /// speed label.
    pub async fn resolve(&self, current_usage: i64) -> Result<Tier, DomainError> {
        let mut best: Option<Tier> = None;

        // fetch() yields ascending threshold, lexicographic within equal
        // thresholds, so keeping the first tier seen at the winning
        // threshold gives the documented tie-break.
        for tier in self.fetch().await? {
            if !tier.applies_to(current_usage) {
                continue;
            }

            match best {
                Some(current) if tier.threshold <= current.threshold => {}
                _ => best = Some(tier),
            }
        }

        Ok(best.unwrap_or_else(Tier::unknown))
    }

    async fn fetch(&self) -> Result<Vec<Tier>, DomainError> {
        self.store
            .sorted_range(TIERS_KEY)
            .await?
            .into_iter()
            .map(|(member, threshold)| {
                let speed = Speed::from_label(&member).map_err(|_| {
                    DomainError::internal(format!(
                        "unrecognized speed label '{}' in tier container",
                        member
                    ))
                })?;

                Ok(Tier::new(speed, threshold))
            })
            .collect()
    }
}
