//! Login throttle store trait definition.

use std::time::Duration;

use async_trait::async_trait;

use crate::errors::StoreError;

/// Tracks failed-attempt counters and lock markers per identifier.
///
/// The counter and the lock are independent keys: a lock lasts its own
/// duration even if the counter expires first. Implementations must issue
/// the increment and its expiry as one atomic unit, otherwise concurrent
/// failures can slip past the lockout threshold.
#[async_trait]
pub trait LoginThrottleStore: Send + Sync {
    /// Atomically increments the failure counter for `identifier` and
    /// (re)arms its expiry window. Returns the new count.
    async fn record_failure(
        &self,
        identifier: &str,
        window: Duration,
    ) -> Result<u64, StoreError>;

    /// Checks whether `identifier` is currently locked.
    async fn is_locked(&self, identifier: &str) -> Result<bool, StoreError>;

    /// Locks `identifier` for `duration`.
    async fn lock(&self, identifier: &str, duration: Duration) -> Result<(), StoreError>;

    /// Deletes the failure counter for `identifier`.
    async fn reset(&self, identifier: &str) -> Result<(), StoreError>;
}
