//! Mock implementation of the login throttle store for testing.

use std::collections::HashMap;
use std::sync::Arc;
use std::time::{Duration, Instant};

use async_trait::async_trait;
use tokio::sync::RwLock;

use crate::errors::StoreError;

use super::r#trait::LoginThrottleStore;

struct Counter {
    count: u64,
    expires_at: Instant,
}

/// In-memory login throttle store honouring counter windows and lock TTLs.
#[derive(Clone)]
pub struct MockLoginThrottleStore {
    counters: Arc<RwLock<HashMap<String, Counter>>>,
    locks: Arc<RwLock<HashMap<String, Instant>>>,
}

impl MockLoginThrottleStore {
    /// Create a new empty mock store
    pub fn new() -> Self {
        Self {
            counters: Arc::new(RwLock::new(HashMap::new())),
            locks: Arc::new(RwLock::new(HashMap::new())),
        }
    }

    /// Current counter value for an identifier (zero if absent or expired)
    pub async fn attempts(&self, identifier: &str) -> u64 {
        let counters = self.counters.read().await;
        counters
            .get(identifier)
            .filter(|c| c.expires_at > Instant::now())
            .map(|c| c.count)
            .unwrap_or(0)
    }
}

impl Default for MockLoginThrottleStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl LoginThrottleStore for MockLoginThrottleStore {
    async fn record_failure(
        &self,
        identifier: &str,
        window: Duration,
    ) -> Result<u64, StoreError> {
        let mut counters = self.counters.write().await;
        let now = Instant::now();

        let counter = counters
            .entry(identifier.to_string())
            .and_modify(|c| {
                if c.expires_at <= now {
                    c.count = 0;
                }
                c.count += 1;
                c.expires_at = now + window;
            })
            .or_insert(Counter {
                count: 1,
                expires_at: now + window,
            });

        Ok(counter.count)
    }

    async fn is_locked(&self, identifier: &str) -> Result<bool, StoreError> {
        let locks = self.locks.read().await;
        Ok(locks
            .get(identifier)
            .is_some_and(|expires| *expires > Instant::now()))
    }

    async fn lock(&self, identifier: &str, duration: Duration) -> Result<(), StoreError> {
        let mut locks = self.locks.write().await;
        locks.insert(identifier.to_string(), Instant::now() + duration);
        Ok(())
    }

    async fn reset(&self, identifier: &str) -> Result<(), StoreError> {
        let mut counters = self.counters.write().await;
        counters.remove(identifier);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_record_failure_accumulates() {
        let store = MockLoginThrottleStore::new();
        let window = Duration::from_secs(60);

        assert_eq!(store.record_failure("alice", window).await.unwrap(), 1);
        assert_eq!(store.record_failure("alice", window).await.unwrap(), 2);
        assert_eq!(store.record_failure("alice", window).await.unwrap(), 3);
        assert_eq!(store.attempts("alice").await, 3);
    }

    #[tokio::test]
    async fn test_counter_resets_after_window() {
        let store = MockLoginThrottleStore::new();
        let window = Duration::from_millis(20);

        store.record_failure("alice", window).await.unwrap();
        tokio::time::sleep(Duration::from_millis(50)).await;

        assert_eq!(store.attempts("alice").await, 0);
        assert_eq!(store.record_failure("alice", window).await.unwrap(), 1);
    }

    #[tokio::test]
    async fn test_lock_and_reset_are_independent() {
        let store = MockLoginThrottleStore::new();

        store
            .record_failure("alice", Duration::from_secs(60))
            .await
            .unwrap();
        store.lock("alice", Duration::from_secs(60)).await.unwrap();
        store.reset("alice").await.unwrap();

        assert_eq!(store.attempts("alice").await, 0);
        assert!(store.is_locked("alice").await.unwrap());
    }

    #[tokio::test]
    async fn test_lock_expires() {
        let store = MockLoginThrottleStore::new();

        store
            .lock("alice", Duration::from_millis(20))
            .await
            .unwrap();
        assert!(store.is_locked("alice").await.unwrap());

        tokio::time::sleep(Duration::from_millis(50)).await;
        assert!(!store.is_locked("alice").await.unwrap());
    }
}
