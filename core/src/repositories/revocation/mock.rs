//! Mock implementations of the revocation store for testing.

use std::collections::HashMap;
use std::sync::Arc;
use std::time::{Duration, Instant};

use async_trait::async_trait;
use tokio::sync::RwLock;

use crate::errors::StoreError;

use super::r#trait::RevocationStore;

/// In-memory revocation store honouring entry TTLs.
#[derive(Clone)]
pub struct MockRevocationStore {
    entries: Arc<RwLock<HashMap<String, Instant>>>,
}

impl MockRevocationStore {
    /// Create a new empty mock store
    pub fn new() -> Self {
        Self {
            entries: Arc::new(RwLock::new(HashMap::new())),
        }
    }

    /// Number of live (unexpired) entries
    pub async fn len(&self) -> usize {
        let now = Instant::now();
        self.entries
            .read()
            .await
            .values()
            .filter(|expires| **expires > now)
            .count()
    }
}

impl Default for MockRevocationStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl RevocationStore for MockRevocationStore {
    async fn revoke(&self, token_id: &str, ttl: Duration) -> Result<(), StoreError> {
        let mut entries = self.entries.write().await;
        entries.insert(token_id.to_string(), Instant::now() + ttl);
        Ok(())
    }

    async fn is_revoked(&self, token_id: &str) -> Result<bool, StoreError> {
        let entries = self.entries.read().await;
        Ok(entries
            .get(token_id)
            .is_some_and(|expires| *expires > Instant::now()))
    }
}

/// A store whose every operation fails with `StoreError::Unavailable`.
///
/// Used to exercise the fail-open/fail-closed policy paths.
pub struct UnavailableStore;

#[async_trait]
impl RevocationStore for UnavailableStore {
    async fn revoke(&self, _token_id: &str, _ttl: Duration) -> Result<(), StoreError> {
        Err(StoreError::unavailable("store is down"))
    }

    async fn is_revoked(&self, _token_id: &str) -> Result<bool, StoreError> {
        Err(StoreError::unavailable("store is down"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_revoke_and_query() {
        let store = MockRevocationStore::new();

        assert!(!store.is_revoked("token-1").await.unwrap());
        store
            .revoke("token-1", Duration::from_secs(60))
            .await
            .unwrap();
        assert!(store.is_revoked("token-1").await.unwrap());
        assert_eq!(store.len().await, 1);
    }

    #[tokio::test]
    async fn test_revoke_is_idempotent() {
        let store = MockRevocationStore::new();

        store
            .revoke("token-1", Duration::from_secs(60))
            .await
            .unwrap();
        store
            .revoke("token-1", Duration::from_secs(60))
            .await
            .unwrap();

        assert!(store.is_revoked("token-1").await.unwrap());
        assert_eq!(store.len().await, 1);
    }

    #[tokio::test]
    async fn test_entry_expires() {
        let store = MockRevocationStore::new();

        store
            .revoke("token-1", Duration::from_millis(20))
            .await
            .unwrap();
        tokio::time::sleep(Duration::from_millis(50)).await;

        assert!(!store.is_revoked("token-1").await.unwrap());
    }

    #[tokio::test]
    async fn test_unavailable_store_errors() {
        let store = UnavailableStore;
        let result = store.is_revoked("token-1").await;
        assert!(matches!(result, Err(StoreError::Unavailable { .. })));
    }
}
