//! Redis-backed token revocation store.

use std::time::Duration;

use async_trait::async_trait;
use tracing::debug;

use kf_core::errors::StoreError;
use kf_core::repositories::RevocationStore;

use crate::cache::RedisClient;

/// Default key prefix for blacklist entries
pub const BLACKLIST_KEY_PREFIX: &str = "token:blacklist:";

/// Revocation store backed by Redis.
///
/// Entries are plain `SET ... EX` markers, so re-revoking an ID simply
/// rewrites the marker (idempotent) and expiry is handled entirely by
/// Redis.
pub struct RedisRevocationStore {
    client: RedisClient,
    key_prefix: String,
}

impl RedisRevocationStore {
    /// Create a store with the default `token:blacklist:` prefix
    pub fn new(client: RedisClient) -> Self {
        Self {
            client,
            key_prefix: BLACKLIST_KEY_PREFIX.to_string(),
        }
    }

    /// Override the key prefix
    pub fn with_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.key_prefix = prefix.into();
        self
    }

    fn key(&self, token_id: &str) -> String {
        format!("{}{}", self.key_prefix, token_id)
    }
}

#[async_trait]
impl RevocationStore for RedisRevocationStore {
    async fn revoke(&self, token_id: &str, ttl: Duration) -> Result<(), StoreError> {
        let key = self.key(token_id);
        // A zero TTL would make SET EX fail; clamp to one second
        let ttl_seconds = ttl.as_secs().max(1);

        self.client
            .set_with_expiry(&key, "revoked", ttl_seconds)
            .await?;
        debug!(token_id, ttl_seconds, "blacklisted token id");
        Ok(())
    }

    async fn is_revoked(&self, token_id: &str) -> Result<bool, StoreError> {
        self.client.exists(&self.key(token_id)).await
    }
}
