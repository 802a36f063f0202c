//! Redis-backed login throttle store.

use std::time::Duration;

use async_trait::async_trait;

use kf_core::errors::StoreError;
use kf_core::repositories::LoginThrottleStore;
use kf_shared::config::ThrottleConfig;

use crate::cache::RedisClient;

/// Login throttle store backed by Redis.
///
/// The attempt counter uses an atomic INCR+EXPIRE pipeline; the lock
/// marker is an independent `SET ... EX` key, so each expires on its own
/// schedule.
pub struct RedisLoginThrottle {
    client: RedisClient,
    attempts_key_prefix: String,
    lock_key_prefix: String,
}

impl RedisLoginThrottle {
    /// Create a store using the key prefixes from `config`
    pub fn new(client: RedisClient, config: &ThrottleConfig) -> Self {
        Self {
            client,
            attempts_key_prefix: config.attempts_key_prefix.clone(),
            lock_key_prefix: config.lock_key_prefix.clone(),
        }
    }

    fn attempts_key(&self, identifier: &str) -> String {
        format!("{}{}", self.attempts_key_prefix, identifier)
    }

    fn lock_key(&self, identifier: &str) -> String {
        format!("{}{}", self.lock_key_prefix, identifier)
    }
}

#[async_trait]
impl LoginThrottleStore for RedisLoginThrottle {
    async fn record_failure(
        &self,
        identifier: &str,
        window: Duration,
    ) -> Result<u64, StoreError> {
        let key = self.attempts_key(identifier);
        let count = self
            .client
            .incr_with_expiry(&key, window.as_secs().max(1))
            .await?;
        Ok(count.max(0) as u64)
    }

    async fn is_locked(&self, identifier: &str) -> Result<bool, StoreError> {
        self.client.exists(&self.lock_key(identifier)).await
    }

    async fn lock(&self, identifier: &str, duration: Duration) -> Result<(), StoreError> {
        self.client
            .set_with_expiry(&self.lock_key(identifier), "locked", duration.as_secs().max(1))
            .await
    }

    async fn reset(&self, identifier: &str) -> Result<(), StoreError> {
        self.client.delete(&self.attempts_key(identifier)).await?;
        Ok(())
    }
}
