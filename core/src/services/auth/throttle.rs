//! Login throttle service for brute force protection
//!
//! Rate-limits authentication attempts per identifier (username, IP) and
//! locks an identifier once its failure count crosses the configured
//! threshold. The lock expires on its own, independently of the attempt
//! counter.

use std::time::Duration;

use tracing::{info, warn};

use kf_shared::config::{FailurePolicy, ThrottleConfig};

use crate::errors::{DomainError, ThrottleError};
use crate::repositories::LoginThrottleStore;

/// Service enforcing the lockout policy over a [`LoginThrottleStore`].
pub struct LoginThrottleService<T: LoginThrottleStore> {
    store: T,
    config: ThrottleConfig,
}

impl<T: LoginThrottleStore> LoginThrottleService<T> {
    /// Create a new throttle service
    pub fn new(store: T, config: ThrottleConfig) -> Self {
        Self { store, config }
    }

    /// Create a new throttle service with default configuration
    pub fn with_defaults(store: T) -> Self {
        Self::new(store, ThrottleConfig::default())
    }

    /// Fails with `ThrottleError::Locked` when the identifier is locked.
    ///
    /// Call before checking credentials. Store unavailability follows the
    /// configured failure policy.
    pub async fn check(&self, identifier: &str) -> Result<(), DomainError> {
        if self.is_locked(identifier).await? {
            return Err(ThrottleError::Locked.into());
        }
        Ok(())
    }

    /// Records a failed authentication attempt and returns the new count.
    ///
    /// Locks the identifier immediately once the count reaches the
    /// configured threshold.
    pub async fn record_failure(&self, identifier: &str) -> Result<u64, DomainError> {
        let window = Duration::from_secs(self.config.attempt_window);
        let attempts = self.store.record_failure(identifier, window).await?;

        warn!(
            identifier,
            attempts,
            max_attempts = self.config.max_attempts,
            "failed authentication attempt recorded"
        );

        if attempts >= self.config.max_attempts {
            self.lock(identifier).await?;
        }

        Ok(attempts)
    }

    /// Clears the attempt counter after a successful authentication.
    pub async fn record_success(&self, identifier: &str) -> Result<(), DomainError> {
        self.store.reset(identifier).await?;
        Ok(())
    }

    /// Whether the identifier is currently locked.
    ///
    /// Store unavailability follows the configured failure policy:
    /// fail-closed surfaces the store error (denying access), fail-open
    /// reports "not locked".
    pub async fn is_locked(&self, identifier: &str) -> Result<bool, DomainError> {
        match self.store.is_locked(identifier).await {
            Ok(locked) => Ok(locked),
            Err(e) => match self.config.failure_policy {
                FailurePolicy::FailClosed => {
                    warn!(identifier, error = %e, "throttle store unavailable, denying (fail-closed)");
                    Err(e.into())
                }
                FailurePolicy::FailOpen => {
                    warn!(identifier, error = %e, "throttle store unavailable, allowing (fail-open)");
                    Ok(false)
                }
            },
        }
    }

    /// Locks the identifier for the configured duration.
    pub async fn lock(&self, identifier: &str) -> Result<(), DomainError> {
        let duration = Duration::from_secs(self.config.lock_duration);
        self.store.lock(identifier, duration).await?;

        info!(
            identifier,
            duration_seconds = self.config.lock_duration,
            "identifier locked after repeated failures"
        );

        Ok(())
    }
}
