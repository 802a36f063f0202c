//! Login attempt throttling and lockout configuration

use serde::{Deserialize, Serialize};

use super::auth::FailurePolicy;

/// Configuration for login attempt throttling
///
/// The attempt counter and the lock marker are independent keys: a lock
/// lasts its full configured duration even if the counter expires first.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ThrottleConfig {
    /// Failed attempts before the identifier is locked
    pub max_attempts: u64,

    /// Sliding window for the attempt counter in seconds
    pub attempt_window: u64,

    /// Lock duration in seconds
    pub lock_duration: u64,

    /// Key prefix for attempt counters
    #[serde(default = "default_attempts_prefix")]
    pub attempts_key_prefix: String,

    /// Key prefix for lock markers
    #[serde(default = "default_lock_prefix")]
    pub lock_key_prefix: String,

    /// Behaviour when the store cannot answer a lock query
    #[serde(default)]
    pub failure_policy: FailurePolicy,
}

impl Default for ThrottleConfig {
    fn default() -> Self {
        Self {
            max_attempts: 5,
            attempt_window: 3600, // 1 hour
            lock_duration: 3600,  // 1 hour
            attempts_key_prefix: default_attempts_prefix(),
            lock_key_prefix: default_lock_prefix(),
            failure_policy: FailurePolicy::default(),
        }
    }
}

impl ThrottleConfig {
    /// Create from environment variables
    pub fn from_env() -> Self {
        let max_attempts = std::env::var("KEYFORT_MAX_LOGIN_ATTEMPTS")
            .unwrap_or_else(|_| "5".to_string())
            .parse()
            .unwrap_or(5);
        let attempt_window = std::env::var("KEYFORT_ATTEMPT_WINDOW")
            .unwrap_or_else(|_| "3600".to_string())
            .parse()
            .unwrap_or(3600);
        let lock_duration = std::env::var("KEYFORT_LOCK_DURATION")
            .unwrap_or_else(|_| "3600".to_string())
            .parse()
            .unwrap_or(3600);

        Self {
            max_attempts,
            attempt_window,
            lock_duration,
            ..Default::default()
        }
    }

    /// Redis key for an identifier's attempt counter
    pub fn attempts_key(&self, identifier: &str) -> String {
        format!("{}{}", self.attempts_key_prefix, identifier)
    }

    /// Redis key for an identifier's lock marker
    pub fn lock_key(&self, identifier: &str) -> String {
        format!("{}{}", self.lock_key_prefix, identifier)
    }
}

fn default_attempts_prefix() -> String {
    String::from("login:attempts:")
}

fn default_lock_prefix() -> String {
    String::from("login:lock:")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_throttle_config_default() {
        let config = ThrottleConfig::default();
        assert_eq!(config.max_attempts, 5);
        assert_eq!(config.attempt_window, 3600);
        assert_eq!(config.lock_duration, 3600);
        assert_eq!(config.failure_policy, FailurePolicy::FailClosed);
    }

    #[test]
    fn test_key_construction() {
        let config = ThrottleConfig::default();
        assert_eq!(config.attempts_key("alice"), "login:attempts:alice");
        assert_eq!(config.lock_key("alice"), "login:lock:alice");
    }

    #[test]
    fn test_prefix_deserialization_defaults() {
        let config: ThrottleConfig = serde_json::from_str(
            r#"{"max_attempts": 3, "attempt_window": 600, "lock_duration": 1800}"#,
        )
        .unwrap();
        assert_eq!(config.max_attempts, 3);
        assert_eq!(config.attempts_key_prefix, "login:attempts:");
        assert_eq!(config.lock_key_prefix, "login:lock:");
    }
}
