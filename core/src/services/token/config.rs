//! Configuration for the token service

use std::time::Duration;

use kf_shared::config::{FailurePolicy, TokenConfig};

/// Configuration for the token service
#[derive(Debug, Clone)]
pub struct TokenServiceConfig {
    /// Issuer claim stamped into every token
    pub issuer: String,
    /// Access token time to live
    pub access_token_ttl: Duration,
    /// Refresh token time to live
    pub refresh_token_ttl: Duration,
    /// Behaviour when the revocation store is unavailable
    pub failure_policy: FailurePolicy,
}

impl Default for TokenServiceConfig {
    fn default() -> Self {
        Self {
            issuer: "keyfort".to_string(),
            access_token_ttl: Duration::from_secs(3600),
            refresh_token_ttl: Duration::from_secs(604800),
            failure_policy: FailurePolicy::FailClosed,
        }
    }
}

impl From<TokenConfig> for TokenServiceConfig {
    fn from(config: TokenConfig) -> Self {
        Self {
            issuer: config.issuer,
            access_token_ttl: Duration::from_secs(config.access_token_expiry.max(0) as u64),
            refresh_token_ttl: Duration::from_secs(config.refresh_token_expiry.max(0) as u64),
            failure_policy: config.failure_policy,
        }
    }
}
