//! Configuration module with business-specific sub-modules
//!
//! This module organizes configuration into logical areas:
//! - `auth` - Token issuance and signing key configuration
//! - `cache` - Redis connection configuration
//! - `throttle` - Login attempt throttling and lockout configuration

pub mod auth;
pub mod cache;
pub mod throttle;

use serde::{Deserialize, Serialize};

// Re-export commonly used types
pub use auth::{FailurePolicy, KeysConfig, TokenConfig};
pub use cache::CacheConfig;
pub use throttle::ThrottleConfig;

/// Complete authentication subsystem configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct AppConfig {
    /// Token issuance configuration
    pub token: TokenConfig,

    /// Signing key configuration
    #[serde(default)]
    pub keys: KeysConfig,

    /// Redis cache configuration
    #[serde(default)]
    pub cache: CacheConfig,

    /// Login throttling configuration
    #[serde(default)]
    pub throttle: ThrottleConfig,
}

impl AppConfig {
    /// Load the full configuration from environment variables
    ///
    /// Reads a `.env` file first when one is present.
    pub fn from_env() -> Self {
        dotenvy::dotenv().ok();

        Self {
            token: TokenConfig::from_env(),
            keys: KeysConfig::from_env(),
            cache: CacheConfig::from_env(),
            throttle: ThrottleConfig::from_env(),
        }
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            token: TokenConfig::default(),
            keys: KeysConfig::default(),
            cache: CacheConfig::default(),
            throttle: ThrottleConfig::default(),
        }
    }
}
