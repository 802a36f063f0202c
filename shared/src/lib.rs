//! Shared configuration types for KeyFort services
//!
//! This crate provides the configuration surface used across the server
//! modules: token issuance settings, signing key locations, Redis cache
//! settings, and login throttling policy.

pub mod config;

// Re-export commonly used items at crate root
pub use config::{
    AppConfig, CacheConfig, FailurePolicy, KeysConfig, ThrottleConfig, TokenConfig,
};
