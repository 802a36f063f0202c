//! Cache module for Redis-based storage
//!
//! This module provides the Redis client used by the revocation and
//! throttle stores, with connection retry and per-operation timeouts.

pub mod redis_client;

pub use redis_client::RedisClient;

// Re-export commonly used types
pub use kf_shared::config::CacheConfig;
