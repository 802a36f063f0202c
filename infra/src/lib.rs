//! # Infrastructure Layer
//!
//! Redis-backed implementations of the KeyFort store traits: the token
//! revocation blacklist and the login attempt throttle. Every operation
//! carries an explicit timeout; a timeout or connection failure surfaces
//! as a retryable `StoreError::Unavailable`, never as a silent
//! "not revoked" / "not locked".

/// Cache module - Redis client and operations
pub mod cache;

/// Store implementations backed by the Redis client
pub mod stores;

// Re-export core types for convenience
pub use kf_core::errors::StoreError;

pub use cache::RedisClient;
pub use stores::{RedisLoginThrottle, RedisRevocationStore};
