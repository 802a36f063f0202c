//! Redis-backed implementations of the core store traits.

pub mod revocation;
pub mod throttle;

pub use revocation::RedisRevocationStore;
pub use throttle::RedisLoginThrottle;
