//! Store traits consumed by the authentication services, with in-memory
//! mock implementations for testing.
//!
//! The backing key-value store is an external collaborator; these traits
//! capture the narrow contract the subsystem needs from it.

pub mod revocation;
pub mod throttle;

pub use revocation::{MockRevocationStore, RevocationStore, UnavailableStore};
pub use throttle::{LoginThrottleStore, MockLoginThrottleStore};
