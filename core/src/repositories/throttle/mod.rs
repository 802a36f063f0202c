//! Login attempt store.

mod mock;
mod r#trait;

pub use mock::MockLoginThrottleStore;
pub use r#trait::LoginThrottleStore;
