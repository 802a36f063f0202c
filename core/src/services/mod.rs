//! Business services for the authentication subsystem.

pub mod auth;
pub mod token;

pub use auth::LoginThrottleService;
pub use token::{Ed25519KeyManager, TokenCodec, TokenService, TokenServiceConfig};
