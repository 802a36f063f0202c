//! Token service module
//!
//! This module handles all token-related operations:
//! - Ed25519 key generation, persistence, and loading
//! - EdDSA token signing and verification
//! - Token pair issuance, refresh, validation, and revocation

mod codec;
mod config;
mod key_manager;
mod service;

#[cfg(test)]
mod tests;

pub use codec::TokenCodec;
pub use config::TokenServiceConfig;
pub use key_manager::{
    Ed25519KeyManager, PRIVATE_KEY_FILE, PRIVATE_KEY_PEM_TYPE, PUBLIC_KEY_FILE,
    PUBLIC_KEY_PEM_TYPE,
};
pub use service::TokenService;
