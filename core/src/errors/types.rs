//! Error type definitions for key handling, tokens, throttling, and the
//! backing store.
//!
//! Deny outcomes are deliberately fine-grained here so logs can tell a
//! forged token from a stale one from a revoked one; collapsing them into a
//! single unauthorized response is the transport layer's concern.

use thiserror::Error;

/// Signing key errors
#[derive(Error, Debug)]
pub enum KeyError {
    #[error("Failed to read or write key material: {message}")]
    Io { message: String },

    #[error("Malformed PEM block: {message}")]
    InvalidPem { message: String },

    #[error("Invalid {kind} key length (expected {expected} bytes, got {actual})")]
    InvalidKeyLength {
        kind: &'static str,
        expected: usize,
        actual: usize,
    },

    #[error("Public key does not match private key")]
    KeyMismatch,
}

/// Token-related errors
#[derive(Error, Debug)]
pub enum TokenError {
    #[error("Token expired")]
    Expired,

    #[error("Token not yet valid")]
    NotYetValid,

    #[error("Invalid token")]
    Invalid,

    #[error("Token algorithm mismatch: expected EdDSA, got {algorithm}")]
    AlgorithmMismatch { algorithm: String },

    #[error("Token revoked")]
    Revoked,

    #[error("Token generation failed")]
    GenerationFailed,

    #[error("Missing required claim: {claim}")]
    MissingClaim { claim: String },
}

/// Login throttling errors
#[derive(Error, Debug)]
pub enum ThrottleError {
    #[error("Identifier is temporarily locked")]
    Locked,
}

/// Errors surfaced by the backing key-value store
#[derive(Error, Debug)]
pub enum StoreError {
    /// The store is unreachable or the operation timed out. Retryable.
    #[error("Store unavailable: {message}")]
    Unavailable { message: String },

    /// The store answered but the operation failed.
    #[error("Store operation failed: {message}")]
    Operation { message: String },
}

impl StoreError {
    pub fn unavailable(message: impl Into<String>) -> Self {
        StoreError::Unavailable {
            message: message.into(),
        }
    }

    pub fn operation(message: impl Into<String>) -> Self {
        StoreError::Operation {
            message: message.into(),
        }
    }
}
