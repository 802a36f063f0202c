//! Domain-specific error types and error handling.

mod types;

// Re-export all error types
pub use types::{KeyError, StoreError, ThrottleError, TokenError};

use thiserror::Error;

/// Core domain errors (general purpose)
#[derive(Error, Debug)]
pub enum DomainError {
    #[error("Validation error: {message}")]
    Validation { message: String },

    #[error("Internal error: {message}")]
    Internal { message: String },

    // Bridge to specific error types
    #[error(transparent)]
    Key(#[from] KeyError),

    #[error(transparent)]
    Token(#[from] TokenError),

    #[error(transparent)]
    Throttle(#[from] ThrottleError),

    #[error(transparent)]
    Store(#[from] StoreError),
}

impl DomainError {
    /// Whether this error denies access to the caller.
    ///
    /// All deny outcomes (invalid, expired, revoked, locked) map to one
    /// generic unauthorized response at the transport boundary; the precise
    /// variant stays available here for logging.
    pub fn is_access_denied(&self) -> bool {
        matches!(
            self,
            DomainError::Token(
                TokenError::Invalid
                    | TokenError::AlgorithmMismatch { .. }
                    | TokenError::Expired
                    | TokenError::NotYetValid
                    | TokenError::Revoked
                    | TokenError::MissingClaim { .. }
            ) | DomainError::Throttle(ThrottleError::Locked)
        )
    }

    /// Whether retrying the operation may succeed.
    ///
    /// Cryptographic and format errors are deterministic and never
    /// retryable; store unavailability is.
    pub fn is_retryable(&self) -> bool {
        matches!(self, DomainError::Store(StoreError::Unavailable { .. }))
    }
}

pub type DomainResult<T> = Result<T, DomainError>;
