//! # KeyFort Core
//!
//! Core domain layer for the KeyFort authentication subsystem.
//! This crate contains the token entities, signing key management,
//! token issuance and validation services, store traits for revocation
//! and login throttling, and the error types that tie them together.

pub mod domain;
pub mod errors;
pub mod repositories;
pub mod services;

// Re-export commonly used types for convenience
pub use domain::*;
pub use errors::*;
pub use repositories::*;
pub use services::*;
