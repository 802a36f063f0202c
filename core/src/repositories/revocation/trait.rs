//! Revocation store trait definition.

use std::time::Duration;

use async_trait::async_trait;

use crate::errors::StoreError;

/// Tracks revoked token identifiers with a bounded lifetime.
///
/// Entries expire on their own once the underlying token would have
/// expired anyway, which bounds blacklist growth. Implementations must
/// surface store failures rather than defaulting to "not revoked"; the
/// fail-open/fail-closed decision belongs to the caller.
#[async_trait]
pub trait RevocationStore: Send + Sync {
    /// Marks a token ID as revoked for `ttl`.
    ///
    /// Revoking an already-revoked ID is a no-op success.
    async fn revoke(&self, token_id: &str, ttl: Duration) -> Result<(), StoreError>;

    /// Checks whether a token ID is currently revoked.
    async fn is_revoked(&self, token_id: &str) -> Result<bool, StoreError>;
}
