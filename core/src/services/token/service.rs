//! Main token service implementation

use tracing::{debug, info, warn};
use uuid::Uuid;

use kf_shared::config::FailurePolicy;

use crate::domain::entities::token::{Claims, TokenPair};
use crate::errors::{DomainError, TokenError};
use crate::repositories::RevocationStore;

use super::codec::TokenCodec;
use super::config::TokenServiceConfig;
use super::key_manager::Ed25519KeyManager;

/// Service combining signing, verification, and revocation into the
/// issue / refresh / validate / revoke contract.
pub struct TokenService<S: RevocationStore> {
    codec: TokenCodec,
    store: S,
    config: TokenServiceConfig,
}

impl<S: RevocationStore> TokenService<S> {
    /// Creates a new token service instance.
    ///
    /// The key pair is read through `keys` at construction time; the
    /// service holds no key material beyond the derived signing and
    /// verification keys.
    pub fn new(store: S, keys: &Ed25519KeyManager, config: TokenServiceConfig) -> Self {
        let codec = TokenCodec::new(keys, config.issuer.clone());
        Self {
            codec,
            store,
            config,
        }
    }

    /// Issues a fresh access/refresh pair for a user.
    ///
    /// Both tokens share one newly minted token ID so a single revocation
    /// covers the pair; they expire independently.
    pub async fn issue(&self, user_id: &str, username: &str) -> Result<TokenPair, DomainError> {
        let token_id = Uuid::new_v4().to_string();

        let access_token =
            self.codec
                .sign(user_id, username, &token_id, self.config.access_token_ttl)?;
        let refresh_token =
            self.codec
                .sign(user_id, username, &token_id, self.config.refresh_token_ttl)?;

        debug!(user_id, token_id, "issued token pair");

        Ok(TokenPair::new(
            access_token,
            refresh_token,
            self.config.access_token_ttl.as_secs() as i64,
            self.config.refresh_token_ttl.as_secs() as i64,
        ))
    }

    /// Re-issues the access token from a refresh token.
    ///
    /// The new access token is bound to the same identity and token ID as
    /// the refresh token. The refresh token is returned unchanged, not
    /// rotated: revocation is keyed by the shared token ID, so a rotated
    /// sibling could never be invalidated on its own, and reuse keeps the
    /// session bounded by the refresh token's original expiry.
    pub async fn refresh(&self, refresh_token: &str) -> Result<TokenPair, DomainError> {
        let claims = self.codec.verify(refresh_token)?;

        if self.is_revoked_with_policy(&claims.jti).await? {
            warn!(token_id = %claims.jti, "refresh attempted with revoked token");
            return Err(TokenError::Revoked.into());
        }

        let access_token = self.codec.sign(
            &claims.sub,
            &claims.username,
            &claims.jti,
            self.config.access_token_ttl,
        )?;

        debug!(user_id = %claims.sub, token_id = %claims.jti, "refreshed access token");

        Ok(TokenPair::new(
            access_token,
            refresh_token.to_string(),
            self.config.access_token_ttl.as_secs() as i64,
            claims.remaining_seconds(),
        ))
    }

    /// Verifies an access token and returns its claims.
    ///
    /// Cryptographic/expiry failures and explicit revocation are distinct
    /// error variants so logs can tell them apart, even if the transport
    /// layer collapses both into one unauthorized response.
    pub async fn validate(&self, access_token: &str) -> Result<Claims, DomainError> {
        let claims = self.codec.verify(access_token)?;

        if self.is_revoked_with_policy(&claims.jti).await? {
            warn!(token_id = %claims.jti, "rejected revoked token");
            return Err(TokenError::Revoked.into());
        }

        Ok(claims)
    }

    /// Revokes every token sharing `token_id`.
    ///
    /// The blacklist entry lives for the configured refresh-token expiry,
    /// the longest lifetime any token with this ID can still have.
    pub async fn revoke(&self, token_id: &str) -> Result<(), DomainError> {
        self.store
            .revoke(token_id, self.config.refresh_token_ttl)
            .await?;
        info!(token_id, "revoked token");
        Ok(())
    }

    /// Access to the codec, for callers that only need verification.
    pub fn codec(&self) -> &TokenCodec {
        &self.codec
    }

    async fn is_revoked_with_policy(&self, token_id: &str) -> Result<bool, DomainError> {
        match self.store.is_revoked(token_id).await {
            Ok(revoked) => Ok(revoked),
            Err(e) => match self.config.failure_policy {
                FailurePolicy::FailClosed => {
                    warn!(token_id, error = %e, "revocation store unavailable, denying (fail-closed)");
                    Err(e.into())
                }
                FailurePolicy::FailOpen => {
                    warn!(token_id, error = %e, "revocation store unavailable, allowing (fail-open)");
                    Ok(false)
                }
            },
        }
    }
}
