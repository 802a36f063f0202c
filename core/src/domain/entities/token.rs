//! Token entities for EdDSA-signed authentication tokens.

use chrono::Utc;
use serde::{Deserialize, Serialize};

/// Claims structure carried in the signed token payload.
///
/// Access and refresh tokens issued together share one `jti`, so revoking
/// that id covers both. Invariant: `iat <= nbf <= exp`. All timestamps are
/// integer seconds since the epoch; no clock skew is tolerated on top of
/// the stated window.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Claims {
    /// Subject (user ID)
    pub sub: String,

    /// Username at issuance time
    pub username: String,

    /// Token ID shared by an access/refresh pair, used as the revocation key
    pub jti: String,

    /// Issuer
    pub iss: String,

    /// Issued at timestamp
    pub iat: i64,

    /// Not before timestamp
    pub nbf: i64,

    /// Expiration timestamp
    pub exp: i64,
}

impl Claims {
    /// Creates claims valid from now until `ttl_seconds` from now.
    ///
    /// `iat` and `nbf` are both stamped with the current time, so the
    /// validity window is exactly `[now, now + ttl_seconds]`.
    pub fn new(
        user_id: impl Into<String>,
        username: impl Into<String>,
        token_id: impl Into<String>,
        issuer: impl Into<String>,
        ttl_seconds: i64,
    ) -> Self {
        let now = Utc::now().timestamp();

        Self {
            sub: user_id.into(),
            username: username.into(),
            jti: token_id.into(),
            iss: issuer.into(),
            iat: now,
            nbf: now,
            exp: now + ttl_seconds,
        }
    }

    /// Gets the user ID from the claims
    pub fn user_id(&self) -> &str {
        &self.sub
    }

    /// Gets the token ID from the claims
    pub fn token_id(&self) -> &str {
        &self.jti
    }

    /// Checks if the claims have expired
    pub fn is_expired(&self) -> bool {
        Utc::now().timestamp() >= self.exp
    }

    /// Checks if the claims are inside their validity window
    pub fn is_valid(&self) -> bool {
        let now = Utc::now().timestamp();
        now >= self.nbf && now < self.exp
    }

    /// Seconds until expiry, or zero if already expired
    pub fn remaining_seconds(&self) -> i64 {
        (self.exp - Utc::now().timestamp()).max(0)
    }
}

/// Token pair returned to the client
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenPair {
    /// Signed access token
    pub access_token: String,

    /// Signed refresh token
    pub refresh_token: String,

    /// Access token expiry time in seconds
    pub access_expires_in: i64,

    /// Refresh token expiry time in seconds
    pub refresh_expires_in: i64,
}

impl TokenPair {
    /// Creates a new token pair
    pub fn new(
        access_token: String,
        refresh_token: String,
        access_expires_in: i64,
        refresh_expires_in: i64,
    ) -> Self {
        Self {
            access_token,
            refresh_token,
            access_expires_in,
            refresh_expires_in,
        }
    }
}
