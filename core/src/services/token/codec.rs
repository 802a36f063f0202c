//! Signing and verification of claim sets as compact EdDSA tokens.

use std::time::Duration;

use jsonwebtoken::{decode, decode_header, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};

use crate::domain::entities::token::Claims;
use crate::errors::{DomainError, TokenError};

use super::key_manager::Ed25519KeyManager;

/// Encodes claims into signed token strings and decodes them back.
///
/// Only EdDSA is accepted; a token whose header declares any other
/// algorithm is rejected before signature verification, closing the
/// algorithm-confusion hole.
pub struct TokenCodec {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    validation: Validation,
    issuer: String,
}

impl TokenCodec {
    /// Creates a codec bound to the key pair held by `keys`.
    pub fn new(keys: &Ed25519KeyManager, issuer: impl Into<String>) -> Self {
        let issuer = issuer.into();

        let mut validation = Validation::new(Algorithm::EdDSA);
        validation.set_issuer(&[&issuer]);
        validation.validate_exp = true;
        validation.validate_nbf = true;
        validation.leeway = 0;

        Self {
            encoding_key: keys.encoding_key().clone(),
            decoding_key: keys.decoding_key().clone(),
            validation,
            issuer,
        }
    }

    /// Signs a claim set valid from now for `ttl`.
    ///
    /// `iat` and `nbf` are both stamped with the current time, truncated
    /// to whole seconds.
    pub fn sign(
        &self,
        user_id: &str,
        username: &str,
        token_id: &str,
        ttl: Duration,
    ) -> Result<String, DomainError> {
        let claims = Claims::new(user_id, username, token_id, &self.issuer, ttl.as_secs() as i64);
        self.sign_claims(&claims)
    }

    /// Signs an already-built claim set.
    pub(crate) fn sign_claims(&self, claims: &Claims) -> Result<String, DomainError> {
        let header = Header::new(Algorithm::EdDSA);
        encode(&header, claims, &self.encoding_key)
            .map_err(|_| DomainError::Token(TokenError::GenerationFailed))
    }

    /// Verifies a token and returns its claims.
    ///
    /// Fails with `TokenError::Expired` when only the expiry check fails,
    /// `TokenError::NotYetValid` before `nbf`, `TokenError::AlgorithmMismatch`
    /// for a header declaring anything other than EdDSA, and
    /// `TokenError::Invalid` for every other failure (bad signature,
    /// malformed structure, wrong issuer, missing claim).
    pub fn verify(&self, token: &str) -> Result<Claims, DomainError> {
        let header = decode_header(token).map_err(|_| DomainError::Token(TokenError::Invalid))?;
        if header.alg != Algorithm::EdDSA {
            return Err(TokenError::AlgorithmMismatch {
                algorithm: format!("{:?}", header.alg),
            }
            .into());
        }

        let token_data =
            decode::<Claims>(token, &self.decoding_key, &self.validation).map_err(|e| {
                match e.kind() {
                    jsonwebtoken::errors::ErrorKind::ExpiredSignature => TokenError::Expired,
                    jsonwebtoken::errors::ErrorKind::ImmatureSignature => TokenError::NotYetValid,
                    jsonwebtoken::errors::ErrorKind::MissingRequiredClaim(claim) => {
                        TokenError::MissingClaim {
                            claim: claim.clone(),
                        }
                    }
                    _ => TokenError::Invalid,
                }
            })?;

        Ok(token_data.claims)
    }

    /// Convenience check that a token verifies cleanly.
    pub fn is_valid(&self, token: &str) -> bool {
        self.verify(token).is_ok()
    }

    /// The issuer stamped into signed tokens.
    pub fn issuer(&self) -> &str {
        &self.issuer
    }
}
