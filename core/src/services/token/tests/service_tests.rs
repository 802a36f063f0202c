//! Unit tests for the token service

use std::time::Duration;

use kf_shared::config::FailurePolicy;

use crate::errors::{DomainError, StoreError, TokenError};
use crate::repositories::{MockRevocationStore, UnavailableStore};
use crate::services::token::{Ed25519KeyManager, TokenService, TokenServiceConfig};

fn create_service() -> TokenService<MockRevocationStore> {
    let keys = Ed25519KeyManager::generate();
    TokenService::new(
        MockRevocationStore::new(),
        &keys,
        TokenServiceConfig::default(),
    )
}

#[tokio::test]
async fn test_issue_and_validate_round_trip() {
    let service = create_service();

    let pair = service.issue("user-1", "alice").await.unwrap();
    assert!(!pair.access_token.is_empty());
    assert!(!pair.refresh_token.is_empty());
    assert_eq!(pair.access_expires_in, 3600);
    assert_eq!(pair.refresh_expires_in, 604800);

    let claims = service.validate(&pair.access_token).await.unwrap();
    assert_eq!(claims.user_id(), "user-1");
    assert_eq!(claims.username, "alice");
}

#[tokio::test]
async fn test_pair_shares_token_id() {
    let service = create_service();
    let pair = service.issue("user-1", "alice").await.unwrap();

    let access = service.codec().verify(&pair.access_token).unwrap();
    let refresh = service.codec().verify(&pair.refresh_token).unwrap();

    assert_eq!(access.jti, refresh.jti);
    assert_ne!(pair.access_token, pair.refresh_token);
}

#[tokio::test]
async fn test_each_issue_gets_fresh_token_id() {
    let service = create_service();

    let first = service.issue("user-1", "alice").await.unwrap();
    let second = service.issue("user-1", "alice").await.unwrap();

    let first_claims = service.codec().verify(&first.access_token).unwrap();
    let second_claims = service.codec().verify(&second.access_token).unwrap();
    assert_ne!(first_claims.jti, second_claims.jti);
}

#[tokio::test]
async fn test_refresh_preserves_identity_and_token_id() {
    let service = create_service();
    let pair = service.issue("user-1", "alice").await.unwrap();
    let original = service.codec().verify(&pair.access_token).unwrap();

    // Signing is deterministic, so only a fresh issued-at distinguishes
    // the re-issued token from the original
    tokio::time::sleep(Duration::from_millis(1100)).await;

    let refreshed = service.refresh(&pair.refresh_token).await.unwrap();
    assert_ne!(refreshed.access_token, pair.access_token);
    assert_eq!(refreshed.refresh_token, pair.refresh_token);

    let claims = service.validate(&refreshed.access_token).await.unwrap();
    assert_eq!(claims.user_id(), "user-1");
    assert_eq!(claims.username, "alice");
    assert_eq!(claims.jti, original.jti);
}

#[tokio::test]
async fn test_refresh_rejects_garbage() {
    let service = create_service();
    let result = service.refresh("not-a-token").await;
    assert!(matches!(
        result,
        Err(DomainError::Token(TokenError::Invalid))
    ));
}

#[tokio::test]
async fn test_refresh_rejects_access_style_expiry() {
    let keys = Ed25519KeyManager::generate();
    let config = TokenServiceConfig {
        refresh_token_ttl: Duration::from_secs(1),
        ..Default::default()
    };
    let service = TokenService::new(MockRevocationStore::new(), &keys, config);

    let pair = service.issue("user-1", "alice").await.unwrap();
    tokio::time::sleep(Duration::from_secs(2)).await;

    let result = service.refresh(&pair.refresh_token).await;
    assert!(matches!(
        result,
        Err(DomainError::Token(TokenError::Expired))
    ));
}

#[tokio::test]
async fn test_expired_access_token_rejected() {
    let keys = Ed25519KeyManager::generate();
    let config = TokenServiceConfig {
        access_token_ttl: Duration::from_secs(1),
        ..Default::default()
    };
    let service = TokenService::new(MockRevocationStore::new(), &keys, config);

    let pair = service.issue("user-1", "alice").await.unwrap();
    tokio::time::sleep(Duration::from_secs(2)).await;

    let result = service.validate(&pair.access_token).await;
    assert!(matches!(
        result,
        Err(DomainError::Token(TokenError::Expired))
    ));

    // The refresh token outlives the access token and still works
    assert!(service.refresh(&pair.refresh_token).await.is_ok());
}

#[tokio::test]
async fn test_revocation_covers_both_tokens() {
    let service = create_service();
    let pair = service.issue("user-1", "alice").await.unwrap();
    let claims = service.validate(&pair.access_token).await.unwrap();

    service.revoke(&claims.jti).await.unwrap();

    assert!(matches!(
        service.validate(&pair.access_token).await,
        Err(DomainError::Token(TokenError::Revoked))
    ));
    assert!(matches!(
        service.refresh(&pair.refresh_token).await,
        Err(DomainError::Token(TokenError::Revoked))
    ));
}

#[tokio::test]
async fn test_revoke_is_idempotent() {
    let service = create_service();
    let pair = service.issue("user-1", "alice").await.unwrap();
    let claims = service.validate(&pair.access_token).await.unwrap();

    service.revoke(&claims.jti).await.unwrap();
    service.revoke(&claims.jti).await.unwrap();

    assert!(matches!(
        service.validate(&pair.access_token).await,
        Err(DomainError::Token(TokenError::Revoked))
    ));
}

#[tokio::test]
async fn test_revocation_does_not_leak_across_pairs() {
    let store = MockRevocationStore::new();
    let keys = Ed25519KeyManager::generate();
    let service = TokenService::new(store, &keys, TokenServiceConfig::default());

    let revoked_pair = service.issue("user-1", "alice").await.unwrap();
    let live_pair = service.issue("user-1", "alice").await.unwrap();

    let revoked_claims = service.codec().verify(&revoked_pair.access_token).unwrap();
    service.revoke(&revoked_claims.jti).await.unwrap();

    assert!(service.validate(&live_pair.access_token).await.is_ok());
}

#[tokio::test]
async fn test_fail_closed_denies_on_store_outage() {
    let keys = Ed25519KeyManager::generate();
    let service = TokenService::new(UnavailableStore, &keys, TokenServiceConfig::default());

    let pair = service.issue("user-1", "alice").await.unwrap();

    let result = service.validate(&pair.access_token).await;
    assert!(matches!(
        result,
        Err(DomainError::Store(StoreError::Unavailable { .. }))
    ));
    assert!(result.unwrap_err().is_retryable());
}

#[tokio::test]
async fn test_fail_open_allows_on_store_outage() {
    let keys = Ed25519KeyManager::generate();
    let config = TokenServiceConfig {
        failure_policy: FailurePolicy::FailOpen,
        ..Default::default()
    };
    let service = TokenService::new(UnavailableStore, &keys, config);

    let pair = service.issue("user-1", "alice").await.unwrap();

    let claims = service.validate(&pair.access_token).await.unwrap();
    assert_eq!(claims.user_id(), "user-1");
    assert!(service.refresh(&pair.refresh_token).await.is_ok());
}

#[tokio::test]
async fn test_crypto_failure_beats_store_policy() {
    // A forged token is rejected before the store is ever consulted,
    // regardless of the failure policy
    let keys = Ed25519KeyManager::generate();
    let config = TokenServiceConfig {
        failure_policy: FailurePolicy::FailOpen,
        ..Default::default()
    };
    let service = TokenService::new(UnavailableStore, &keys, config);

    let result = service.validate("forged.token.here").await;
    assert!(matches!(
        result,
        Err(DomainError::Token(TokenError::Invalid))
    ));
}
