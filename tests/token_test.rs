mod common;

use common::{FakeTokenEndpoint, RefreshReply, credential};
use spolyrics::{
    management::{CredentialStore, TokenManager},
    types::Credential,
    utils,
};
use tempfile::TempDir;

async fn manager_with(
    dir: &TempDir,
    stored: Option<Credential>,
    reply: RefreshReply,
) -> (TokenManager, std::sync::Arc<FakeTokenEndpoint>, CredentialStore) {
    let store = CredentialStore::new(dir.path().join("spotify.json"));
    if let Some(credential) = stored {
        store.persist(&credential).await.unwrap();
    }
    let endpoint = FakeTokenEndpoint::new(reply);
    let manager = TokenManager::new(store.clone(), endpoint.clone());
    (manager, endpoint, store)
}

fn granted(refresh_token: Option<&str>) -> RefreshReply {
    RefreshReply::Grant {
        access_token: "fresh-access".to_string(),
        refresh_token: refresh_token.map(str::to_string),
    }
}

#[tokio::test]
async fn test_no_credential_is_unauthorized() {
    let dir = TempDir::new().unwrap();
    let (manager, endpoint, _) = manager_with(&dir, None, granted(None)).await;

    assert_eq!(manager.get_valid_access_token().await, None);
    assert_eq!(endpoint.refreshes(), 0);
}

#[tokio::test]
async fn test_token_expiring_in_30_seconds_is_refreshed() {
    let dir = TempDir::new().unwrap();
    let (manager, endpoint, _) = manager_with(&dir, Some(credential(30)), granted(Some("r2"))).await;

    let token = manager.get_valid_access_token().await;

    assert_eq!(token.as_deref(), Some("fresh-access"));
    assert_eq!(endpoint.refreshes(), 1);
}

#[tokio::test]
async fn test_token_expiring_in_120_seconds_is_not_refreshed() {
    let dir = TempDir::new().unwrap();
    let (manager, endpoint, _) = manager_with(&dir, Some(credential(120)), granted(Some("r2"))).await;

    let token = manager.get_valid_access_token().await;

    assert_eq!(token.as_deref(), Some("stored-access"));
    assert_eq!(endpoint.refreshes(), 0);
}

#[tokio::test]
async fn test_refresh_persists_and_keeps_old_refresh_token() {
    let dir = TempDir::new().unwrap();
    let (manager, _, store) = manager_with(&dir, Some(credential(-10)), granted(None)).await;

    manager.get_valid_access_token().await;

    let saved = store.load().await.unwrap().unwrap();
    assert_eq!(saved.access_token, "fresh-access");
    assert_eq!(saved.refresh_token.as_deref(), Some("stored-refresh"));
    assert!(saved.expires_at > utils::now_epoch() + 3000);
}

#[tokio::test]
async fn test_refresh_stores_rotated_refresh_token() {
    let dir = TempDir::new().unwrap();
    let (manager, _, store) = manager_with(&dir, Some(credential(0)), granted(Some("rotated"))).await;

    manager.get_valid_access_token().await;

    let saved = store.load().await.unwrap().unwrap();
    assert_eq!(saved.refresh_token.as_deref(), Some("rotated"));
}

#[tokio::test]
async fn test_revoked_grant_deletes_credential() {
    let dir = TempDir::new().unwrap();
    let (manager, endpoint, store) =
        manager_with(&dir, Some(credential(10)), RefreshReply::Revoked).await;

    assert_eq!(manager.get_valid_access_token().await, None);
    assert_eq!(endpoint.refreshes(), 1);
    assert!(!store.path().exists());

    // Nothing left to refresh on the next poll.
    assert_eq!(manager.get_valid_access_token().await, None);
    assert_eq!(endpoint.refreshes(), 1);
}

#[tokio::test]
async fn test_transient_failure_keeps_credential_and_retries() {
    let dir = TempDir::new().unwrap();
    let stored = credential(10);
    let (manager, endpoint, store) =
        manager_with(&dir, Some(stored.clone()), RefreshReply::Unavailable).await;

    assert_eq!(manager.get_valid_access_token().await, None);
    assert_eq!(store.load().await.unwrap(), Some(stored));

    assert_eq!(manager.get_valid_access_token().await, None);
    assert_eq!(endpoint.refreshes(), 2);
}

#[tokio::test]
async fn test_credential_without_refresh_token_is_discarded() {
    let dir = TempDir::new().unwrap();
    let mut stored = credential(3600);
    stored.refresh_token = None;
    let (manager, endpoint, store) = manager_with(&dir, Some(stored), granted(None)).await;

    assert_eq!(manager.get_valid_access_token().await, None);
    assert_eq!(endpoint.refreshes(), 0);
    assert!(!store.path().exists());
}

#[tokio::test]
async fn test_exchange_code_persists_credential() {
    let dir = TempDir::new().unwrap();
    let (manager, _, store) = manager_with(&dir, None, granted(None)).await;

    let credential = manager
        .exchange_code_for_token("auth-code", "verifier-1")
        .await
        .unwrap();

    assert_eq!(credential.access_token, "access-for-verifier-1");
    assert_eq!(store.load().await.unwrap(), Some(credential.clone()));
    assert_eq!(manager.stored_credential().await, Some(credential));
    assert_eq!(
        manager.get_valid_access_token().await.as_deref(),
        Some("access-for-verifier-1")
    );
}

#[tokio::test]
async fn test_refresh_is_not_a_new_grant_but_exchange_is() {
    let dir = TempDir::new().unwrap();
    let before = credential(0);
    let (manager, _, store) = manager_with(&dir, Some(before.clone()), granted(Some("rotated"))).await;

    manager.get_valid_access_token().await;
    let refreshed = store.load().await.unwrap().unwrap();
    assert_ne!(refreshed, before);
    assert_eq!(refreshed.granted_at, before.granted_at);
    assert!(!refreshed.is_newer_grant_than(Some(&before)));

    let exchanged = manager
        .exchange_code_for_token("auth-code", "verifier-2")
        .await
        .unwrap();
    assert!(exchanged.is_newer_grant_than(Some(&before)));
    assert!(exchanged.is_newer_grant_than(None));
}

#[tokio::test]
async fn test_exchange_failure_stores_nothing() {
    let dir = TempDir::new().unwrap();
    let (manager, _, store) = manager_with(&dir, None, granted(None)).await;

    assert!(manager.exchange_code_for_token("bad-code", "v").await.is_err());
    assert_eq!(store.load().await.unwrap(), None);
}

#[tokio::test]
async fn test_corrupt_credential_file_is_unauthorized() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("spotify.json");
    std::fs::write(&path, "{ not json").unwrap();
    let manager = TokenManager::new(
        CredentialStore::new(&path),
        FakeTokenEndpoint::new(granted(None)),
    );

    assert_eq!(manager.get_valid_access_token().await, None);
}
