use std::sync::Arc;

use tokio::sync::Mutex;

use crate::{
    management::CredentialStore,
    spotify::{AuthError, TokenEndpoint},
    types::Credential,
    utils, warning,
};

/// Tokens expiring within this many seconds are refreshed before use.
pub const EXPIRY_MARGIN_SECS: i64 = 60;

/// Keeps the stored access token usable for a long-running process.
///
/// All reads, refreshes and writes of the credential go through one async
/// mutex, so the sync loop and the status route never refresh concurrently.
pub struct TokenManager {
    store: CredentialStore,
    endpoint: Arc<dyn TokenEndpoint>,
    lock: Mutex<()>,
}

impl TokenManager {
    pub fn new(store: CredentialStore, endpoint: Arc<dyn TokenEndpoint>) -> Self {
        TokenManager {
            store,
            endpoint,
            lock: Mutex::new(()),
        }
    }

    /// Returns an access token valid for at least another minute, or `None`
    /// when the service is not authorized.
    ///
    /// # Refresh Behavior
    ///
    /// - No stored credential: `None`.
    /// - Credential without refresh token: deleted, `None`.
    /// - Expiring in more than [`EXPIRY_MARGIN_SECS`]: the stored token.
    /// - Otherwise a refresh grant is attempted. Success persists the new
    ///   credential, keeping the old refresh token if none was returned.
    ///   A revoked grant deletes the credential; any other failure leaves it
    ///   in place so the next poll retries.
    ///
    /// Never fails: every problem is reported with `warning!` and mapped to
    /// `None`.
    pub async fn get_valid_access_token(&self) -> Option<String> {
        let _guard = self.lock.lock().await;

        let credential = match self.store.load().await {
            Ok(Some(credential)) => credential,
            Ok(None) => return None,
            Err(e) => {
                warning!("Stored credential unreadable: {}", e);
                return None;
            }
        };

        let Some(refresh_token) = credential.refresh_token.as_deref().filter(|t| !t.is_empty()) else {
            warning!("Stored credential has no refresh token. Re-authorization required.");
            self.discard().await;
            return None;
        };

        if !credential.expires_within(EXPIRY_MARGIN_SECS, utils::now_epoch()) {
            return Some(credential.access_token);
        }

        match self.endpoint.refresh(refresh_token).await {
            Ok(response) => {
                let renewed = credential.renewed(response, utils::now_epoch());
                if let Err(e) = self.store.persist(&renewed).await {
                    warning!("Failed to save refreshed token: {}", e);
                }
                Some(renewed.access_token)
            }
            Err(AuthError::Revoked(reason)) => {
                warning!("Refresh token rejected ({}). Deleted stored credential.", reason);
                self.discard().await;
                None
            }
            Err(e) => {
                warning!("Token refresh failed: {}", e);
                None
            }
        }
    }

    /// Completes the authorization-code flow and stores the result.
    pub async fn exchange_code_for_token(
        &self,
        code: &str,
        verifier: &str,
    ) -> Result<Credential, AuthError> {
        let response = self.endpoint.exchange_code(code, verifier).await?;
        let credential = Credential::from_response(response, None, utils::now_epoch());

        let _guard = self.lock.lock().await;
        self.store.persist(&credential).await?;
        Ok(credential)
    }

    /// The stored credential as-is, without refreshing.
    pub async fn stored_credential(&self) -> Option<Credential> {
        let _guard = self.lock.lock().await;
        self.store.load().await.ok().flatten()
    }

    async fn discard(&self) {
        if let Err(e) = self.store.clear().await {
            warning!("Failed to delete stored credential: {}", e);
        }
    }
}
