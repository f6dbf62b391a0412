use async_trait::async_trait;
use reqwest::{Client, Response, Url};
use thiserror::Error;

use crate::{
    management::CredentialError,
    types::{TokenErrorBody, TokenResponse},
    utils,
};

#[derive(Error, Debug)]
pub enum AuthError {
    /// The provider rejected the grant (`invalid_grant`); the stored
    /// credential can never be refreshed again.
    #[error("grant revoked: {0}")]
    Revoked(String),
    #[error("token endpoint returned {status}: {message}")]
    Api { status: u16, message: String },
    #[error("network error: {0}")]
    Network(#[from] reqwest::Error),
    #[error("credential storage failed: {0}")]
    Storage(#[from] CredentialError),
}

/// The two grants of the OAuth token endpoint this service uses.
#[async_trait]
pub trait TokenEndpoint: Send + Sync {
    /// Authorization-code grant with the PKCE verifier.
    async fn exchange_code(&self, code: &str, verifier: &str) -> Result<TokenResponse, AuthError>;

    /// Refresh-token grant.
    async fn refresh(&self, refresh_token: &str) -> Result<TokenResponse, AuthError>;
}

/// Parameters of the authorization redirect.
#[derive(Debug, Clone)]
pub struct AuthorizeRequest {
    pub auth_url: String,
    pub client_id: String,
    pub redirect_uri: String,
    pub scope: String,
}

impl AuthorizeRequest {
    /// Builds the consent URL for a fresh PKCE pair.
    ///
    /// The verifier travels in `state` (see [`utils::encode_state`]) and comes
    /// back on the callback, so nothing is kept server-side between the two.
    pub fn url_for_verifier(&self, verifier: &str) -> Result<Url, String> {
        let challenge = utils::generate_code_challenge(verifier);
        let state = utils::encode_state(verifier);
        Url::parse_with_params(
            &self.auth_url,
            &[
                ("response_type", "code"),
                ("client_id", self.client_id.as_str()),
                ("redirect_uri", self.redirect_uri.as_str()),
                ("code_challenge_method", "S256"),
                ("code_challenge", challenge.as_str()),
                ("scope", self.scope.as_str()),
                ("state", state.as_str()),
            ],
        )
        .map_err(|e| e.to_string())
    }
}

/// Spotify accounts service token endpoint for a public (secretless) client.
#[derive(Debug, Clone)]
pub struct SpotifyAccounts {
    client: Client,
    client_id: String,
    redirect_uri: String,
    token_url: String,
}

impl SpotifyAccounts {
    pub fn new(client: Client, client_id: String, redirect_uri: String, token_url: String) -> Self {
        SpotifyAccounts {
            client,
            client_id,
            redirect_uri,
            token_url,
        }
    }

    async fn post_form(&self, form: &[(&str, &str)]) -> Result<TokenResponse, AuthError> {
        let response = self.client.post(&self.token_url).form(form).send().await?;
        if response.status().is_success() {
            return Ok(response.json::<TokenResponse>().await?);
        }
        Err(classify_failure(response).await)
    }
}

async fn classify_failure(response: Response) -> AuthError {
    let status = response.status().as_u16();
    let body = response.text().await.unwrap_or_default();

    match serde_json::from_str::<TokenErrorBody>(&body) {
        Ok(err) if err.error == "invalid_grant" => {
            AuthError::Revoked(err.error_description.unwrap_or(err.error))
        }
        Ok(err) => AuthError::Api {
            status,
            message: err.error_description.unwrap_or(err.error),
        },
        Err(_) => AuthError::Api {
            status,
            message: body,
        },
    }
}

#[async_trait]
impl TokenEndpoint for SpotifyAccounts {
    async fn exchange_code(&self, code: &str, verifier: &str) -> Result<TokenResponse, AuthError> {
        self.post_form(&[
            ("grant_type", "authorization_code"),
            ("client_id", self.client_id.as_str()),
            ("code", code),
            ("code_verifier", verifier),
            ("redirect_uri", self.redirect_uri.as_str()),
        ])
        .await
    }

    async fn refresh(&self, refresh_token: &str) -> Result<TokenResponse, AuthError> {
        self.post_form(&[
            ("grant_type", "refresh_token"),
            ("refresh_token", refresh_token),
            ("client_id", self.client_id.as_str()),
        ])
        .await
    }
}
