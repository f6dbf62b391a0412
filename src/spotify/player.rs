use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use thiserror::Error;

use crate::types::CurrentlyPlaying;

#[derive(Error, Debug)]
pub enum PlaybackError {
    #[error("network error: {0}")]
    Network(#[from] reqwest::Error),
    #[error("player API returned {0}")]
    Api(StatusCode),
}

/// Where the current playback state comes from.
#[async_trait]
pub trait PlaybackSource: Send + Sync {
    /// Returns `None` when nothing is playing (HTTP 204).
    async fn currently_playing(&self, token: &str) -> Result<Option<CurrentlyPlaying>, PlaybackError>;
}

#[derive(Debug, Clone)]
pub struct SpotifyPlayer {
    client: Client,
    api_url: String,
}

impl SpotifyPlayer {
    pub fn new(client: Client, api_url: impl Into<String>) -> Self {
        SpotifyPlayer {
            client,
            api_url: api_url.into().trim_end_matches('/').to_string(),
        }
    }
}

#[async_trait]
impl PlaybackSource for SpotifyPlayer {
    async fn currently_playing(&self, token: &str) -> Result<Option<CurrentlyPlaying>, PlaybackError> {
        let url = format!("{}/me/player/currently-playing", self.api_url);
        let response = self.client.get(&url).bearer_auth(token).send().await?;

        match response.status() {
            StatusCode::NO_CONTENT => Ok(None),
            status if status.is_success() => Ok(Some(response.json::<CurrentlyPlaying>().await?)),
            status => Err(PlaybackError::Api(status)),
        }
    }
}
