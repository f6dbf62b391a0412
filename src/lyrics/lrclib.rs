//! LRCLIB lyric lookup client.
//!
//! LRCLIB is a keyless community lyrics API; `GET /api/get` takes an artist and
//! a track name and answers with the track record or 404.
//! API documentation: https://lrclib.net/docs

use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use serde::Deserialize;

use super::{LyricLookup, LyricsError};

/// The subset of the LRCLIB track record we read.
///
/// Older responses carried the synced text as `lrc`; current ones use
/// `syncedLyrics`. Both are accepted and the newer field wins.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct LrclibResponse {
    #[serde(default, rename = "syncedLyrics")]
    pub synced_lyrics: Option<String>,
    #[serde(default)]
    pub lrc: Option<String>,
}

impl LrclibResponse {
    /// The synced lyric text, or `None` when neither field has content.
    pub fn into_synced(self) -> Option<String> {
        let non_empty = |s: Option<String>| s.filter(|s| !s.trim().is_empty());
        non_empty(self.synced_lyrics).or_else(|| non_empty(self.lrc))
    }
}

#[derive(Debug, Clone)]
pub struct LrclibClient {
    client: Client,
    base_url: String,
}

impl LrclibClient {
    pub fn new(client: Client, base_url: impl Into<String>) -> Self {
        LrclibClient {
            client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
        }
    }

    fn get_url(&self, artist: &str, title: &str) -> String {
        format!(
            "{}/get?artist_name={}&track_name={}",
            self.base_url,
            urlencoding::encode(artist),
            urlencoding::encode(title)
        )
    }
}

#[async_trait]
impl LyricLookup for LrclibClient {
    async fn synced_lyrics(&self, artist: &str, title: &str) -> Result<String, LyricsError> {
        let response = self.client.get(self.get_url(artist, title)).send().await?;

        if response.status() == StatusCode::NOT_FOUND {
            return Err(LyricsError::NotFound);
        }
        if !response.status().is_success() {
            return Err(LyricsError::Api(format!("lrclib: HTTP {}", response.status())));
        }

        let body: LrclibResponse = response.json().await?;
        body.into_synced().ok_or(LyricsError::NotFound)
    }
}
