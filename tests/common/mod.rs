#![allow(dead_code)]

use std::{
    collections::HashMap,
    path::Path,
    sync::{
        Arc, Mutex,
        atomic::{AtomicUsize, Ordering},
    },
};

use async_trait::async_trait;
use spolyrics::{
    lyrics::{LyricLookup, LyricsError},
    management::{CredentialStore, TokenManager},
    spotify::{AuthError, PlaybackError, PlaybackSource, TokenEndpoint},
    types::{AlbumRef, ArtistRef, Credential, CurrentlyPlaying, PlayingItem, TokenResponse},
    utils,
};

/// How the fake token endpoint answers a refresh grant.
#[derive(Debug, Clone)]
pub enum RefreshReply {
    Grant {
        access_token: String,
        refresh_token: Option<String>,
    },
    Revoked,
    Unavailable,
}

pub struct FakeTokenEndpoint {
    reply: RefreshReply,
    pub refresh_calls: AtomicUsize,
    pub exchange_calls: AtomicUsize,
}

impl FakeTokenEndpoint {
    pub fn new(reply: RefreshReply) -> Arc<Self> {
        Arc::new(FakeTokenEndpoint {
            reply,
            refresh_calls: AtomicUsize::new(0),
            exchange_calls: AtomicUsize::new(0),
        })
    }

    pub fn refreshes(&self) -> usize {
        self.refresh_calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl TokenEndpoint for FakeTokenEndpoint {
    async fn exchange_code(&self, code: &str, verifier: &str) -> Result<TokenResponse, AuthError> {
        self.exchange_calls.fetch_add(1, Ordering::SeqCst);
        if code == "bad-code" {
            return Err(AuthError::Api {
                status: 400,
                message: "invalid code".to_string(),
            });
        }
        Ok(TokenResponse {
            access_token: format!("access-for-{}", verifier),
            refresh_token: Some("refresh-from-exchange".to_string()),
            expires_in: 3600,
            scope: Some("user-read-playback-state".to_string()),
        })
    }

    async fn refresh(&self, _refresh_token: &str) -> Result<TokenResponse, AuthError> {
        self.refresh_calls.fetch_add(1, Ordering::SeqCst);
        match &self.reply {
            RefreshReply::Grant {
                access_token,
                refresh_token,
            } => Ok(TokenResponse {
                access_token: access_token.clone(),
                refresh_token: refresh_token.clone(),
                expires_in: 3600,
                scope: None,
            }),
            RefreshReply::Revoked => Err(AuthError::Revoked("Refresh token revoked".to_string())),
            RefreshReply::Unavailable => Err(AuthError::Api {
                status: 503,
                message: "service unavailable".to_string(),
            }),
        }
    }
}

pub fn credential(expires_in_secs: i64) -> Credential {
    Credential {
        access_token: "stored-access".to_string(),
        refresh_token: Some("stored-refresh".to_string()),
        expires_at: utils::now_epoch() + expires_in_secs,
        granted_at: utils::now_epoch() - 86_400,
        scope: None,
    }
}

/// A token manager whose stored credential is valid for an hour.
pub async fn authorized_tokens(dir: &Path) -> Arc<TokenManager> {
    let store = CredentialStore::new(dir.join("spotify.json"));
    store.persist(&credential(3600)).await.unwrap();
    Arc::new(TokenManager::new(
        store,
        FakeTokenEndpoint::new(RefreshReply::Unavailable),
    ))
}

pub fn unauthorized_tokens(dir: &Path) -> Arc<TokenManager> {
    Arc::new(TokenManager::new(
        CredentialStore::new(dir.join("spotify.json")),
        FakeTokenEndpoint::new(RefreshReply::Unavailable),
    ))
}

pub fn item(id: Option<&str>, name: &str, artists: &[&str]) -> PlayingItem {
    PlayingItem {
        id: id.map(str::to_string),
        name: name.to_string(),
        artists: artists
            .iter()
            .map(|a| ArtistRef {
                name: a.to_string(),
            })
            .collect(),
        album: AlbumRef {
            name: format!("{} (Album)", name),
        },
        duration_ms: 200_000,
    }
}

pub fn playing(item: PlayingItem, progress_ms: u64) -> CurrentlyPlaying {
    CurrentlyPlaying {
        is_playing: true,
        progress_ms: Some(progress_ms),
        item: Some(item),
    }
}

pub fn paused(item: PlayingItem) -> CurrentlyPlaying {
    CurrentlyPlaying {
        is_playing: false,
        progress_ms: Some(0),
        item: Some(item),
    }
}

/// Player whose answer the test swaps between cycles.
#[derive(Default)]
pub struct FakePlayer {
    current: Mutex<Option<CurrentlyPlaying>>,
    failing: Mutex<bool>,
}

impl FakePlayer {
    pub fn new() -> Arc<Self> {
        Arc::new(FakePlayer::default())
    }

    pub fn set(&self, playback: Option<CurrentlyPlaying>) {
        *self.current.lock().unwrap() = playback;
    }

    pub fn fail(&self, failing: bool) {
        *self.failing.lock().unwrap() = failing;
    }
}

#[async_trait]
impl PlaybackSource for FakePlayer {
    async fn currently_playing(&self, _token: &str) -> Result<Option<CurrentlyPlaying>, PlaybackError> {
        if *self.failing.lock().unwrap() {
            return Err(PlaybackError::Api(reqwest::StatusCode::BAD_GATEWAY));
        }
        Ok(self.current.lock().unwrap().clone())
    }
}

/// Lyric lookup keyed by title. Unknown titles are not found.
#[derive(Default)]
pub struct FakeLookup {
    lyrics: Mutex<HashMap<String, String>>,
    outage: Mutex<bool>,
    calls: Mutex<Vec<(String, String)>>,
}

impl FakeLookup {
    pub fn new() -> Arc<Self> {
        Arc::new(FakeLookup::default())
    }

    pub fn with(self: Arc<Self>, title: &str, lrc: &str) -> Arc<Self> {
        self.lyrics
            .lock()
            .unwrap()
            .insert(title.to_string(), lrc.to_string());
        self
    }

    pub fn set_outage(&self, outage: bool) {
        *self.outage.lock().unwrap() = outage;
    }

    pub fn calls(&self) -> Vec<(String, String)> {
        self.calls.lock().unwrap().clone()
    }

    pub fn call_count(&self) -> usize {
        self.calls.lock().unwrap().len()
    }
}

#[async_trait]
impl LyricLookup for FakeLookup {
    async fn synced_lyrics(&self, artist: &str, title: &str) -> Result<String, LyricsError> {
        self.calls
            .lock()
            .unwrap()
            .push((artist.to_string(), title.to_string()));
        if *self.outage.lock().unwrap() {
            return Err(LyricsError::Api("lrclib: HTTP 502 Bad Gateway".to_string()));
        }
        self.lyrics
            .lock()
            .unwrap()
            .get(title)
            .cloned()
            .ok_or(LyricsError::NotFound)
    }
}
