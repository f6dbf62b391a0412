use serde::{Deserialize, Serialize};
use tabled::Tabled;

/// Stored token pair. `expires_at` and `granted_at` are absolute unix
/// timestamps in seconds.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Credential {
    pub access_token: String,
    pub refresh_token: Option<String>,
    pub expires_at: i64,
    /// When the user completed the authorization this token pair descends
    /// from. Refreshes keep it unchanged.
    #[serde(default)]
    pub granted_at: i64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub scope: Option<String>,
}

impl Credential {
    /// Builds a credential from a token endpoint response received at `now`.
    ///
    /// Refresh responses may omit the refresh token; `previous_refresh` is
    /// carried forward in that case.
    pub fn from_response(response: TokenResponse, previous_refresh: Option<String>, now: i64) -> Self {
        Credential {
            access_token: response.access_token,
            refresh_token: response.refresh_token.or(previous_refresh),
            expires_at: now + response.expires_in,
            granted_at: now,
            scope: response.scope,
        }
    }

    /// The credential after a refresh grant answered at `now`.
    pub fn renewed(&self, response: TokenResponse, now: i64) -> Self {
        Credential {
            granted_at: self.granted_at,
            ..Credential::from_response(response, self.refresh_token.clone(), now)
        }
    }

    /// True when this credential comes from a later authorization than
    /// `before`. A refreshed copy of `before` does not count.
    pub fn is_newer_grant_than(&self, before: Option<&Credential>) -> bool {
        before.is_none_or(|b| self.granted_at > b.granted_at)
    }

    /// True when the token expires within `margin_secs` of `now`.
    pub fn expires_within(&self, margin_secs: i64, now: i64) -> bool {
        self.expires_at - margin_secs <= now
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TokenResponse {
    pub access_token: String,
    #[serde(default)]
    pub refresh_token: Option<String>,
    pub expires_in: i64,
    #[serde(default)]
    pub scope: Option<String>,
}

/// OAuth error body, e.g. `{"error":"invalid_grant","error_description":"Refresh token revoked"}`.
#[derive(Debug, Clone, Deserialize)]
pub struct TokenErrorBody {
    pub error: String,
    #[serde(default)]
    pub error_description: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct CurrentlyPlaying {
    #[serde(default)]
    pub is_playing: bool,
    #[serde(default)]
    pub progress_ms: Option<u64>,
    #[serde(default)]
    pub item: Option<PlayingItem>,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct PlayingItem {
    /// Absent for local files.
    #[serde(default)]
    pub id: Option<String>,
    pub name: String,
    #[serde(default)]
    pub artists: Vec<ArtistRef>,
    #[serde(default)]
    pub album: AlbumRef,
    #[serde(default)]
    pub duration_ms: u64,
}

impl PlayingItem {
    /// Change-detection identity: the provider id, or the name when there is none.
    pub fn identity_key(&self) -> &str {
        self.id.as_deref().unwrap_or(&self.name)
    }

    pub fn artist_line(&self) -> String {
        self.artists
            .iter()
            .map(|a| a.name.as_str())
            .collect::<Vec<_>>()
            .join(", ")
    }
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct ArtistRef {
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct AlbumRef {
    #[serde(default)]
    pub name: String,
}

/// The track a resolution cycle works on.
#[derive(Debug, Clone, PartialEq)]
pub struct TrackIdentity {
    pub id: Option<String>,
    pub name: String,
    pub artists: Vec<String>,
    pub album_name: String,
    pub duration_ms: u64,
}

impl TrackIdentity {
    pub fn identity_key(&self) -> &str {
        self.id.as_deref().unwrap_or(&self.name)
    }

    /// Artists rendered as one comma-joined string.
    pub fn artist_line(&self) -> String {
        self.artists.join(", ")
    }

    pub fn primary_artist(&self) -> &str {
        self.artists.first().map(String::as_str).unwrap_or_default()
    }
}

impl From<&PlayingItem> for TrackIdentity {
    fn from(item: &PlayingItem) -> Self {
        TrackIdentity {
            id: item.id.clone(),
            name: item.name.clone(),
            artists: item.artists.iter().map(|a| a.name.clone()).collect(),
            album_name: item.album.name.clone(),
            duration_ms: item.duration_ms,
        }
    }
}

/// Denormalized record of the last track whose lyrics were published.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SyncedTrack {
    pub id: Option<String>,
    pub name: String,
    pub artists: String,
}

impl SyncedTrack {
    pub fn identity_key(&self) -> &str {
        self.id.as_deref().unwrap_or(&self.name)
    }
}

impl From<&TrackIdentity> for SyncedTrack {
    fn from(track: &TrackIdentity) -> Self {
        SyncedTrack {
            id: track.id.clone(),
            name: track.name.clone(),
            artists: track.artist_line(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StatusTrack {
    pub name: String,
    pub artists: String,
    #[serde(default)]
    pub progress_ms: u64,
    #[serde(default)]
    pub duration_ms: u64,
    #[serde(default)]
    pub is_playing: bool,
}

impl StatusTrack {
    pub fn from_playback(playback: &CurrentlyPlaying, item: &PlayingItem) -> Self {
        StatusTrack {
            name: item.name.clone(),
            artists: item.artist_line(),
            progress_ms: playback.progress_ms.unwrap_or_default(),
            duration_ms: item.duration_ms,
            is_playing: playback.is_playing,
        }
    }
}

/// Body of the status route, polled by the display surface.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct StatusReport {
    pub authorized: bool,
    #[serde(default)]
    pub playing: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub track: Option<StatusTrack>,
    #[serde(
        default,
        rename = "lyricsSynced",
        skip_serializing_if = "Option::is_none"
    )]
    pub lyrics_synced: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl StatusReport {
    pub fn unauthorized() -> Self {
        StatusReport::default()
    }

    pub fn idle() -> Self {
        StatusReport {
            authorized: true,
            ..Default::default()
        }
    }

    pub fn failed(message: String) -> Self {
        StatusReport {
            authorized: true,
            error: Some(message),
            ..Default::default()
        }
    }
}

#[derive(Tabled)]
pub struct StatusTableRow {
    pub authorized: String,
    pub playing: String,
    pub track: String,
    pub artists: String,
    pub position: String,
    pub lyrics: String,
}
