//! Configuration management for the lyric caption sync service.
//!
//! This module handles loading and accessing configuration values from environment
//! variables and `.env` files. Every accessor except the Spotify client id has a
//! default, so a fresh install only needs the client id to run.
//!
//! The configuration system follows a hierarchical approach:
//! 1. Environment variables (highest priority)
//! 2. `.env` file in the local data directory
//! 3. Application defaults

use std::{env, path::PathBuf, str::FromStr, time::Duration};

use crate::lyrics::PausePolicy;

const DEFAULT_SERVER_ADDRESS: &str = "127.0.0.1:5172";
const DEFAULT_REDIRECT_URI: &str = "http://127.0.0.1:5172/api/spotify/callback";
const DEFAULT_SCOPE: &str = "user-read-playback-state user-read-currently-playing";
const DEFAULT_AUTH_URL: &str = "https://accounts.spotify.com/authorize";
const DEFAULT_TOKEN_URL: &str = "https://accounts.spotify.com/api/token";
const DEFAULT_API_URL: &str = "https://api.spotify.com/v1";
const DEFAULT_LRCLIB_URL: &str = "https://lrclib.net/api";

/// Loads environment variables from a `.env` file in the local data directory.
///
/// Creates the `spolyrics` data directory if it doesn't exist and loads the
/// `.env` file inside it when present. Variables already set in the process
/// environment are never overwritten.
///
/// # Directory Structure
///
/// - Linux: `~/.local/share/spolyrics/.env`
/// - macOS: `~/Library/Application Support/spolyrics/.env`
/// - Windows: `%LOCALAPPDATA%/spolyrics/.env`
///
/// # Errors
///
/// Returns an error if the directory cannot be created or an existing `.env`
/// file cannot be parsed. A missing file is not an error.
pub async fn load_env() -> Result<(), String> {
    let mut path = data_dir();
    path.push(".env");
    if let Some(parent) = path.parent() {
        async_fs::create_dir_all(parent)
            .await
            .map_err(|e| e.to_string())?;
    }

    if path.is_file() {
        dotenv::from_path(&path).map_err(|e| e.to_string())?;
    }
    Ok(())
}

fn data_dir() -> PathBuf {
    let mut path = dirs::data_local_dir().unwrap_or_else(|| PathBuf::from("."));
    path.push("spolyrics");
    path
}

fn var_or(key: &str, default: &str) -> String {
    match env::var(key) {
        Ok(value) if !value.trim().is_empty() => value,
        _ => default.to_string(),
    }
}

fn parsed_or<T: FromStr>(key: &str, default: T) -> T {
    env::var(key)
        .ok()
        .and_then(|v| v.trim().parse().ok())
        .unwrap_or(default)
}

/// Address the local HTTP server binds to (`SERVER_ADDRESS`).
pub fn server_addr() -> String {
    var_or("SERVER_ADDRESS", DEFAULT_SERVER_ADDRESS)
}

/// Base URL other commands use to reach a running server.
pub fn server_url() -> String {
    format!("http://{}", server_addr())
}

/// Returns the Spotify API client ID for authentication.
///
/// Retrieves `SPOTIFY_API_AUTH_CLIENT_ID`, the id of the application registered
/// on Spotify's developer platform. There is no sensible default.
///
/// # Errors
///
/// Returns an error message naming the variable when it is unset or empty.
pub fn spotify_client_id() -> Result<String, String> {
    match env::var("SPOTIFY_API_AUTH_CLIENT_ID") {
        Ok(id) if !id.trim().is_empty() => Ok(id),
        _ => Err("SPOTIFY_API_AUTH_CLIENT_ID must be set".to_string()),
    }
}

/// Returns the Spotify OAuth redirect URI.
///
/// Must match the redirect URI registered in the Spotify application settings
/// and point at this server's `/api/spotify/callback` route.
pub fn spotify_redirect_uri() -> String {
    var_or("SPOTIFY_API_REDIRECT_URI", DEFAULT_REDIRECT_URI)
}

/// Scope requested during authorization (`SPOTIFY_API_AUTH_SCOPE`).
pub fn spotify_scope() -> String {
    var_or("SPOTIFY_API_AUTH_SCOPE", DEFAULT_SCOPE)
}

/// Spotify authorization page (`SPOTIFY_API_AUTH_URL`).
pub fn spotify_apiauth_url() -> String {
    var_or("SPOTIFY_API_AUTH_URL", DEFAULT_AUTH_URL)
}

/// Spotify token exchange endpoint (`SPOTIFY_API_TOKEN_URL`).
pub fn spotify_apitoken_url() -> String {
    var_or("SPOTIFY_API_TOKEN_URL", DEFAULT_TOKEN_URL)
}

/// Spotify Web API base URL (`SPOTIFY_API_URL`).
pub fn spotify_apiurl() -> String {
    var_or("SPOTIFY_API_URL", DEFAULT_API_URL)
}

/// LRCLIB API base URL (`LRCLIB_API_URL`).
pub fn lrclib_url() -> String {
    var_or("LRCLIB_API_URL", DEFAULT_LRCLIB_URL)
}

/// Directory holding the credential, the sync log and the published lyrics.
///
/// Defaults to the `spolyrics` local data directory; override with `STORAGE_DIR`.
pub fn storage_dir() -> PathBuf {
    match env::var("STORAGE_DIR") {
        Ok(dir) if !dir.trim().is_empty() => PathBuf::from(dir),
        _ => data_dir(),
    }
}

pub fn credentials_path() -> PathBuf {
    storage_dir().join("spotify.json")
}

pub fn sync_log_path() -> PathBuf {
    storage_dir().join("lyrics.log")
}

pub fn lyrics_path() -> PathBuf {
    storage_dir().join("lyrics").join("current.lrc")
}

/// Delay between two synchronization cycles (`SYNC_INTERVAL_MS`, default 1000).
pub fn sync_interval() -> Duration {
    Duration::from_millis(parsed_or("SYNC_INTERVAL_MS", 1000u64).max(100))
}

/// Timeout applied to every outbound request (`REQUEST_TIMEOUT_SECS`, default 8).
pub fn request_timeout() -> Duration {
    Duration::from_secs(parsed_or("REQUEST_TIMEOUT_SECS", 8u64).max(1))
}

/// Lines shown on each side of the active line (`CAPTION_WINDOW`, default 3).
pub fn caption_window() -> usize {
    parsed_or("CAPTION_WINDOW", 3usize)
}

/// What the caption shows while playback is paused (`CAPTION_WHEN_PAUSED`).
pub fn caption_when_paused() -> PausePolicy {
    parsed_or("CAPTION_WHEN_PAUSED", PausePolicy::Blank)
}
