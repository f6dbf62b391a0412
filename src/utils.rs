use std::time::Duration;

use base64::{Engine, engine::general_purpose::URL_SAFE_NO_PAD};
use chrono::Utc;
use rand::{Rng, distr::Alphanumeric};
use reqwest::Client;
use sha2::{Digest, Sha256};

pub fn generate_code_verifier() -> String {
    rand::rng()
        .sample_iter(&Alphanumeric)
        .take(128)
        .map(char::from)
        .collect()
}

pub fn generate_code_challenge(verifier: &str) -> String {
    let hash = Sha256::digest(verifier.as_bytes());
    URL_SAFE_NO_PAD.encode(hash)
}

/// Packs the PKCE verifier into the opaque `state` parameter of the
/// authorization redirect so the callback can recover it without a session.
pub fn encode_state(verifier: &str) -> String {
    URL_SAFE_NO_PAD.encode(verifier.as_bytes())
}

/// Recovers the verifier from a `state` value produced by [`encode_state`].
///
/// Returns `None` for anything that is not URL-safe base64 of a non-empty
/// UTF-8 string.
pub fn decode_state(state: &str) -> Option<String> {
    let bytes = URL_SAFE_NO_PAD.decode(state.trim()).ok()?;
    let verifier = String::from_utf8(bytes).ok()?;
    if verifier.is_empty() {
        None
    } else {
        Some(verifier)
    }
}

pub fn now_epoch() -> i64 {
    Utc::now().timestamp()
}

/// Shared HTTP client for every outbound call; `timeout` bounds each request.
pub fn http_client(timeout: Duration) -> Result<Client, reqwest::Error> {
    Client::builder()
        .user_agent(concat!(
            env!("CARGO_PKG_NAME"),
            "/",
            env!("CARGO_PKG_VERSION")
        ))
        .timeout(timeout)
        .build()
}

/// Formats a millisecond offset as `m:ss`.
pub fn format_position(ms: u64) -> String {
    let total_secs = ms / 1000;
    format!("{}:{:02}", total_secs / 60, total_secs % 60)
}
