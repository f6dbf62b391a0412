//! # API Module
//!
//! HTTP endpoints of the local Spolyrics server. The server is the single
//! point where the synchronization engine meets the outside world: the
//! browser completes authorization here, and the display surface polls
//! playback status and the published lyric document from here.
//!
//! ## Endpoints
//!
//! ### Authentication
//!
//! - [`login`] - `GET /api/spotify/auth/login`, redirects to the Spotify
//!   consent page with a fresh PKCE challenge.
//! - [`callback`] - `GET /api/spotify/callback`, exchanges the authorization
//!   code for a token pair and stores it.
//!
//! ### Display surface
//!
//! - [`status`] - `GET /api/spotify/status`, playback state plus whether the
//!   published lyrics belong to the playing track.
//! - [`current_lyrics`] - `GET /lyrics/current.lrc`, the published document,
//!   served with `Cache-Control: no-store`.
//!
//! ### Diagnostics
//!
//! - [`sync_log`] - `GET /api/spotify/log`, the raw Sync Log.
//! - [`health`] - `GET /health`, status and version.
//!
//! ## Shared State
//!
//! Handlers receive an `Arc<AppContext>` through an Axum `Extension` layer
//! (see [`crate::server`]). None of them touch the engine's sync state
//! directly; the last synced track arrives through a `watch` channel.

mod callback;
mod health;
mod log;
mod login;
mod lyrics;
mod status;

pub use callback::callback;
pub use health::health;
pub use log::sync_log;
pub use login::login;
pub use lyrics::current_lyrics;
pub use status::status;
