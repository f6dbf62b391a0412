//! # Spotify Integration Module
//!
//! This module implements the two Spotify surfaces the caption service talks
//! to: the accounts service (OAuth 2.0 authorization code with PKCE) and the
//! player endpoint of the Web API.
//!
//! ## Architecture
//!
//! ```text
//! Sync Engine / Status Route
//!          ↓
//! Spotify Integration Layer
//!     ├── Authentication (authorize URL, code exchange, refresh)
//!     └── Player (currently playing)
//!          ↓
//! HTTP Layer (reqwest, JSON)
//!          ↓
//! Spotify Accounts Service / Web API
//! ```
//!
//! ## Authentication Strategy
//!
//! The client is public, so there is no client secret. A random verifier is
//! generated per login, its SHA-256 challenge goes into the authorize URL and
//! the verifier itself rides along in the opaque `state` parameter. The
//! callback decodes `state` and completes the exchange; no verifier is held
//! in server memory, so a restart between redirect and callback is harmless.
//!
//! ## Seams
//!
//! Both clients sit behind traits, [`auth::TokenEndpoint`] and
//! [`player::PlaybackSource`], so the token manager and the sync engine can be
//! exercised without a network.
//!
//! ## API Coverage
//!
//! - `GET /authorize` - consent page (browser redirect only)
//! - `POST /api/token` - `authorization_code` and `refresh_token` grants
//! - `GET /me/player/currently-playing` - playback state; 204 when idle
//!
//! ## Error Types
//!
//! - [`auth::AuthError`] - token endpoint failures; `Revoked` is the only
//!   variant that invalidates the stored credential
//! - [`player::PlaybackError`] - player endpoint failures, always transient

pub mod auth;
pub mod player;

pub use auth::{AuthError, AuthorizeRequest, SpotifyAccounts, TokenEndpoint};
pub use player::{PlaybackError, PlaybackSource, SpotifyPlayer};
