//! Lyric lookup, LRC parsing and the display-side line matcher.
//!
//! - `lrclib` - LRCLIB client behind the [`LyricLookup`] trait
//! - `parse` - the line-level LRC subset: [`LyricDocument`] and [`TimedLine`]
//! - `matcher` - active line and window for a playback position
//! - `caption` - what a renderer draws for each playback state

pub mod caption;
pub mod lrclib;
pub mod matcher;
pub mod parse;

use async_trait::async_trait;
use thiserror::Error;

pub use caption::{Caption, CaptionView, PausePolicy, compose};
pub use lrclib::LrclibClient;
pub use matcher::{DEFAULT_RADIUS, Window, locate, window};
pub use parse::{LyricDocument, LyricHeader, TimedLine, parse_synced_lyrics};

#[derive(Error, Debug)]
pub enum LyricsError {
    /// The lookup service has no synced lyrics for the track.
    #[error("lyrics not found")]
    NotFound,
    #[error("network error: {0}")]
    Network(#[from] reqwest::Error),
    #[error("API error: {0}")]
    Api(String),
}

/// Source of synced lyric text for an artist and title.
#[async_trait]
pub trait LyricLookup: Send + Sync {
    /// Returns raw LRC text, or [`LyricsError::NotFound`] when there is none.
    async fn synced_lyrics(&self, artist: &str, title: &str) -> Result<String, LyricsError>;
}
