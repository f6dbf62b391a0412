//! Append-only activity log of the synchronization loop.
//!
//! The loop polls every second, but the log records logical events: a track
//! change, a published document, a failed attempt, giving up. Consecutive
//! duplicates of the same event are dropped, so one event is one line no
//! matter how many polls observe it.

use std::{
    io::{self, ErrorKind},
    path::{Path, PathBuf},
};

use chrono::{SecondsFormat, Utc};
use tokio::{fs::OpenOptions, io::AsyncWriteExt};

use crate::{management::MAX_NOT_FOUND_ATTEMPTS, types::TrackIdentity};

#[derive(Debug, Clone, Copy)]
pub enum SyncEvent<'a> {
    NowPlaying(&'a TrackIdentity),
    Synced {
        track: &'a TrackIdentity,
        lines: usize,
    },
    NotFound {
        track: &'a TrackIdentity,
        attempt: u32,
    },
    GaveUp {
        track: &'a TrackIdentity,
        attempts: u32,
    },
    Failed {
        track: &'a TrackIdentity,
        reason: &'a str,
    },
}

impl SyncEvent<'_> {
    /// Two events with the same key are the same logical event.
    pub fn dedup_key(&self) -> String {
        match self {
            SyncEvent::NowPlaying(t) => format!("playing:{}", t.identity_key()),
            SyncEvent::Synced { track, .. } => format!("synced:{}", track.identity_key()),
            SyncEvent::NotFound { track, attempt } => {
                format!("not-found:{}:{}", track.identity_key(), attempt)
            }
            SyncEvent::GaveUp { track, .. } => format!("gave-up:{}", track.identity_key()),
            SyncEvent::Failed { track, reason } => {
                format!("failed:{}:{}", track.identity_key(), reason)
            }
        }
    }

    pub fn message(&self) -> String {
        match self {
            SyncEvent::NowPlaying(t) => format!("Now playing: {} - {}", t.artist_line(), t.name),
            SyncEvent::Synced { track, lines } => format!(
                "Lyrics synced: {} - {} ({} lines)",
                track.artist_line(),
                track.name,
                lines
            ),
            SyncEvent::NotFound { track, attempt } => format!(
                "Lyrics not found: {} - {} (attempt {}/{})",
                track.artist_line(),
                track.name,
                attempt,
                MAX_NOT_FOUND_ATTEMPTS
            ),
            SyncEvent::GaveUp { track, attempts } => format!(
                "Giving up on {} - {} after {} attempts",
                track.artist_line(),
                track.name,
                attempts
            ),
            SyncEvent::Failed { track, reason } => format!(
                "Lyric sync failed: {} - {}: {}",
                track.artist_line(),
                track.name,
                reason
            ),
        }
    }
}

#[derive(Debug)]
pub struct SyncLog {
    path: PathBuf,
    last_key: Option<String>,
}

impl SyncLog {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        SyncLog {
            path: path.into(),
            last_key: None,
        }
    }

    /// Appends `event` unless it repeats the previous one.
    ///
    /// Returns whether a line was written. A failed write leaves the event
    /// unrecorded, so it is attempted again the next time it occurs.
    pub async fn record(&mut self, event: &SyncEvent<'_>) -> io::Result<bool> {
        let key = event.dedup_key();
        if self.last_key.as_deref() == Some(key.as_str()) {
            return Ok(false);
        }

        self.append(&event.message()).await?;
        self.last_key = Some(key);
        Ok(true)
    }

    async fn append(&self, message: &str) -> io::Result<()> {
        if let Some(parent) = self.path.parent() {
            tokio::fs::create_dir_all(parent).await?;
        }

        let line = format!(
            "[{}] {}\n",
            Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true),
            message
        );
        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)
            .await?;
        file.write_all(line.as_bytes()).await?;
        file.flush().await
    }
}

/// Reads the whole log; an absent log reads as empty.
pub async fn read_log(path: &Path) -> io::Result<String> {
    match async_fs::read_to_string(path).await {
        Ok(text) => Ok(text),
        Err(e) if e.kind() == ErrorKind::NotFound => Ok(String::new()),
        Err(e) => Err(e),
    }
}
