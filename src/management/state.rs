use crate::types::{StatusTrack, SyncedTrack};

/// Lookups per track before the resolver gives up on it.
pub const MAX_NOT_FOUND_ATTEMPTS: u32 = 3;

/// What to do after a lookup came back empty.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NotFoundVerdict {
    /// Below the limit; the next poll tries again.
    Retry { attempt: u32 },
    /// The limit was just reached.
    GiveUp { attempts: u32 },
    /// Already given up; nothing to report.
    Exhausted,
}

/// Bookkeeping of the synchronization loop.
///
/// Owned by the sync engine and only mutated inside its serialized cycle.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SyncState {
    last_track: Option<String>,
    last_synced: Option<SyncedTrack>,
    not_found_attempts: u32,
    gave_up: bool,
}

impl SyncState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Identity of the last track a resolution ran for.
    pub fn last_track(&self) -> Option<&str> {
        self.last_track.as_deref()
    }

    /// The last track whose lyrics were published.
    pub fn last_synced(&self) -> Option<&SyncedTrack> {
        self.last_synced.as_ref()
    }

    pub fn not_found_attempts(&self) -> u32 {
        self.not_found_attempts
    }

    pub fn gave_up(&self) -> bool {
        self.gave_up
    }

    /// Starts a fresh retry budget for a new track.
    pub fn reset_attempts(&mut self) {
        self.not_found_attempts = 0;
        self.gave_up = false;
    }

    pub fn mark_seen(&mut self, identity: &str) {
        if self.last_track.as_deref() != Some(identity) {
            self.last_track = Some(identity.to_string());
        }
    }

    pub fn record_synced(&mut self, track: SyncedTrack) {
        self.last_synced = Some(track);
    }

    pub fn record_not_found(&mut self) -> NotFoundVerdict {
        if self.gave_up {
            return NotFoundVerdict::Exhausted;
        }
        self.not_found_attempts += 1;
        if self.not_found_attempts >= MAX_NOT_FOUND_ATTEMPTS {
            self.gave_up = true;
            NotFoundVerdict::GiveUp {
                attempts: self.not_found_attempts,
            }
        } else {
            NotFoundVerdict::Retry {
                attempt: self.not_found_attempts,
            }
        }
    }
}

/// True when `track` is the last track whose lyrics were published,
/// compared by name and artist line.
pub fn is_lyrics_synced(track: &StatusTrack, last_synced: Option<&SyncedTrack>) -> bool {
    last_synced.is_some_and(|synced| synced.name == track.name && synced.artists == track.artists)
}
