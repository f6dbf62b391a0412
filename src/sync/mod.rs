//! # Lyric Synchronization Engine
//!
//! One cycle is a poll of the player, a change detection against
//! [`SyncState`], and, when needed, a lyric lookup followed by an atomic
//! publish and a Sync Log entry:
//!
//! ```text
//! TokenManager -> PlaybackSource -> detect -> resolve -> LyricStore
//!                                                     -> SyncLog
//! ```
//!
//! [`SyncEngine::run`] drives cycles from a single task and awaits each one
//! before the next tick, so at most one cycle is ever in flight and the
//! engine can own its state without locks. The status route sees the last
//! synced track through a `watch` channel instead.
//!
//! Every failure inside a cycle is reported and retried on a later tick.
//! Nothing here ends the process.

mod detector;
mod resolver;
mod status;

use std::{sync::Arc, time::Duration};

use tokio::{
    sync::watch,
    time::{self, MissedTickBehavior},
};

pub use detector::{Detection, detect};
pub use resolver::resolve;
pub use status::report;

use crate::{
    info,
    lyrics::{LyricLookup, LyricsError},
    management::{LyricStore, NotFoundVerdict, SyncEvent, SyncLog, SyncState, TokenManager},
    spotify::PlaybackSource,
    success,
    types::{SyncedTrack, TrackIdentity},
    warning,
};

/// What a single cycle did.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CycleOutcome {
    Unauthorized,
    Idle,
    Unchanged,
    Suppressed,
    Synced,
    NotFound { attempt: u32 },
    GaveUp,
    Failed(String),
}

pub struct SyncEngine {
    tokens: Arc<TokenManager>,
    player: Arc<dyn PlaybackSource>,
    lookup: Arc<dyn LyricLookup>,
    store: LyricStore,
    sync_log: SyncLog,
    state: SyncState,
    synced_tx: watch::Sender<Option<SyncedTrack>>,
    last_failure: Option<String>,
}

impl SyncEngine {
    /// Creates the engine and the receiving end of its last-synced channel.
    pub fn new(
        tokens: Arc<TokenManager>,
        player: Arc<dyn PlaybackSource>,
        lookup: Arc<dyn LyricLookup>,
        store: LyricStore,
        sync_log: SyncLog,
        state: SyncState,
    ) -> (Self, watch::Receiver<Option<SyncedTrack>>) {
        let (synced_tx, synced_rx) = watch::channel(state.last_synced().cloned());
        let engine = SyncEngine {
            tokens,
            player,
            lookup,
            store,
            sync_log,
            state,
            synced_tx,
            last_failure: None,
        };
        (engine, synced_rx)
    }

    pub fn state(&self) -> &SyncState {
        &self.state
    }

    /// Runs cycles every `period` until the task is dropped.
    ///
    /// Ticks that fall due while a cycle is still running are delayed, never
    /// queued up, so a slow lookup cannot cause a burst of cycles afterwards.
    pub async fn run(mut self, period: Duration) {
        let mut interval = time::interval(period);
        interval.set_missed_tick_behavior(MissedTickBehavior::Delay);

        loop {
            interval.tick().await;
            self.run_cycle().await;
        }
    }

    /// Runs one poll, detect and resolve sequence.
    pub async fn run_cycle(&mut self) -> CycleOutcome {
        let Some(token) = self.tokens.get_valid_access_token().await else {
            return CycleOutcome::Unauthorized;
        };

        let playback = match self.player.currently_playing(&token).await {
            Ok(playback) => playback,
            Err(e) => return self.fail(format!("Playback fetch failed: {}", e)),
        };

        let outcome = match detect(&self.state, playback.as_ref()) {
            Detection::Idle => CycleOutcome::Idle,
            Detection::Suppressed => CycleOutcome::Suppressed,
            Detection::Unchanged(item) => {
                if self.state.last_track() != Some(item.identity_key()) {
                    let track = TrackIdentity::from(item);
                    self.state.mark_seen(track.identity_key());
                    self.record(&SyncEvent::NowPlaying(&track)).await;
                }
                CycleOutcome::Unchanged
            }
            Detection::Retry(item) => {
                let track = TrackIdentity::from(item);
                self.resolve_track(&track).await
            }
            Detection::Changed(item) => {
                let track = TrackIdentity::from(item);
                self.state.reset_attempts();
                self.record(&SyncEvent::NowPlaying(&track)).await;
                self.resolve_track(&track).await
            }
        };

        if !matches!(outcome, CycleOutcome::Failed(_)) {
            self.last_failure = None;
        }
        outcome
    }

    async fn resolve_track(&mut self, track: &TrackIdentity) -> CycleOutcome {
        let result = resolve(self.lookup.as_ref(), track).await;
        self.state.mark_seen(track.identity_key());

        match result {
            Ok(document) => {
                if let Err(e) = self.store.publish(&document).await {
                    return self.fail(format!("Failed to publish lyrics: {}", e));
                }

                let synced = SyncedTrack::from(track);
                self.state.record_synced(synced.clone());
                self.synced_tx.send_replace(Some(synced));

                let event = SyncEvent::Synced {
                    track,
                    lines: document.lines.len(),
                };
                if self.record(&event).await {
                    success!("{}", event.message());
                }
                CycleOutcome::Synced
            }
            Err(LyricsError::NotFound) => match self.state.record_not_found() {
                NotFoundVerdict::Retry { attempt } => {
                    self.record(&SyncEvent::NotFound { track, attempt }).await;
                    CycleOutcome::NotFound { attempt }
                }
                NotFoundVerdict::GiveUp { attempts } => {
                    self.record(&SyncEvent::GaveUp { track, attempts }).await;
                    CycleOutcome::GaveUp
                }
                NotFoundVerdict::Exhausted => CycleOutcome::Suppressed,
            },
            Err(e) => {
                let reason = e.to_string();
                self.record(&SyncEvent::Failed {
                    track,
                    reason: &reason,
                })
                .await;
                self.fail(format!("Lyric lookup failed: {}", reason))
            }
        }
    }

    /// Appends to the Sync Log; returns whether a new line was written.
    async fn record(&mut self, event: &SyncEvent<'_>) -> bool {
        match self.sync_log.record(event).await {
            Ok(true) => {
                if !matches!(event, SyncEvent::Synced { .. }) {
                    info!("{}", event.message());
                }
                true
            }
            Ok(false) => false,
            Err(e) => {
                warning!("Failed to append to sync log: {}", e);
                false
            }
        }
    }

    /// Reports a failed cycle once per distinct message.
    fn fail(&mut self, message: String) -> CycleOutcome {
        if self.last_failure.as_deref() != Some(message.as_str()) {
            warning!("{}", message);
            self.last_failure = Some(message.clone());
        }
        CycleOutcome::Failed(message)
    }
}
