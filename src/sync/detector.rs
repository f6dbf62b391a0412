use crate::{
    management::SyncState,
    types::{CurrentlyPlaying, PlayingItem},
};

/// Outcome of comparing a playback sample against the sync state.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Detection<'a> {
    /// Nothing playing, or playback paused.
    Idle,
    /// The playing track is the last successfully synced one.
    Unchanged(&'a PlayingItem),
    /// Same track as the last resolution, whose retry budget is spent.
    Suppressed,
    /// Same track as the last resolution, which has not succeeded yet.
    Retry(&'a PlayingItem),
    /// A track the loop has not worked on before.
    Changed(&'a PlayingItem),
}

/// Classifies the current playback sample. Borrows only, so the dominant
/// unchanged case performs no allocation.
///
/// Identities use the provider id when present and the track name otherwise.
/// The last identity is taken from the last synced track first, then from the
/// raw last-seen identity, which only settles a track once its retry budget
/// is spent.
pub fn detect<'a>(state: &SyncState, playback: Option<&'a CurrentlyPlaying>) -> Detection<'a> {
    let Some(playback) = playback else {
        return Detection::Idle;
    };
    let Some(item) = playback.item.as_ref().filter(|_| playback.is_playing) else {
        return Detection::Idle;
    };

    let current = item.identity_key();
    if state.last_synced().map(|t| t.identity_key()) == Some(current) {
        return Detection::Unchanged(item);
    }

    if state.last_track() == Some(current) {
        if state.gave_up() {
            Detection::Suppressed
        } else {
            Detection::Retry(item)
        }
    } else {
        Detection::Changed(item)
    }
}
