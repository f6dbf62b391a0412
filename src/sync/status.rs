use crate::{
    management::{TokenManager, is_lyrics_synced},
    spotify::PlaybackSource,
    types::{StatusReport, StatusTrack, SyncedTrack},
};

/// Builds the status answer for UI polling.
///
/// Never fails: no token reports `authorized: false`, and a failed playback
/// fetch is carried in `error`. Reads `last_synced` without touching the
/// engine's state.
pub async fn report(
    tokens: &TokenManager,
    player: &dyn PlaybackSource,
    last_synced: Option<&SyncedTrack>,
) -> StatusReport {
    let Some(token) = tokens.get_valid_access_token().await else {
        return StatusReport::unauthorized();
    };

    let playback = match player.currently_playing(&token).await {
        Ok(Some(playback)) => playback,
        Ok(None) => return StatusReport::idle(),
        Err(e) => return StatusReport::failed(e.to_string()),
    };

    let Some(item) = playback.item.as_ref() else {
        return StatusReport::idle();
    };

    let track = StatusTrack::from_playback(&playback, item);
    let synced = is_lyrics_synced(&track, last_synced);
    StatusReport {
        authorized: true,
        playing: playback.is_playing,
        track: Some(track),
        lyrics_synced: Some(synced),
        error: None,
    }
}
