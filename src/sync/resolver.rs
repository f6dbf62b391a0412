use crate::{
    lyrics::{LyricDocument, LyricLookup, LyricsError},
    types::TrackIdentity,
};

/// Looks up synced lyrics for `track` by its primary artist and title.
///
/// A lookup that returns text without a single timed line counts as
/// [`LyricsError::NotFound`]; plain (unsynced) lyrics are of no use to the
/// caption.
pub async fn resolve(
    lookup: &dyn LyricLookup,
    track: &TrackIdentity,
) -> Result<LyricDocument, LyricsError> {
    let lrc = lookup
        .synced_lyrics(track.primary_artist(), &track.name)
        .await?;

    let document = LyricDocument::for_track(track, &lrc);
    if document.lines.is_empty() {
        return Err(LyricsError::NotFound);
    }
    Ok(document)
}
