mod common;

use common::{FakePlayer, authorized_tokens, item, paused, playing, unauthorized_tokens};
use spolyrics::{sync, types::SyncedTrack};
use tempfile::TempDir;

fn synced(name: &str, artists: &str) -> SyncedTrack {
    SyncedTrack {
        id: None,
        name: name.to_string(),
        artists: artists.to_string(),
    }
}

#[tokio::test]
async fn test_unauthorized_report() {
    let dir = TempDir::new().unwrap();
    let tokens = unauthorized_tokens(dir.path());
    let player = FakePlayer::new();

    let report = sync::report(&tokens, &*player, None).await;

    assert!(!report.authorized);
    assert!(!report.playing);
    assert!(report.track.is_none());
    assert_eq!(report.lyrics_synced, None);
}

#[tokio::test]
async fn test_nothing_playing_report() {
    let dir = TempDir::new().unwrap();
    let tokens = authorized_tokens(dir.path()).await;
    let player = FakePlayer::new();

    let report = sync::report(&tokens, &*player, None).await;

    assert!(report.authorized);
    assert!(!report.playing);
    assert!(report.track.is_none());
}

#[tokio::test]
async fn test_playing_track_with_synced_lyrics() {
    let dir = TempDir::new().unwrap();
    let tokens = authorized_tokens(dir.path()).await;
    let player = FakePlayer::new();
    player.set(Some(playing(item(Some("t1"), "Song", &["A", "B"]), 61_000)));
    let last = synced("Song", "A, B");

    let report = sync::report(&tokens, &*player, Some(&last)).await;

    assert!(report.authorized);
    assert!(report.playing);
    assert_eq!(report.lyrics_synced, Some(true));
    let track = report.track.unwrap();
    assert_eq!(track.artists, "A, B");
    assert_eq!(track.progress_ms, 61_000);
    assert_eq!(track.duration_ms, 200_000);
}

#[tokio::test]
async fn test_lyrics_synced_compares_name_and_artists() {
    let dir = TempDir::new().unwrap();
    let tokens = authorized_tokens(dir.path()).await;
    let player = FakePlayer::new();
    player.set(Some(playing(item(Some("t1"), "Song", &["A"]), 0)));

    let other_artist = synced("Song", "Somebody Else");
    let report = sync::report(&tokens, &*player, Some(&other_artist)).await;
    assert_eq!(report.lyrics_synced, Some(false));

    let report = sync::report(&tokens, &*player, None).await;
    assert_eq!(report.lyrics_synced, Some(false));
}

#[tokio::test]
async fn test_paused_track_is_reported_not_playing() {
    let dir = TempDir::new().unwrap();
    let tokens = authorized_tokens(dir.path()).await;
    let player = FakePlayer::new();
    player.set(Some(paused(item(Some("t1"), "Song", &["A"]))));

    let report = sync::report(&tokens, &*player, None).await;

    assert!(!report.playing);
    assert!(!report.track.unwrap().is_playing);
}

#[tokio::test]
async fn test_playback_failure_is_reported_as_error() {
    let dir = TempDir::new().unwrap();
    let tokens = authorized_tokens(dir.path()).await;
    let player = FakePlayer::new();
    player.fail(true);

    let report = sync::report(&tokens, &*player, None).await;

    assert!(report.authorized);
    assert!(report.error.is_some());
}

#[test]
fn test_status_report_json_shape() {
    let json = serde_json::json!({
        "authorized": true,
        "playing": true,
        "track": {
            "name": "Song",
            "artists": "A",
            "progress_ms": 1200,
            "duration_ms": 200000,
            "is_playing": true
        },
        "lyricsSynced": true
    });

    let report: spolyrics::types::StatusReport = serde_json::from_value(json.clone()).unwrap();
    assert_eq!(report.lyrics_synced, Some(true));
    assert_eq!(serde_json::to_value(&report).unwrap(), json);

    let unauthorized = serde_json::to_value(spolyrics::types::StatusReport::unauthorized()).unwrap();
    assert_eq!(
        unauthorized,
        serde_json::json!({ "authorized": false, "playing": false })
    );
}
