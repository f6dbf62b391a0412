mod common;

use std::sync::Arc;

use common::{FakePlayer, FakeTokenEndpoint, RefreshReply, item, playing};
use reqwest::{StatusCode, header};
use spolyrics::{
    lyrics::LyricDocument,
    management::{CredentialStore, LyricStore, TokenManager},
    server::{AppContext, router},
    spotify::AuthorizeRequest,
    types::{StatusReport, SyncedTrack, TrackIdentity},
    utils,
};
use tempfile::TempDir;
use tokio::sync::watch;

struct TestServer {
    dir: TempDir,
    base: String,
    client: reqwest::Client,
    ctx: Arc<AppContext>,
    player: Arc<FakePlayer>,
    synced_tx: watch::Sender<Option<SyncedTrack>>,
}

async fn start() -> TestServer {
    let dir = TempDir::new().unwrap();
    let player = FakePlayer::new();
    let (synced_tx, synced) = watch::channel(None);
    let ctx = Arc::new(AppContext {
        tokens: Arc::new(TokenManager::new(
            CredentialStore::new(dir.path().join("spotify.json")),
            FakeTokenEndpoint::new(RefreshReply::Unavailable),
        )),
        player: player.clone(),
        authorize: AuthorizeRequest {
            auth_url: "https://accounts.example.com/authorize".to_string(),
            client_id: "client-1".to_string(),
            redirect_uri: "http://127.0.0.1/api/spotify/callback".to_string(),
            scope: "user-read-playback-state".to_string(),
        },
        synced,
        sync_log_path: dir.path().join("lyrics.log"),
        lyrics: LyricStore::new(dir.path().join("lyrics").join("current.lrc")),
    });

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let base = format!("http://{}", listener.local_addr().unwrap());
    let app = router(ctx.clone());
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });

    let client = reqwest::Client::builder()
        .redirect(reqwest::redirect::Policy::none())
        .build()
        .unwrap();

    TestServer {
        dir,
        base,
        client,
        ctx,
        player,
        synced_tx,
    }
}

impl TestServer {
    async fn get(&self, path: &str) -> reqwest::Response {
        self.client
            .get(format!("{}{}", self.base, path))
            .send()
            .await
            .unwrap()
    }
}

#[tokio::test]
async fn test_health() {
    let server = start().await;

    let body: serde_json::Value = server.get("/health").await.json().await.unwrap();

    assert_eq!(body["status"], "ok");
    assert_eq!(body["version"], env!("CARGO_PKG_VERSION"));
}

#[tokio::test]
async fn test_login_redirects_with_state_carrying_verifier() {
    let server = start().await;

    let response = server.get("/api/spotify/auth/login").await;
    assert!(response.status().is_redirection());

    let location = response.headers()[header::LOCATION].to_str().unwrap();
    let url = reqwest::Url::parse(location).unwrap();
    let params: std::collections::HashMap<String, String> = url.query_pairs().into_owned().collect();
    let verifier = utils::decode_state(&params["state"]).unwrap();

    assert!(location.starts_with("https://accounts.example.com/authorize?"));
    assert_eq!(verifier.len(), 128);
    assert_eq!(params["code_challenge"], utils::generate_code_challenge(&verifier));
    assert_eq!(params["code_challenge_method"], "S256");
}

#[tokio::test]
async fn test_callback_rejects_bad_requests() {
    let server = start().await;
    let state = utils::encode_state("verifier");

    let denied = server.get("/api/spotify/callback?error=access_denied").await;
    assert_eq!(denied.status(), StatusCode::BAD_REQUEST);
    assert!(denied.text().await.unwrap().contains("Authorization error: access_denied"));

    let no_code = server
        .get(&format!("/api/spotify/callback?state={}", state))
        .await;
    assert_eq!(no_code.status(), StatusCode::BAD_REQUEST);

    let bad_state = server
        .get("/api/spotify/callback?code=abc&state=%21%21")
        .await;
    assert_eq!(bad_state.status(), StatusCode::BAD_REQUEST);

    let failed = server
        .get(&format!("/api/spotify/callback?code=bad-code&state={}", state))
        .await;
    assert_eq!(failed.status(), StatusCode::INTERNAL_SERVER_ERROR);
    assert!(failed.text().await.unwrap().contains("Token exchange failed"));

    assert!(server.ctx.tokens.stored_credential().await.is_none());
}

#[tokio::test]
async fn test_callback_stores_credential() {
    let server = start().await;
    let state = utils::encode_state("my-verifier");

    let response = server
        .get(&format!("/api/spotify/callback?code=good&state={}", state))
        .await;

    assert_eq!(response.status(), StatusCode::OK);
    let stored = server.ctx.tokens.stored_credential().await.unwrap();
    assert_eq!(stored.access_token, "access-for-my-verifier");
    assert!(server.dir.path().join("spotify.json").exists());
}

#[tokio::test]
async fn test_status_route() {
    let server = start().await;

    let report: StatusReport = server.get("/api/spotify/status").await.json().await.unwrap();
    assert!(!report.authorized);

    server
        .get(&format!(
            "/api/spotify/callback?code=good&state={}",
            utils::encode_state("v")
        ))
        .await;
    server
        .player
        .set(Some(playing(item(Some("t1"), "Song", &["Artist"]), 3_000)));
    server.synced_tx.send_replace(Some(SyncedTrack {
        id: Some("t1".to_string()),
        name: "Song".to_string(),
        artists: "Artist".to_string(),
    }));

    let report: StatusReport = server.get("/api/spotify/status").await.json().await.unwrap();
    assert!(report.authorized);
    assert!(report.playing);
    assert_eq!(report.lyrics_synced, Some(true));
    assert_eq!(report.track.unwrap().progress_ms, 3_000);

    server.player.fail(true);
    let response = server.get("/api/spotify/status").await;
    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    let report: StatusReport = response.json().await.unwrap();
    assert!(report.authorized);
    assert!(report.error.is_some());
}

#[tokio::test]
async fn test_lyrics_route_is_not_cached() {
    let server = start().await;

    let missing = server.get("/lyrics/current.lrc").await;
    assert_eq!(missing.status(), StatusCode::NOT_FOUND);

    let track = TrackIdentity {
        id: Some("t1".to_string()),
        name: "Song".to_string(),
        artists: vec!["Artist".to_string()],
        album_name: "Album".to_string(),
        duration_ms: 1000,
    };
    let document = LyricDocument::for_track(&track, "[00:01.00]hello");
    server.ctx.lyrics.publish(&document).await.unwrap();

    let response = server.get("/lyrics/current.lrc?_t=12345").await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(response.headers()[header::CACHE_CONTROL], "no-store");
    let text = response.text().await.unwrap();
    assert_eq!(LyricDocument::parse(&text), document);
}

#[tokio::test]
async fn test_log_route() {
    let server = start().await;

    let empty = server.get("/api/spotify/log").await;
    assert_eq!(empty.status(), StatusCode::OK);
    assert_eq!(empty.text().await.unwrap(), "");

    std::fs::write(server.dir.path().join("lyrics.log"), "[t] Now playing: A - B\n").unwrap();
    let text = server.get("/api/spotify/log").await.text().await.unwrap();
    assert_eq!(text, "[t] Now playing: A - B\n");
}
