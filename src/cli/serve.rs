use std::sync::Arc;

use tokio::sync::watch;

use crate::{
    config, error, info,
    lyrics::LrclibClient,
    management::{CredentialStore, LyricStore, SyncLog, SyncState, TokenManager},
    server::{self, AppContext},
    spotify::{AuthorizeRequest, SpotifyAccounts, SpotifyPlayer},
    sync::SyncEngine,
    types::SyncedTrack,
    utils, warning,
};

/// The long-lived collaborators built from configuration.
pub(crate) struct Services {
    tokens: Arc<TokenManager>,
    player: Arc<SpotifyPlayer>,
    lookup: Arc<LrclibClient>,
    lyrics: LyricStore,
    authorize: AuthorizeRequest,
}

/// Wires the shared HTTP client, the token manager and the Spotify and
/// LRCLIB clients. Exits on missing configuration.
pub(crate) fn build_services() -> Services {
    let client_id = match config::spotify_client_id() {
        Ok(id) => id,
        Err(e) => error!("{}", e),
    };
    let client = match utils::http_client(config::request_timeout()) {
        Ok(client) => client,
        Err(e) => error!("Failed to build HTTP client: {}", e),
    };

    let redirect_uri = config::spotify_redirect_uri();
    let accounts = SpotifyAccounts::new(
        client.clone(),
        client_id.clone(),
        redirect_uri.clone(),
        config::spotify_apitoken_url(),
    );

    Services {
        tokens: Arc::new(TokenManager::new(
            CredentialStore::new(config::credentials_path()),
            Arc::new(accounts),
        )),
        player: Arc::new(SpotifyPlayer::new(client.clone(), config::spotify_apiurl())),
        lookup: Arc::new(LrclibClient::new(client, config::lrclib_url())),
        lyrics: LyricStore::new(config::lyrics_path()),
        authorize: AuthorizeRequest {
            auth_url: config::spotify_apiauth_url(),
            client_id,
            redirect_uri,
            scope: config::spotify_scope(),
        },
    }
}

impl Services {
    /// The sync engine, sharing the token manager and lyric store.
    pub(crate) fn engine(&self) -> (SyncEngine, watch::Receiver<Option<SyncedTrack>>) {
        SyncEngine::new(
            Arc::clone(&self.tokens),
            self.player.clone(),
            self.lookup.clone(),
            self.lyrics.clone(),
            SyncLog::new(config::sync_log_path()),
            SyncState::new(),
        )
    }

    /// The route context. `synced` is the engine's last-synced channel.
    pub(crate) fn context(&self, synced: watch::Receiver<Option<SyncedTrack>>) -> Arc<AppContext> {
        Arc::new(AppContext {
            tokens: Arc::clone(&self.tokens),
            player: self.player.clone(),
            authorize: self.authorize.clone(),
            synced,
            sync_log_path: config::sync_log_path(),
            lyrics: self.lyrics.clone(),
        })
    }
}

/// Runs the HTTP server and the synchronization loop until Ctrl-C.
pub async fn serve() {
    let services = build_services();
    let (engine, synced) = services.engine();
    let ctx = services.context(synced);
    let addr = config::server_addr();

    if ctx.tokens.stored_credential().await.is_none() {
        warning!(
            "Not authorized yet. Run `{} auth` or open {}/api/spotify/auth/login",
            env!("CARGO_PKG_NAME"),
            config::server_url()
        );
    }

    info!("Listening on http://{}", addr);
    info!("Lyrics are written to {}", ctx.lyrics.path().display());

    tokio::select! {
        result = server::start_api_server(ctx, &addr) => {
            if let Err(e) = result {
                error!("Server on {} stopped: {}", addr, e);
            }
        }
        _ = engine.run(config::sync_interval()) => {}
        _ = tokio::signal::ctrl_c() => {
            info!("Shutting down.");
        }
    }
}
