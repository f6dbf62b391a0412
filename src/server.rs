use std::{net::SocketAddr, path::PathBuf, str::FromStr, sync::Arc};

use axum::{Extension, Router, routing::get};
use tokio::sync::watch;

use crate::{
    api,
    management::{LyricStore, TokenManager},
    spotify::{AuthorizeRequest, PlaybackSource},
    types::SyncedTrack,
};

/// Everything the route handlers need, shared through an `Extension` layer.
pub struct AppContext {
    pub tokens: Arc<TokenManager>,
    pub player: Arc<dyn PlaybackSource>,
    pub authorize: AuthorizeRequest,
    pub synced: watch::Receiver<Option<SyncedTrack>>,
    pub sync_log_path: PathBuf,
    pub lyrics: LyricStore,
}

pub fn router(ctx: Arc<AppContext>) -> Router {
    Router::new()
        .route("/health", get(api::health))
        .route("/api/spotify/auth/login", get(api::login))
        .route("/api/spotify/callback", get(api::callback))
        .route("/api/spotify/status", get(api::status))
        .route("/api/spotify/log", get(api::sync_log))
        .route("/lyrics/current.lrc", get(api::current_lyrics))
        .layer(Extension(ctx))
}

/// Binds `addr` and serves the routes until the future is dropped.
pub async fn start_api_server(ctx: Arc<AppContext>, addr: &str) -> crate::Res<()> {
    let addr = SocketAddr::from_str(addr)?;
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    axum::serve(listener, router(ctx)).await?;
    Ok(())
}
