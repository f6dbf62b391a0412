use std::sync::Arc;

use axum::{
    Extension,
    http::{StatusCode, header},
    response::{IntoResponse, Response},
};

use crate::{server::AppContext, warning};

/// The published lyric document. Never cached, so every display poll sees
/// the latest publish.
pub async fn current_lyrics(Extension(ctx): Extension<Arc<AppContext>>) -> Response {
    match ctx.lyrics.read().await {
        Ok(Some(text)) => (
            [
                (header::CONTENT_TYPE, "text/plain; charset=utf-8"),
                (header::CACHE_CONTROL, "no-store"),
            ],
            text,
        )
            .into_response(),
        Ok(None) => (
            StatusCode::NOT_FOUND,
            [(header::CACHE_CONTROL, "no-store")],
            "No lyrics published",
        )
            .into_response(),
        Err(e) => {
            warning!("Failed to read lyric document: {}", e);
            (StatusCode::INTERNAL_SERVER_ERROR, "Failed to read lyrics").into_response()
        }
    }
}
