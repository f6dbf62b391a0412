use std::sync::Arc;

use axum::{
    Extension,
    http::{StatusCode, header},
    response::{IntoResponse, Response},
};

use crate::{management, server::AppContext, warning};

/// The raw Sync Log as plain text.
pub async fn sync_log(Extension(ctx): Extension<Arc<AppContext>>) -> Response {
    match management::read_log(&ctx.sync_log_path).await {
        Ok(text) => ([(header::CONTENT_TYPE, "text/plain; charset=utf-8")], text).into_response(),
        Err(e) => {
            warning!("Failed to read sync log: {}", e);
            (StatusCode::INTERNAL_SERVER_ERROR, "Failed to read log").into_response()
        }
    }
}
