use std::sync::Arc;

use axum::{Extension, http::StatusCode, response::Json};

use crate::{server::AppContext, sync, types::StatusReport};

pub async fn status(Extension(ctx): Extension<Arc<AppContext>>) -> (StatusCode, Json<StatusReport>) {
    let last_synced = ctx.synced.borrow().clone();
    let report = sync::report(&ctx.tokens, ctx.player.as_ref(), last_synced.as_ref()).await;

    let code = if report.error.is_some() {
        StatusCode::INTERNAL_SERVER_ERROR
    } else {
        StatusCode::OK
    };
    (code, Json(report))
}
