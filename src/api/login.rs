use std::sync::Arc;

use axum::{
    Extension,
    http::StatusCode,
    response::{IntoResponse, Redirect, Response},
};

use crate::{server::AppContext, utils, warning};

/// Redirects the browser to the consent page with a fresh PKCE pair.
pub async fn login(Extension(ctx): Extension<Arc<AppContext>>) -> Response {
    let verifier = utils::generate_code_verifier();
    match ctx.authorize.url_for_verifier(&verifier) {
        Ok(url) => Redirect::to(url.as_str()).into_response(),
        Err(e) => {
            warning!("Failed to build authorize URL: {}", e);
            (StatusCode::INTERNAL_SERVER_ERROR, "Invalid authorize URL").into_response()
        }
    }
}
