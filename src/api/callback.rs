use std::sync::Arc;

use axum::{
    Extension,
    extract::Query,
    http::StatusCode,
    response::{Html, IntoResponse, Response},
};
use serde::Deserialize;

use crate::{server::AppContext, success, utils, warning};

#[derive(Debug, Default, Deserialize)]
pub struct CallbackParams {
    code: Option<String>,
    state: Option<String>,
    error: Option<String>,
}

/// Completes the authorization flow started by [`super::login`].
///
/// The PKCE verifier comes back inside `state`, so this handler works even
/// if the server restarted between the redirect and the callback.
pub async fn callback(
    Query(params): Query<CallbackParams>,
    Extension(ctx): Extension<Arc<AppContext>>,
) -> Response {
    if let Some(error) = params.error {
        warning!("Authorization denied: {}", error);
        return bad_request(format!("Authorization error: {}", error));
    }

    let Some(code) = params.code.filter(|c| !c.is_empty()) else {
        return bad_request("Missing authorization code".to_string());
    };

    let Some(verifier) = params.state.as_deref().and_then(utils::decode_state) else {
        return bad_request("Missing or invalid state".to_string());
    };

    match ctx.tokens.exchange_code_for_token(&code, &verifier).await {
        Ok(_) => {
            success!("Authorization completed.");
            Html("<h2>Authorization successful.</h2><p>You can close this window.</p>").into_response()
        }
        Err(e) => {
            warning!("Token exchange failed: {}", e);
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Html("<h4>Token exchange failed</h4>"),
            )
                .into_response()
        }
    }
}

fn bad_request(message: String) -> Response {
    (StatusCode::BAD_REQUEST, Html(format!("<h4>{}</h4>", message))).into_response()
}
