use std::time::{Duration, Instant};

use indicatif::{ProgressBar, ProgressStyle};
use tokio::sync::watch;

use crate::{config, error, server, success, warning};

use super::serve::build_services;

const AUTH_TIMEOUT: Duration = Duration::from_secs(120);

/// Runs the browser login against a temporary callback server and waits for
/// a credential from a new authorization to land in the store. Refreshes by
/// a running server do not count.
///
/// If `spolyrics serve` is already running on the same address, the login
/// is handed to it instead.
pub async fn auth() {
    let services = build_services();
    let ctx = services.context(watch::channel(None).1);
    let before = ctx.tokens.stored_credential().await;
    let addr = config::server_addr();

    let server_ctx = ctx.clone();
    let server_addr = addr.clone();
    tokio::spawn(async move {
        if let Err(e) = server::start_api_server(server_ctx, &server_addr).await {
            warning!("Callback server not started ({}). Using the running instance.", e);
        }
    });

    let login_url = format!("{}/api/spotify/auth/login", config::server_url());
    if webbrowser::open(&login_url).is_err() {
        warning!(
            "Failed to open browser. Please navigate to the following URL manually:\n{}",
            login_url
        );
    }

    let pb = ProgressBar::new_spinner();
    pb.set_message("Waiting for authorization in the browser...");
    pb.enable_steady_tick(Duration::from_millis(100));
    pb.set_style(
        ProgressStyle::with_template("{spinner:.blue} {msg}")
            .unwrap_or_else(|_| ProgressStyle::default_spinner())
            .tick_chars("⠋⠙⠹⠸⠼⠴⠦⠧⠇⠏"),
    );

    let start = Instant::now();
    while start.elapsed() < AUTH_TIMEOUT {
        let current = ctx.tokens.stored_credential().await;
        if current.is_some_and(|c| c.is_newer_grant_than(before.as_ref())) {
            pb.finish_and_clear();
            success!("Authentication successful!");
            return;
        }
        tokio::time::sleep(Duration::from_secs(1)).await;
    }

    pb.finish_and_clear();
    error!("Authentication failed or timed out.");
}
