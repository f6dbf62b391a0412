use std::{
    io::{self, Write},
    time::Duration,
};

use colored::Colorize;
use reqwest::{Client, StatusCode};
use tokio::time::{self, MissedTickBehavior};

use crate::{
    config, error, info,
    lyrics::{Caption, CaptionView, LyricDocument, PausePolicy, caption::NO_LYRICS_PLACEHOLDER},
    types::StatusReport,
    utils, warning,
};

const REFRESH_INTERVAL: Duration = Duration::from_secs(1);

/// Terminal caption renderer.
///
/// Polls the running server's status route once per second, re-reads the
/// published document whenever it does not belong to the reported track,
/// and redraws only when the caption changes.
pub async fn display(radius: usize, policy: PausePolicy) {
    let client = match utils::http_client(config::request_timeout()) {
        Ok(client) => client,
        Err(e) => error!("Failed to build HTTP client: {}", e),
    };
    let base = config::server_url();

    info!("Showing captions from {} (window {}, paused: {})", base, radius, policy);

    let mut view = CaptionView::new(policy, radius);
    let mut document: Option<LyricDocument> = None;
    let mut last_error: Option<String> = None;

    let mut interval = time::interval(REFRESH_INTERVAL);
    interval.set_missed_tick_behavior(MissedTickBehavior::Delay);

    loop {
        tokio::select! {
            _ = interval.tick() => {}
            _ = tokio::signal::ctrl_c() => break,
        }

        let status = match fetch_status(&client, &base).await {
            Ok(status) => status,
            Err(e) => {
                let message = e.to_string();
                if last_error.as_deref() != Some(message.as_str()) {
                    warning!("Status refresh failed: {}", message);
                    last_error = Some(message);
                }
                continue;
            }
        };
        last_error = None;

        if needs_document(&status, document.as_ref()) {
            match fetch_document(&client, &base).await {
                Ok(Some(fresh)) => document = Some(fresh),
                Ok(None) => document = None,
                Err(e) => warning!("Lyric document refresh failed: {}", e),
            }
        }

        if view.update(&status, document.as_ref()) {
            render(view.caption());
        }
    }
}

/// True when the status reports synced lyrics the cached document does not
/// hold yet.
fn needs_document(status: &StatusReport, document: Option<&LyricDocument>) -> bool {
    let Some(track) = status.track.as_ref() else {
        return false;
    };
    if status.lyrics_synced != Some(true) {
        return false;
    }
    !document.is_some_and(|doc| doc.belongs_to(&track.name, &track.artists))
}

async fn fetch_status(client: &Client, base: &str) -> Result<StatusReport, reqwest::Error> {
    client
        .get(format!("{}/api/spotify/status", base))
        .send()
        .await?
        .json::<StatusReport>()
        .await
}

async fn fetch_document(client: &Client, base: &str) -> Result<Option<LyricDocument>, reqwest::Error> {
    let url = format!(
        "{}/lyrics/current.lrc?_t={}",
        base,
        chrono::Utc::now().timestamp_millis()
    );
    let response = client.get(url).send().await?;

    if response.status() == StatusCode::NOT_FOUND {
        return Ok(None);
    }
    let text = response.error_for_status()?.text().await?;
    Ok(Some(LyricDocument::parse(&text)))
}

fn render(caption: &Caption) {
    let mut out = String::from("\x1B[2J\x1B[H");
    match caption {
        Caption::Unauthorized => {
            out.push_str(&format!("{}\n", "Not authorized. Run `spolyrics auth`.".red()));
        }
        Caption::Idle => {}
        Caption::NoLyrics => {
            out.push_str(&format!("{}\n", NO_LYRICS_PLACEHOLDER.dimmed()));
        }
        Caption::Preview(lines) => {
            for line in lines {
                out.push_str(&format!("{}\n", line.text.dimmed()));
            }
        }
        Caption::Lines { lines, highlight } => {
            for (i, line) in lines.iter().enumerate() {
                if i == *highlight {
                    out.push_str(&format!("{}\n", line.text.bold()));
                } else {
                    out.push_str(&format!("{}\n", line.text.dimmed()));
                }
            }
        }
    }

    let mut stdout = io::stdout().lock();
    let _ = stdout.write_all(out.as_bytes());
    let _ = stdout.flush();
}
