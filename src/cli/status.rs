use tabled::Table;

use crate::{
    config, error,
    types::{StatusReport, StatusTableRow},
    utils, warning,
};

/// Queries the running server and prints its status as a table.
pub async fn status() {
    let report = match fetch_status().await {
        Ok(report) => report,
        Err(e) => error!(
            "Failed to reach {}. Is `{} serve` running?\n Error: {}",
            config::server_url(),
            env!("CARGO_PKG_NAME"),
            e
        ),
    };

    if let Some(e) = &report.error {
        warning!("Playback status unavailable: {}", e);
    }

    let table = Table::new([table_row(&report)]);
    println!("{}", table);
}

async fn fetch_status() -> Result<StatusReport, reqwest::Error> {
    let client = utils::http_client(config::request_timeout())?;
    client
        .get(format!("{}/api/spotify/status", config::server_url()))
        .send()
        .await?
        .json::<StatusReport>()
        .await
}

fn yes_no(flag: bool) -> String {
    let answer = if flag { "yes" } else { "no" };
    answer.to_string()
}

fn table_row(report: &StatusReport) -> StatusTableRow {
    let dash = || "-".to_string();
    match &report.track {
        Some(track) => StatusTableRow {
            authorized: yes_no(report.authorized),
            playing: yes_no(report.playing),
            track: track.name.clone(),
            artists: track.artists.clone(),
            position: format!(
                "{} / {}",
                utils::format_position(track.progress_ms),
                utils::format_position(track.duration_ms)
            ),
            lyrics: report.lyrics_synced.map(yes_no).unwrap_or_else(dash),
        },
        None => StatusTableRow {
            authorized: yes_no(report.authorized),
            playing: yes_no(report.playing),
            track: dash(),
            artists: dash(),
            position: dash(),
            lyrics: dash(),
        },
    }
}
