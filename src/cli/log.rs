use crate::{config, error, info, utils};

/// Prints the Sync Log of the running server.
pub async fn log() {
    let url = format!("{}/api/spotify/log", config::server_url());
    let text = match fetch_text(&url).await {
        Ok(text) => text,
        Err(e) => error!("Failed to fetch log from {}: {}", url, e),
    };

    if text.trim().is_empty() {
        info!("Sync log is empty.");
    } else {
        print!("{}", text);
    }
}

async fn fetch_text(url: &str) -> Result<String, reqwest::Error> {
    let client = utils::http_client(config::request_timeout())?;
    client.get(url).send().await?.error_for_status()?.text().await
}
