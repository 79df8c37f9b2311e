use std::time::Duration;

use anyhow::{Context, Result};
use indicatif::{ProgressBar, ProgressStyle};
use reqwest::redirect::Policy;
use reqwest::Client;
use tracing::info;

use crate::settings::Settings;

const MAX_REDIRECTS: usize = 10;
const USER_AGENT: &str = concat!("tw_site_rank/", env!("CARGO_PKG_VERSION"));

pub fn client(settings: &Settings) -> Result<Client> {
    let redirects = Policy::custom(|attempt| {
        if attempt.previous().len() >= MAX_REDIRECTS {
            attempt.error("too many redirects")
        } else {
            info!("Redirected -> {}", attempt.url());
            attempt.follow()
        }
    });

    Client::builder()
        .redirect(redirects)
        .danger_accept_invalid_certs(settings.accept_invalid_certs)
        .user_agent(USER_AGENT)
        .build()
        .context("Failed to build HTTP client")
}

/// GET `url` into memory, showing download progress. Non-2xx is an error.
pub async fn download(client: &Client, url: &str) -> Result<Vec<u8>> {
    info!("Downloading {}", url);
    let mut response = client
        .get(url)
        .send()
        .await
        .with_context(|| format!("Request to {} failed", url))?;

    let status = response.status();
    if !status.is_success() {
        anyhow::bail!("Download failed for {}: HTTP {}", url, status);
    }

    let pb = match response.content_length() {
        Some(len) => {
            let pb = ProgressBar::new(len);
            pb.set_style(
                ProgressStyle::default_bar()
                    .template("[{elapsed_precise}] {bar:40} {bytes}/{total_bytes} ({bytes_per_sec})")?
                    .progress_chars("=> "),
            );
            pb
        }
        None => {
            let pb = ProgressBar::new_spinner();
            pb.set_style(ProgressStyle::default_spinner().template("{spinner:.green} {bytes} received")?);
            pb.enable_steady_tick(Duration::from_millis(120));
            pb
        }
    };

    let mut body = Vec::new();
    while let Some(chunk) = response
        .chunk()
        .await
        .with_context(|| format!("Failed reading body of {}", url))?
    {
        body.extend_from_slice(&chunk);
        pb.set_position(body.len() as u64);
    }
    pb.finish_and_clear();

    info!("Downloaded {} bytes from {}", body.len(), url);
    Ok(body)
}

pub async fn download_text(client: &Client, url: &str) -> Result<String> {
    let bytes = download(client, url).await?;
    Ok(String::from_utf8_lossy(&bytes).into_owned())
}
