use anyhow::{Context, Result};
use reqwest::header::CONTENT_TYPE;
use reqwest::Client;
use serde::Deserialize;
use tracing::info;

use crate::records::RadarEntry;
use crate::settings::Settings;

#[derive(Debug, Deserialize)]
struct RadarResponse {
    success: bool,
    #[serde(default)]
    errors: Vec<serde_json::Value>,
    result: Option<RadarResult>,
}

#[derive(Debug, Deserialize)]
struct RadarResult {
    top_0: Option<Vec<RadarEntry>>,
    top: Option<Vec<RadarEntry>>,
}

/// Query the Cloudflare Radar top-domains ranking for the configured location.
pub async fn fetch_top_domains(client: &Client, settings: &Settings) -> Result<Vec<RadarEntry>> {
    let token = settings.radar_token()?;
    let url = format!(
        "{}?location={}&limit={}&format=json",
        settings.radar_url, settings.location, settings.limit
    );

    info!("Querying Cloudflare Radar: {}", url);
    let response = client
        .get(&url)
        .bearer_auth(token)
        .header(CONTENT_TYPE, "application/json")
        .send()
        .await
        .context("Cloudflare Radar request failed")?;
    let status = response.status();
    let body = response.text().await?;

    let domains = parse_radar_response(&body)
        .with_context(|| format!("Cloudflare Radar returned HTTP {}", status))?;
    info!("Radar returned {} domains", domains.len());
    Ok(domains)
}

fn parse_radar_response(body: &str) -> Result<Vec<RadarEntry>> {
    let response: RadarResponse =
        serde_json::from_str(body).context("Failed to parse Radar JSON")?;

    if !response.success {
        anyhow::bail!(
            "Radar API error: {}",
            serde_json::to_string(&response.errors).unwrap_or_default()
        );
    }

    Ok(response
        .result
        .and_then(|r| r.top_0.or(r.top))
        .unwrap_or_default())
}
