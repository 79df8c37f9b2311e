use anyhow::{Context, Result};
use reqwest::Client;
use tracing::info;

use super::http;
use crate::parser::extract_table;
use crate::records::RankingRecord;
use crate::settings::Settings;

/// Fetch the AhrefsTop country ranking and extract its table.
pub async fn fetch_ranking(client: &Client, settings: &Settings) -> Result<Vec<RankingRecord>> {
    let url = settings.ahrefs_page();
    let html = http::download_text(client, &url).await?;

    info!("Parsing ranking table ({} bytes)", html.len());
    let sites = extract_table(&html).with_context(|| format!("Failed to parse {}", url))?;
    if sites.is_empty() {
        anyhow::bail!("No ranking rows parsed from {}", url);
    }

    info!("Parsed {} ranked websites", sites.len());
    Ok(sites)
}
