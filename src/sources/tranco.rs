use std::io::{Cursor, Read};

use anyhow::{Context, Result};
use reqwest::Client;
use tracing::info;

use super::http;
use crate::parser::{parse_tranco_csv, TrancoList};
use crate::settings::Settings;

const CSV_ENTRY: &str = "top-1m.csv";

/// Download the zipped Tranco top-1m list and keep the configured TLD.
pub async fn fetch_list(client: &Client, settings: &Settings) -> Result<TrancoList> {
    let archive = http::download(client, &settings.tranco_url).await?;
    let csv = read_csv_entry(&archive)?;

    let list = parse_tranco_csv(&csv, &settings.tld);
    info!(
        "Tranco: {} lines, {} .{} domains",
        list.lines,
        list.entries.len(),
        settings.tld
    );
    Ok(list)
}

fn read_csv_entry(archive: &[u8]) -> Result<String> {
    let mut zip = zip::ZipArchive::new(Cursor::new(archive))
        .context("Downloaded Tranco list is not a zip archive")?;
    let mut entry = zip
        .by_name(CSV_ENTRY)
        .with_context(|| format!("{} not found in Tranco archive", CSV_ENTRY))?;

    let mut csv = String::with_capacity(entry.size() as usize);
    entry
        .read_to_string(&mut csv)
        .with_context(|| format!("{} is not valid UTF-8", CSV_ENTRY))?;
    Ok(csv)
}
