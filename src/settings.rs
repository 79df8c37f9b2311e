use anyhow::{Context, Result};
use config::{Config, Environment};
use serde::Deserialize;

const TOKEN_PLACEHOLDER: &str = "YOUR_API_TOKEN_HERE";

/// Runtime settings: defaults, then `RANK_*` env vars, then `CLOUDFLARE_API_TOKEN`.
#[derive(Debug, Clone, Deserialize)]
pub struct Settings {
    pub output_dir: String,
    /// AhrefsTop country slug, e.g. "taiwan".
    pub country: String,
    /// Top-level domain kept from the Tranco list and used in file names.
    pub tld: String,
    /// Cloudflare Radar location code.
    pub location: String,
    pub limit: u32,
    pub accept_invalid_certs: bool,
    pub ahrefs_url: String,
    pub tranco_url: String,
    pub radar_url: String,
    #[serde(default)]
    pub api_token: Option<String>,
}

impl Settings {
    pub fn load() -> Result<Self> {
        Config::builder()
            .set_default("output_dir", ".")?
            .set_default("country", "taiwan")?
            .set_default("tld", "tw")?
            .set_default("location", "TW")?
            .set_default("limit", 100)?
            .set_default("accept_invalid_certs", false)?
            .set_default("ahrefs_url", "https://ahrefstop.com/websites")?
            .set_default("tranco_url", "https://tranco-list.eu/top-1m.csv.zip")?
            .set_default("radar_url", "https://api.cloudflare.com/client/v4/radar/ranking/top")?
            .add_source(Environment::with_prefix("RANK").try_parsing(true))
            .add_source(Environment::with_prefix("CLOUDFLARE"))
            .build()
            .context("Failed to load settings")?
            .try_deserialize()
            .context("Invalid settings")
    }

    /// Cloudflare token, rejecting the unset and placeholder cases.
    pub fn radar_token(&self) -> Result<&str> {
        match self.api_token.as_deref().map(str::trim) {
            Some(t) if !t.is_empty() && t != TOKEN_PLACEHOLDER => Ok(t),
            _ => anyhow::bail!(
                "CLOUDFLARE_API_TOKEN is not set (create one at https://dash.cloudflare.com/profile/api-tokens)"
            ),
        }
    }

    pub fn ahrefs_page(&self) -> String {
        format!("{}/{}", self.ahrefs_url.trim_end_matches('/'), self.country)
    }

    pub fn output_file(&self, name: &str) -> std::path::PathBuf {
        std::path::Path::new(&self.output_dir).join(name)
    }
}
