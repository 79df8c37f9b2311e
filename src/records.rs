use serde::{Deserialize, Serialize};

/// One row of a rendered ranking table (AhrefsTop).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RankingRecord {
    pub rank: u32,
    pub website: String,
    pub category: Option<String>,
    #[serde(rename = "search_traffic_K")]
    pub search_traffic_k: u64,
}

/// One row of the Tranco top-1m list that passed the TLD filter.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TrancoEntry {
    pub rank: u32,
    pub domain: String,
    pub url: String,
}

impl TrancoEntry {
    pub fn new(rank: u32, domain: &str) -> Self {
        TrancoEntry {
            rank,
            domain: domain.to_string(),
            url: format!("https://{}", domain),
        }
    }
}

/// One entry of the Cloudflare Radar top-domains ranking.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RadarEntry {
    pub rank: u32,
    pub domain: String,
    #[serde(default)]
    pub categories: Vec<serde_json::Value>,
}

/// A row of any saved ranking list, as read back by the duplicate check.
///
/// Tranco and Radar lists name the host `domain`, AhrefsTop lists `website`.
/// Fields other than these three are kept in `extra` and written back out.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DomainRecord {
    #[serde(default, alias = "website", skip_serializing_if = "Option::is_none")]
    pub domain: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rank: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

impl DomainRecord {
    pub fn domain(&self) -> &str {
        self.domain.as_deref().unwrap_or("")
    }
}
