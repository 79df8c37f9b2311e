use std::sync::LazyLock;

use regex::Regex;
use tracing::debug;

use super::magnitude::parse_magnitude;
use crate::error::ExtractError;
use crate::records::RankingRecord;

static ROW_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"(?s)<tr[^>]*>(.*?)</tr>").unwrap());
static RANK_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"<td[^>]*>\s*(\d+)\s*</td>").unwrap());
// /websites/<host> — a single path segment
static SITE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r#"<a[^>]*href="/websites/([^"/]+)"[^>]*>([^<]+)</a>"#).unwrap());
// /websites/<country>/<category>
static CATEGORY_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r#"<a[^>]*href="/websites/[^"/]+/[^"]*"[^>]*>([^<]+)</a>"#).unwrap());
// First short span that starts with a digit, e.g. <span>80.4M</span> or <div><span>80.4M</span>…
static TRAFFIC_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?s)<td[^>]*>.*?<span[^>]*>\s*(\d[^<]{0,15})</span>").unwrap());

const TBODY_OPEN: &str = "<tbody";
const TBODY_CLOSE: &str = "</tbody>";

/// Extract ranking rows from the first `<tbody>` of a rendered ranking page.
///
/// Rows missing a rank, website or traffic figure are dropped. A missing or
/// unterminated body, or a traffic unit we don't know, fails the whole call.
pub fn extract_table(markup: &str) -> Result<Vec<RankingRecord>, ExtractError> {
    let body = find_body(markup)?;

    let mut records = Vec::new();
    let mut skipped = 0usize;

    for caps in ROW_RE.captures_iter(body) {
        match parse_row(&caps[1])? {
            Some(record) => records.push(record),
            None => skipped += 1,
        }
    }

    debug!(rows = records.len(), skipped, "extracted ranking table");
    Ok(records)
}

fn find_body(markup: &str) -> Result<&str, ExtractError> {
    let start = markup.find(TBODY_OPEN).ok_or(ExtractError::StructureNotFound)?;
    let len = markup[start..]
        .find(TBODY_CLOSE)
        .ok_or(ExtractError::Unterminated)?;
    Ok(&markup[start..start + len])
}

fn parse_row(row: &str) -> Result<Option<RankingRecord>, ExtractError> {
    let Some(rank) = RANK_RE
        .captures(row)
        .and_then(|c| c[1].parse::<u32>().ok())
        .filter(|r| *r > 0)
    else {
        return Ok(None);
    };

    let Some(website) = SITE_RE
        .captures(row)
        .map(|c| decode_entities(c[2].trim()))
        .filter(|w| !w.is_empty())
    else {
        debug!(rank, "row without website link");
        return Ok(None);
    };

    let category = CATEGORY_RE
        .captures(row)
        .map(|c| decode_entities(c[1].trim()))
        .filter(|c| !c.is_empty());

    let Some(traffic) = TRAFFIC_RE.captures(row) else {
        debug!(rank, %website, "row without traffic figure");
        return Ok(None);
    };
    let search_traffic_k = parse_magnitude(&traffic[1])?;

    Ok(Some(RankingRecord {
        rank,
        website,
        category,
        search_traffic_k,
    }))
}

/// Decode the handful of HTML entities that show up in table cells.
fn decode_entities(s: &str) -> String {
    s.replace("&lt;", "<")
        .replace("&gt;", ">")
        .replace("&quot;", "\"")
        .replace("&#39;", "'")
        .replace("&nbsp;", " ")
        .replace("&amp;", "&")
        .trim()
        .to_string()
}
