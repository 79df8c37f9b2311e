use std::sync::LazyLock;

use regex::Regex;

use crate::error::ExtractError;

static MAGNITUDE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^([0-9]+(?:\.[0-9]+)?)(.*)$").unwrap());

/// Parse a compact traffic figure ("80.4M", "500K", "1,200") into thousands.
///
/// Input without a leading number counts as no traffic and yields 0. A number
/// followed by anything other than K/M (or nothing) is an error: scaling it by
/// a guessed factor would corrupt every downstream rank.
pub fn parse_magnitude(text: &str) -> Result<u64, ExtractError> {
    let cleaned: String = text
        .trim()
        .chars()
        .filter(|c| !c.is_whitespace() && *c != ',')
        .collect();

    let Some(caps) = MAGNITUDE_RE.captures(&cleaned) else {
        return Ok(0);
    };
    let Ok(value) = caps[1].parse::<f64>() else {
        return Ok(0);
    };

    match &caps[2] {
        "" | "K" | "k" => Ok(value.round() as u64),
        "M" | "m" => Ok((value * 1000.0).round() as u64),
        unit => Err(ExtractError::FormatDrift {
            unit: unit.to_string(),
            input: text.to_string(),
        }),
    }
}
