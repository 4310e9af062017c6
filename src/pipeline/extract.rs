//! Diagnosis extraction: pull the first fenced JSON block out of the
//! analysis model's free-text output.

use std::sync::OnceLock;

use regex::Regex;
use serde_json::{Map, Value};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ExtractionError {
    #[error("No JSON content found in analysis output")]
    NoJsonBlock,

    #[error("Invalid JSON in analysis output: {0}")]
    InvalidJson(#[from] serde_json::Error),
}

/// First ```json fenced object in a response. Non-greedy so the block
/// ends at the first closing fence; (?s) lets it span lines.
fn json_block_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| {
        Regex::new(r"(?s)```json\s*(\{.*?\})\s*```").expect("Failed to compile JSON block pattern")
    })
}

/// Extract the diagnosis mapping from raw model output.
///
/// Exactly one of three outcomes: no fenced object anywhere
/// ([`ExtractionError::NoJsonBlock`]), a block that is not valid JSON
/// ([`ExtractionError::InvalidJson`], carrying the parse position), or
/// the parsed mapping returned as-is. No field names or types are
/// validated here; the orchestrator stamps identity onto whatever
/// comes back.
pub fn extract_report(raw_text: &str) -> Result<Map<String, Value>, ExtractionError> {
    let captures = json_block_pattern()
        .captures(raw_text)
        .ok_or(ExtractionError::NoJsonBlock)?;

    let block = captures
        .get(1)
        .ok_or(ExtractionError::NoJsonBlock)?
        .as_str();
    let parsed: Map<String, Value> = serde_json::from_str(block)?;
    Ok(parsed)
}
