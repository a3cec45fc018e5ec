//! Argument validation and normalisation.
//!
//! Every check here runs before a request is sent, so a malformed argument
//! never costs a round-trip.

use crate::error::{LinearError, Result};
use regex::Regex;
use std::sync::LazyLock;

/// Maximum number of records a single listing may request.
pub const MAX_LIMIT: usize = 250;

/// Maximum allowed length for an issue title.
pub const MAX_TITLE_LENGTH: usize = 255;

/// Lowest and highest priority values the tracker accepts.
pub const PRIORITY_RANGE: std::ops::RangeInclusive<i64> = 0..=4;

static ISSUE_ID_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[A-Za-z]+-[0-9]+$").expect("static regex"));

/// Validates an issue identifier such as `ENG-123` and returns it upper-cased.
pub fn validate_issue_id(id: &str) -> Result<String> {
    let id = id.trim();
    if !ISSUE_ID_RE.is_match(id) {
        return Err(LinearError::Validation(format!(
            "'{}' is not a valid issue ID (expected a team key, a hyphen and a number, e.g. ENG-123)",
            id
        )));
    }
    Ok(id.to_uppercase())
}

/// Validates a priority given as a string (`"2"`, `" 3 "`).
pub fn validate_priority(value: &str) -> Result<u8> {
    let parsed: i64 = value.trim().parse().map_err(|_| {
        LinearError::Validation(format!(
            "Priority must be an integer between 0 and 4, got '{}'",
            value
        ))
    })?;
    validate_priority_value(parsed)
}

/// Validates a numeric priority.
pub fn validate_priority_value(value: i64) -> Result<u8> {
    if !PRIORITY_RANGE.contains(&value) {
        return Err(LinearError::Validation(format!(
            "Priority must be between 0 (none) and 4 (low), got {}",
            value
        )));
    }
    Ok(value as u8)
}

/// Clamps a requested limit to `1..=MAX_LIMIT`.
pub fn clamp_limit(limit: usize) -> usize {
    limit.clamp(1, MAX_LIMIT)
}

/// Trims free text and strips control characters other than newlines and tabs.
pub fn sanitize_text(text: &str) -> String {
    text.chars()
        .filter(|c| !c.is_control() || *c == '\n' || *c == '\t')
        .collect::<String>()
        .trim()
        .to_string()
}

/// Sanitises a required text field and rejects blank values.
pub fn require_text(field: &str, value: &str) -> Result<String> {
    let cleaned = sanitize_text(value);
    if cleaned.is_empty() {
        return Err(LinearError::Validation(format!("{} cannot be empty", field)));
    }
    Ok(cleaned)
}

/// Validates an issue title.
pub fn validate_title(title: &str) -> Result<String> {
    let cleaned = require_text("Title", title)?;
    if cleaned.chars().count() > MAX_TITLE_LENGTH {
        return Err(LinearError::Validation(format!(
            "Title exceeds maximum length of {} characters",
            MAX_TITLE_LENGTH
        )));
    }
    Ok(cleaned)
}

/// Splits a comma-separated list, dropping blanks.
pub fn parse_label_list(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(sanitize_text)
        .filter(|s| !s.is_empty())
        .collect()
}
