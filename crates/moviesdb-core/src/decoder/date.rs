//! Calendar date parsing for TMDB payloads
//!
//! TMDB dates are `YYYY-MM-DD`. An empty string means "unknown", which is
//! common for unreleased titles.

use std::sync::OnceLock;

use chrono::NaiveDate;
use regex_lite::Regex;

use crate::error::DecodeError;

const DATE_SHAPE: &str = r"^\d{4}-\d{2}-\d{2}$";

fn date_shape() -> Option<&'static Regex> {
    static SHAPE: OnceLock<Option<Regex>> = OnceLock::new();
    SHAPE.get_or_init(|| Regex::new(DATE_SHAPE).ok()).as_ref()
}

/// Parse an optional TMDB date field.
///
/// # Returns
/// * `Ok(None)` if the value is missing or empty
/// * `Ok(Some(date))` for a valid `YYYY-MM-DD` calendar date
/// * `Err(DecodeError::MalformedField)` for anything else
pub fn parse_date(field: &'static str, raw: Option<&str>) -> Result<Option<NaiveDate>, DecodeError> {
    let raw = match raw {
        Some(raw) if !raw.is_empty() => raw,
        _ => return Ok(None),
    };

    let shaped = date_shape().is_some_and(|shape| shape.is_match(raw));
    if !shaped {
        return Err(DecodeError::MalformedField {
            field,
            reason: format!("expected YYYY-MM-DD, got {raw:?}"),
        });
    }

    NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .map(Some)
        .map_err(|e| DecodeError::MalformedField {
            field,
            reason: format!("{raw:?} is not a calendar date: {e}"),
        })
}
