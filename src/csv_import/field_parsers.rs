//! Field parsing utilities for CSV import.
//!
//! Pure functions that turn raw cell text into typed field values. Expected
//! missing-field cases degrade to documented defaults instead of failing.

use chrono::NaiveDate;
use log::{debug, warn};

/// Date formats accepted for the `expiry_date` column, tried in order.
/// ISO dates (the export format) are checked first.
const DATE_FORMATS: &[&str] = &[
    "%Y-%m-%d",
    "%Y/%m/%d",
    "%d.%m.%Y",
    "%d/%m/%Y",
    "%m/%d/%Y",
    "%d-%m-%Y",
];

/// Parses an expiry date from common textual representations.
///
/// # Arguments
/// * `raw` - A date string such as "2026-03-01" or "01.03.2026"
///
/// # Returns
/// The parsed date, or `None` for empty or unparsable input. A record
/// without a readable expiry date is stored with no expiry; this is never
/// a row failure.
pub fn parse_expiry_date(raw: &str) -> Option<NaiveDate> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return None;
    }

    for format in DATE_FORMATS {
        if let Ok(date) = NaiveDate::parse_from_str(trimmed, format) {
            debug!("Parsed expiry date '{trimmed}' as {date}");
            return Some(date);
        }
    }

    warn!("Unparsable expiry date '{trimmed}', storing record without expiry");
    None
}

/// Parses a non-negative count field (quantity or threshold).
///
/// # Arguments
/// * `raw` - The cell text, or `None` when the column is absent
/// * `default` - Value substituted for missing, unparsable or negative input
/// * `field` - Field name for log messages
///
/// # Returns
/// The parsed count, or `default`.
pub fn parse_count(raw: Option<&str>, default: i64, field: &str) -> i64 {
    let trimmed = match raw {
        Some(s) => s.trim(),
        None => return default,
    };
    if trimmed.is_empty() {
        return default;
    }

    match trimmed.parse::<i64>() {
        Ok(value) if value >= 0 => value,
        Ok(value) => {
            warn!("Negative {field} '{value}', using default {default}");
            default
        }
        Err(_) => {
            warn!("Unparsable {field} '{trimmed}', using default {default}");
            default
        }
    }
}

/// Trims an optional text field, mapping empty results to absent.
pub fn normalize_optional(raw: Option<String>) -> Option<String> {
    raw.map(|s| s.trim().to_string()).filter(|s| !s.is_empty())
}

#[cfg(test)]
#[path = "field_parsers_tests.rs"]
mod tests;
