//! Built-in value coercions.
//!
//! Integer coercions go straight through `str::parse`, whose errors already
//! distinguish syntax from range. The helpers here cover the kinds that need
//! more than that: the boolean literal set, the float range ceilings,
//! comma-separated string lists, and RFC 3339 timestamps.

use chrono::{DateTime, FixedOffset};
use thiserror::Error;

use crate::error::BoxError;

/// A boolean argument value was not one of the accepted literals.
#[derive(Debug, Error)]
#[error("invalid boolean literal {raw:?}")]
pub struct ParseBoolError {
    /// The rejected raw value.
    pub raw: String,
}

/// A float literal parsed but exceeds the destination width's range.
#[derive(Debug, Error)]
#[error("value {raw:?} out of range for {bits}-bit float")]
pub struct FloatRangeError {
    /// The out-of-range raw value.
    pub raw: String,
    /// Width of the destination float type.
    pub bits: u16,
}

/// Accepts `1`/`t`/`T`/`TRUE`/`true`/`True` and the corresponding false
/// literals; anything else (including `yes`) is rejected.
pub(crate) fn parse_bool(raw: &str) -> Result<bool, ParseBoolError> {
    match raw {
        "1" | "t" | "T" | "TRUE" | "true" | "True" => Ok(true),
        "0" | "f" | "F" | "FALSE" | "false" | "False" => Ok(false),
        _ => Err(ParseBoolError { raw: raw.to_owned() }),
    }
}

/// Parse a 64-bit float, treating literals beyond the f64 range as a range
/// error rather than saturating to infinity. Explicit `inf`/`infinity`
/// literals still pass through.
pub(crate) fn parse_f64(raw: &str) -> Result<f64, BoxError> {
    let value: f64 = raw.parse()?;
    if value.is_infinite() && !infinite_literal(raw) {
        return Err(FloatRangeError {
            raw: raw.to_owned(),
            bits: 64,
        }
        .into());
    }
    Ok(value)
}

/// Parse a 32-bit float with the f32 range as the ceiling.
pub(crate) fn parse_f32(raw: &str) -> Result<f32, BoxError> {
    let wide = parse_f64(raw)?;
    if wide.is_finite() && wide.abs() > f64::from(f32::MAX) {
        return Err(FloatRangeError {
            raw: raw.to_owned(),
            bits: 32,
        }
        .into());
    }
    #[expect(clippy::cast_possible_truncation, reason = "range checked above")]
    let narrow = wide as f32;
    Ok(narrow)
}

fn infinite_literal(raw: &str) -> bool {
    let body = raw.strip_prefix(['+', '-']).unwrap_or(raw);
    body.eq_ignore_ascii_case("inf") || body.eq_ignore_ascii_case("infinity")
}

/// Split a raw value on `,`, trimming surrounding whitespace per element.
///
/// An empty raw value yields an empty (not absent) list.
pub(crate) fn parse_string_list(raw: &str) -> Vec<String> {
    if raw.is_empty() {
        return Vec::new();
    }
    raw.split(',').map(|part| part.trim().to_owned()).collect()
}

/// Parse an RFC 3339 timestamp, preserving its offset.
pub(crate) fn parse_timestamp(raw: &str) -> Result<DateTime<FixedOffset>, chrono::ParseError> {
    DateTime::parse_from_rfc3339(raw)
}
