//! Text-to-number parsing shared by the CLI and free-text inputs.
//!
//! Blank or malformed input is an error, never a silent zero.

use crate::utils::error::{CalcError, Result};
use regex::Regex;
use std::sync::OnceLock;

/// Parse one finite decimal number, naming `field` in the error.
pub fn parse_number(field: &str, raw: &str) -> Result<f64> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Err(CalcError::parse(field, raw, "value is empty"));
    }

    let value: f64 = trimmed
        .parse()
        .map_err(|_| CalcError::parse(field, raw, "not a number"))?;

    if !value.is_finite() {
        return Err(CalcError::parse(field, raw, "value must be finite"));
    }
    Ok(value)
}

/// clap value parser for numeric flags.
pub fn finite_number(raw: &str) -> std::result::Result<f64, String> {
    parse_number("argument", raw).map_err(|e| e.to_string())
}

/// Split a free-text list on commas, semicolons and whitespace.
pub fn parse_number_list(field: &str, raw: &str) -> Result<Vec<f64>> {
    static SEPARATORS: OnceLock<Regex> = OnceLock::new();
    let separators = SEPARATORS.get_or_init(|| Regex::new(r"[,;\s]+").expect("static regex"));

    separators
        .split(raw.trim())
        .filter(|token| !token.is_empty())
        .map(|token| parse_number(field, token))
        .collect()
}

/// Parse a fraction like `3/2` into (numerator, denominator).
pub fn parse_fraction(field: &str, raw: &str) -> Result<(f64, f64)> {
    let (num, den) = raw
        .split_once('/')
        .ok_or_else(|| CalcError::parse(field, raw, "expected the form a/b"))?;
    let num = parse_number(field, num)?;
    let den = parse_number(field, den)?;
    if den == 0.0 {
        return Err(CalcError::parse(field, raw, "denominator cannot be zero"));
    }
    Ok((num, den))
}
