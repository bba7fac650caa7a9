//! Duration arithmetic and calendar calculators.

pub mod age;
pub mod date_add;
pub mod duration;

use crate::utils::error::{CalcError, Result};
use regex::Regex;
use serde::Serialize;
use std::sync::OnceLock;

const SECONDS_PER_MINUTE: i64 = 60;
const SECONDS_PER_HOUR: i64 = 3_600;
const SECONDS_PER_DAY: i64 = 86_400;

fn unit_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| Regex::new(r"(\d+)\s*([dhms])").expect("static regex"))
}

fn clock_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| {
        Regex::new(r"^(\d+):([0-5]?\d)(?::([0-5]?\d))?$").expect("static regex")
    })
}

fn capture_i64(field: &str, raw: &str, digits: &str) -> Result<i64> {
    digits
        .parse()
        .map_err(|_| CalcError::parse(field, raw, "number too large"))
}

/// Parse `1d 2h 30m 15s` (any subset, any order) or `HH:MM[:SS]` into
/// signed seconds. A leading `-` negates the whole duration.
pub fn parse_duration(field: &str, raw: &str) -> Result<i64> {
    let trimmed = raw.trim();
    let (sign, body) = match trimmed.strip_prefix('-') {
        Some(rest) => (-1, rest.trim_start()),
        None => (1, trimmed),
    };
    if body.is_empty() {
        return Err(CalcError::parse(field, raw, "duration is empty"));
    }

    if let Some(caps) = clock_pattern().captures(body) {
        let hours = capture_i64(field, raw, &caps[1])?;
        let minutes = capture_i64(field, raw, &caps[2])?;
        let seconds = match caps.get(3) {
            Some(m) => capture_i64(field, raw, m.as_str())?,
            None => 0,
        };
        let total = hours
            .checked_mul(SECONDS_PER_HOUR)
            .and_then(|secs| secs.checked_add(minutes * SECONDS_PER_MINUTE + seconds))
            .ok_or_else(|| CalcError::parse(field, raw, "duration too large"))?;
        return Ok(sign * total);
    }

    let mut total = 0i64;
    let mut consumed = 0usize;
    for caps in unit_pattern().captures_iter(body) {
        let amount = capture_i64(field, raw, &caps[1])?;
        let scale = match &caps[2] {
            "d" => SECONDS_PER_DAY,
            "h" => SECONDS_PER_HOUR,
            "m" => SECONDS_PER_MINUTE,
            _ => 1,
        };
        total = amount
            .checked_mul(scale)
            .and_then(|secs| total.checked_add(secs))
            .ok_or_else(|| CalcError::parse(field, raw, "duration too large"))?;
        consumed += caps[0].len();
    }

    // Everything that is not a matched component must be whitespace.
    let non_space = body.chars().filter(|c| !c.is_whitespace()).count();
    let matched_non_space = unit_pattern()
        .find_iter(body)
        .map(|m| m.as_str().chars().filter(|c| !c.is_whitespace()).count())
        .sum::<usize>();
    if consumed == 0 || non_space != matched_non_space {
        return Err(CalcError::parse(
            field,
            raw,
            "expected a duration like '1d 2h 30m 15s' or 'HH:MM:SS'",
        ));
    }

    Ok(sign * total)
}

/// A signed span broken into days, hours, minutes and seconds.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DurationBreakdown {
    pub negative: bool,
    pub days: i64,
    pub hours: i64,
    pub minutes: i64,
    pub seconds: i64,
    pub total_seconds: i64,
    pub total_minutes: f64,
    pub total_hours: f64,
    pub total_days: f64,
    pub display: String,
}

impl DurationBreakdown {
    pub fn from_seconds(total_seconds: i64) -> Self {
        // u64 so that i64::MIN has a magnitude.
        let magnitude = total_seconds.unsigned_abs();
        let (day, hour, minute) = (
            SECONDS_PER_DAY as u64,
            SECONDS_PER_HOUR as u64,
            SECONDS_PER_MINUTE as u64,
        );
        let days = (magnitude / day) as i64;
        let hours = (magnitude % day / hour) as i64;
        let minutes = (magnitude % hour / minute) as i64;
        let seconds = (magnitude % minute) as i64;
        let negative = total_seconds < 0;

        let display = format!(
            "{}{}d {}h {}m {}s",
            if negative { "-" } else { "" },
            days,
            hours,
            minutes,
            seconds
        );

        let secs = total_seconds as f64;
        Self {
            negative,
            days,
            hours,
            minutes,
            seconds,
            total_seconds,
            total_minutes: secs / SECONDS_PER_MINUTE as f64,
            total_hours: secs / SECONDS_PER_HOUR as f64,
            total_days: secs / SECONDS_PER_DAY as f64,
            display,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_unit_durations() {
        assert_eq!(parse_duration("d", "1d 2h 30m 15s").unwrap(), 95_415);
        assert_eq!(parse_duration("d", "90m").unwrap(), 5_400);
        assert_eq!(parse_duration("d", "15s 1h").unwrap(), 3_615);
        assert_eq!(parse_duration("d", "-2h").unwrap(), -7_200);
    }

    #[test]
    fn test_parse_clock_durations() {
        assert_eq!(parse_duration("d", "01:30").unwrap(), 5_400);
        assert_eq!(parse_duration("d", "26:00:30").unwrap(), 93_630);
    }

    #[test]
    fn test_parse_rejects_garbage() {
        assert!(parse_duration("d", "").is_err());
        assert!(parse_duration("d", "soon").is_err());
        assert!(parse_duration("d", "1h and 5m").is_err());
        assert!(parse_duration("d", "1:75").is_err());
    }

    #[test]
    fn test_parse_clock_overflow_is_an_error() {
        assert!(matches!(
            parse_duration("first", "9223372036854775807:00"),
            Err(CalcError::Parse { .. })
        ));
        assert!(parse_duration("first", "2562047788015216:00:00").is_err());
    }

    #[test]
    fn test_breakdown_of_most_negative_span() {
        let b = DurationBreakdown::from_seconds(i64::MIN);
        assert!(b.negative);
        assert_eq!(b.days, 106_751_991_167_300);
        assert_eq!((b.hours, b.minutes, b.seconds), (15, 30, 8));
    }

    #[test]
    fn test_breakdown() {
        let b = DurationBreakdown::from_seconds(-95_415);
        assert!(b.negative);
        assert_eq!((b.days, b.hours, b.minutes, b.seconds), (1, 2, 30, 15));
        assert_eq!(b.display, "-1d 2h 30m 15s");
        assert!((b.total_hours + 26.504_166_666).abs() < 1e-6);
    }
}
