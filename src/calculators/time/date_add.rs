use super::parse_duration;
use crate::domain::ports::Calculator;
use crate::utils::error::{CalcError, Result};
use crate::utils::validation::Validate;
use chrono::{Duration, NaiveDate, NaiveDateTime, NaiveTime};
use clap::Args;
use serde::{Deserialize, Serialize};

const DATETIME_FORMATS: [&str; 3] = ["%Y-%m-%d %H:%M:%S", "%Y-%m-%d %H:%M", "%Y-%m-%dT%H:%M:%S"];

#[derive(Debug, Clone, Serialize, Deserialize, Args)]
pub struct DateAddInput {
    /// Start as YYYY-MM-DD or YYYY-MM-DD HH:MM[:SS]
    #[arg(long)]
    pub start: String,

    /// Duration to add, e.g. "10d 4h" or "-3d"
    #[arg(long, allow_hyphen_values = true)]
    pub duration: String,

    /// Subtract the duration instead of adding it
    #[arg(long)]
    #[serde(default)]
    pub subtract: bool,
}

#[derive(Debug, Clone, Serialize)]
pub struct DateAddResult {
    pub start: NaiveDateTime,
    pub result: NaiveDateTime,
    pub weekday: String,
    pub offset_seconds: i64,
}

pub fn parse_datetime(field: &str, raw: &str) -> Result<NaiveDateTime> {
    let trimmed = raw.trim();
    if let Ok(date) = NaiveDate::parse_from_str(trimmed, "%Y-%m-%d") {
        return Ok(date.and_time(NaiveTime::MIN));
    }
    DATETIME_FORMATS
        .iter()
        .find_map(|format| NaiveDateTime::parse_from_str(trimmed, format).ok())
        .ok_or_else(|| CalcError::parse(field, raw, "expected YYYY-MM-DD or YYYY-MM-DD HH:MM[:SS]"))
}

impl Validate for DateAddInput {
    fn validate(&self) -> Result<()> {
        parse_datetime("start", &self.start)?;
        parse_duration("duration", &self.duration)?;
        Ok(())
    }
}

impl Calculator for DateAddInput {
    type Output = DateAddResult;
    const NAME: &'static str = "date-add";

    fn compute(&self) -> Result<DateAddResult> {
        let start = parse_datetime("start", &self.start)?;
        let mut offset_seconds = parse_duration("duration", &self.duration)?;
        if self.subtract {
            offset_seconds = -offset_seconds;
        }

        let offset = Duration::try_seconds(offset_seconds)
            .ok_or_else(|| CalcError::domain("duration is too large"))?;
        let result = start
            .checked_add_signed(offset)
            .ok_or_else(|| CalcError::domain("resulting date is out of range"))?;

        Ok(DateAddResult {
            start,
            result,
            weekday: result.format("%A").to_string(),
            offset_seconds,
        })
    }
}
