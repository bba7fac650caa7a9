use super::{parse_duration, DurationBreakdown};
use crate::domain::ports::Calculator;
use crate::utils::error::{CalcError, Result};
use crate::utils::validation::Validate;
use clap::{Args, ValueEnum};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "kebab-case")]
pub enum TimeOperation {
    #[default]
    Add,
    Subtract,
}

#[derive(Debug, Clone, Serialize, Deserialize, Args)]
pub struct TimeInput {
    /// First duration, e.g. "1d 2h 30m" or "02:30:00"
    #[arg(long, allow_hyphen_values = true)]
    pub first: String,

    #[arg(long, value_enum, default_value_t = TimeOperation::Add)]
    #[serde(default)]
    pub operation: TimeOperation,

    /// Second duration
    #[arg(long, allow_hyphen_values = true)]
    pub second: String,
}

impl Validate for TimeInput {
    fn validate(&self) -> Result<()> {
        parse_duration("first", &self.first)?;
        parse_duration("second", &self.second)?;
        Ok(())
    }
}

impl Calculator for TimeInput {
    type Output = DurationBreakdown;
    const NAME: &'static str = "time";

    fn compute(&self) -> Result<DurationBreakdown> {
        let first = parse_duration("first", &self.first)?;
        let second = parse_duration("second", &self.second)?;
        let total = match self.operation {
            TimeOperation::Add => first.checked_add(second),
            TimeOperation::Subtract => first.checked_sub(second),
        }
        .ok_or_else(|| CalcError::domain("duration overflow"))?;

        Ok(DurationBreakdown::from_seconds(total))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn time(first: &str, operation: TimeOperation, second: &str) -> Result<DurationBreakdown> {
        TimeInput {
            first: first.to_string(),
            operation,
            second: second.to_string(),
        }
        .calculate()
    }

    #[test]
    fn test_add_normalizes_carry() {
        let result = time("1h 45m", TimeOperation::Add, "30m 30s").unwrap();
        assert_eq!((result.days, result.hours, result.minutes, result.seconds), (0, 2, 15, 30));
        assert_eq!(result.total_seconds, 8_130);
    }

    #[test]
    fn test_subtract_goes_negative() {
        let result = time("01:00", TimeOperation::Subtract, "1d").unwrap();
        assert!(result.negative);
        assert_eq!(result.display, "-0d 23h 0m 0s");
    }

    #[test]
    fn test_subtract_to_most_negative_span() {
        let result = time("-9223372036854775807s", TimeOperation::Subtract, "1s").unwrap();
        assert_eq!(result.total_seconds, i64::MIN);
        assert!(result.negative);
        assert!(result.days > 0);
    }

    #[test]
    fn test_invalid_duration() {
        assert!(matches!(
            time("lunch", TimeOperation::Add, "1h"),
            Err(CalcError::Parse { .. })
        ));
    }
}
