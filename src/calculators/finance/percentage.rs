use crate::domain::ports::Calculator;
use crate::utils::error::{CalcError, Result};
use crate::utils::parse::finite_number;
use crate::utils::validation::{validate_finite, Validate};
use clap::{Args, ValueEnum};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "kebab-case")]
pub enum PercentageMode {
    /// X% of Y
    Of,
    /// X is what percent of Y
    WhatPercent,
    /// Percent change from X to Y
    Change,
}

#[derive(Debug, Clone, Serialize, Deserialize, Args)]
pub struct PercentageInput {
    #[arg(long, value_enum)]
    pub mode: PercentageMode,

    #[arg(long, allow_hyphen_values = true, value_parser = finite_number)]
    pub x: f64,

    #[arg(long, allow_hyphen_values = true, value_parser = finite_number)]
    pub y: f64,
}

#[derive(Debug, Clone, Serialize)]
pub struct PercentageResult {
    pub result: f64,
    pub expression: String,
}

impl Validate for PercentageInput {
    fn validate(&self) -> Result<()> {
        validate_finite("x", self.x)?;
        validate_finite("y", self.y)?;
        match self.mode {
            PercentageMode::Of => Ok(()),
            PercentageMode::WhatPercent if self.y == 0.0 => {
                Err(CalcError::domain("cannot take a percentage of zero"))
            }
            PercentageMode::Change if self.x == 0.0 => {
                Err(CalcError::domain("percent change from zero is undefined"))
            }
            _ => Ok(()),
        }
    }
}

impl Calculator for PercentageInput {
    type Output = PercentageResult;
    const NAME: &'static str = "percentage";

    fn compute(&self) -> Result<PercentageResult> {
        let (x, y) = (self.x, self.y);
        let (result, expression) = match self.mode {
            PercentageMode::Of => {
                let result = x / 100.0 * y;
                (result, format!("{}% of {} = {}", x, y, result))
            }
            PercentageMode::WhatPercent => {
                let result = x / y * 100.0;
                (result, format!("{} is {}% of {}", x, result, y))
            }
            PercentageMode::Change => {
                let result = (y - x) / x.abs() * 100.0;
                let direction = if result >= 0.0 { "increase" } else { "decrease" };
                (
                    result,
                    format!("{} to {} is a {}% {}", x, y, result.abs(), direction),
                )
            }
        };
        Ok(PercentageResult { result, expression })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn calc(mode: PercentageMode, x: f64, y: f64) -> Result<PercentageResult> {
        PercentageInput { mode, x, y }.calculate()
    }

    #[test]
    fn test_modes() {
        let of = calc(PercentageMode::Of, 20.0, 150.0).unwrap();
        assert!((of.result - 30.0).abs() < 1e-9);
        let what = calc(PercentageMode::WhatPercent, 30.0, 150.0).unwrap();
        assert!((what.result - 20.0).abs() < 1e-9);
        let change = calc(PercentageMode::Change, 80.0, 60.0).unwrap();
        assert_eq!(change.result, -25.0);
        assert_eq!(change.expression, "80 to 60 is a 25% decrease");
    }

    #[test]
    fn test_change_from_negative_base() {
        let change = calc(PercentageMode::Change, -50.0, -25.0).unwrap();
        assert_eq!(change.result, 50.0);
    }

    #[test]
    fn test_non_finite_inputs_are_rejected() {
        assert!(matches!(
            calc(PercentageMode::Of, f64::NAN, 5.0),
            Err(CalcError::OutOfRange { .. })
        ));
        assert!(calc(PercentageMode::Of, 5.0, f64::INFINITY).is_err());
    }

    #[test]
    fn test_division_by_zero() {
        assert!(calc(PercentageMode::WhatPercent, 5.0, 0.0).is_err());
        assert!(calc(PercentageMode::Change, 0.0, 5.0).is_err());
    }
}
