//! Conversion between implied probability and betting odds formats.

use super::{MAX_PRICE, MIN_PRICE};
use crate::domain::ports::Calculator;
use crate::utils::error::{CalcError, Result};
use crate::utils::parse::{parse_fraction, parse_number};
use crate::utils::validation::{validate_range, Validate};
use clap::{Args, ValueEnum};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "kebab-case")]
pub enum OddsFormat {
    /// 0.25 or 25%
    Probability,
    /// 4.0
    Decimal,
    /// 3/1
    Fractional,
    /// +300 or -200
    American,
}

#[derive(Debug, Clone, Serialize, Deserialize, Args)]
pub struct OddsInput {
    /// Format of --value
    #[arg(long, value_enum)]
    pub from: OddsFormat,

    #[arg(long, allow_hyphen_values = true)]
    pub value: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct OddsResult {
    pub probability: f64,
    pub probability_percent: f64,
    pub decimal_odds: f64,
    pub fractional_odds: String,
    pub american_odds: f64,
    pub american_display: String,
    /// Cost of the YES share on a $1 binary market at this probability.
    pub yes_price: f64,
    pub no_price: f64,
}

pub fn gcd(mut a: u64, mut b: u64) -> u64 {
    while b != 0 {
        (a, b) = (b, a % b);
    }
    a
}

/// Fractional odds from a probability rounded to whole percent, reduced by GCD.
pub fn fractional_odds(probability: f64) -> String {
    let win = (probability * 100.0).round() as u64;
    let lose = 100 - win;
    let divisor = gcd(lose, win).max(1);
    format!("{}/{}", lose / divisor, win / divisor)
}

pub fn american_odds(probability: f64) -> f64 {
    if probability > 0.5 {
        -(probability / (1.0 - probability)) * 100.0
    } else {
        (1.0 - probability) / probability * 100.0
    }
}

impl OddsInput {
    fn implied_probability(&self) -> Result<f64> {
        let raw = self.value.trim();
        let probability = match self.from {
            OddsFormat::Probability => match raw.strip_suffix('%') {
                Some(percent) => parse_number("value", percent)? / 100.0,
                None => parse_number("value", raw)?,
            },
            OddsFormat::Decimal => {
                let decimal = parse_number("value", raw)?;
                if decimal <= 1.0 {
                    return Err(CalcError::out_of_range(
                        "value",
                        decimal,
                        "decimal odds must be greater than 1",
                    ));
                }
                1.0 / decimal
            }
            OddsFormat::Fractional => {
                let (against, for_) = parse_fraction("value", raw)?;
                if against < 0.0 || for_ < 0.0 {
                    return Err(CalcError::parse("value", raw, "fraction parts cannot be negative"));
                }
                for_ / (against + for_)
            }
            OddsFormat::American => {
                let american = parse_number("value", raw)?;
                if american.abs() < 100.0 {
                    return Err(CalcError::out_of_range(
                        "value",
                        american,
                        "American odds are +100 or higher, or -100 or lower",
                    ));
                }
                if american > 0.0 {
                    100.0 / (american + 100.0)
                } else {
                    -american / (-american + 100.0)
                }
            }
        };
        Ok(probability)
    }
}

impl Validate for OddsInput {
    fn validate(&self) -> Result<()> {
        let probability = self.implied_probability()?;
        validate_range("probability", probability, MIN_PRICE, MAX_PRICE)
    }
}

impl Calculator for OddsInput {
    type Output = OddsResult;
    const NAME: &'static str = "odds";

    fn compute(&self) -> Result<OddsResult> {
        let probability = self.implied_probability()?;
        let american = american_odds(probability);
        let american_display = if american > 0.0 {
            format!("+{:.0}", american)
        } else {
            format!("{:.0}", american)
        };

        Ok(OddsResult {
            probability,
            probability_percent: probability * 100.0,
            decimal_odds: 1.0 / probability,
            fractional_odds: fractional_odds(probability),
            american_odds: american,
            american_display,
            yes_price: probability,
            no_price: 1.0 - probability,
        })
    }
}
