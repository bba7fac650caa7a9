use super::{MAX_PRICE, MIN_PRICE};
use crate::domain::ports::Calculator;
use crate::utils::error::Result;
use crate::utils::parse::finite_number;
use crate::utils::validation::{validate_positive, validate_range, Validate};
use clap::Args;
use serde::{Deserialize, Serialize};

fn default_kelly_multiplier() -> f64 {
    1.0
}

#[derive(Debug, Clone, Serialize, Deserialize, Args)]
pub struct ExpectedValueInput {
    /// Share price in dollars (0.01-0.99), i.e. the market's implied probability
    #[arg(long, value_parser = finite_number)]
    pub price: f64,

    /// Your estimated probability that the outcome resolves YES (0.01-0.99)
    #[arg(long, value_parser = finite_number)]
    pub probability: f64,

    /// Dollars spent on shares
    #[arg(long, value_parser = finite_number)]
    pub stake: f64,

    /// Total bankroll, enables a suggested Kelly stake
    #[arg(long, value_parser = finite_number)]
    #[serde(default)]
    pub bankroll: Option<f64>,

    /// Fraction of full Kelly to bet (e.g. 0.5 for half Kelly)
    #[arg(long, default_value_t = 1.0, value_parser = finite_number)]
    #[serde(default = "default_kelly_multiplier")]
    pub kelly_multiplier: f64,
}

#[derive(Debug, Clone, Serialize)]
pub struct ExpectedValueResult {
    pub shares: f64,
    pub profit_if_win: f64,
    pub loss_if_lose: f64,
    pub expected_value: f64,
    pub expected_return_percent: f64,
    pub edge: f64,
    pub kelly_fraction: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub suggested_stake: Option<f64>,
    pub recommendation: &'static str,
}

/// Full-Kelly bankroll fraction for buying a $1 share at `price`
/// when the true probability is `probability`. Never negative.
pub fn kelly_fraction(price: f64, probability: f64) -> f64 {
    ((probability - price) / (1.0 - price)).max(0.0)
}

impl Validate for ExpectedValueInput {
    fn validate(&self) -> Result<()> {
        validate_range("price", self.price, MIN_PRICE, MAX_PRICE)?;
        validate_range("probability", self.probability, MIN_PRICE, MAX_PRICE)?;
        validate_positive("stake", self.stake)?;
        validate_range("kelly_multiplier", self.kelly_multiplier, 0.01, 1.0)?;
        if let Some(bankroll) = self.bankroll {
            validate_positive("bankroll", bankroll)?;
        }
        Ok(())
    }
}

impl Calculator for ExpectedValueInput {
    type Output = ExpectedValueResult;
    const NAME: &'static str = "polymarket-ev";

    fn compute(&self) -> Result<ExpectedValueResult> {
        let p = self.probability;
        let shares = self.stake / self.price;
        let profit_if_win = shares - self.stake;
        let expected_value = p * profit_if_win - (1.0 - p) * self.stake;
        let edge = p - self.price;

        let kelly = kelly_fraction(self.price, p) * self.kelly_multiplier;
        let suggested_stake = self.bankroll.map(|bankroll| bankroll * kelly);

        let recommendation = if edge > 0.0 {
            "Positive EV: buying YES is favourable"
        } else if edge < 0.0 {
            "Negative EV: skip YES or consider the NO side"
        } else {
            "No edge: price matches your estimate"
        };

        Ok(ExpectedValueResult {
            shares,
            profit_if_win,
            loss_if_lose: self.stake,
            expected_value,
            expected_return_percent: expected_value / self.stake * 100.0,
            edge,
            kelly_fraction: kelly,
            suggested_stake,
            recommendation,
        })
    }
}
