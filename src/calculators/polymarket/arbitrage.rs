use super::{MAX_PRICE, MIN_PRICE};
use crate::domain::ports::Calculator;
use crate::utils::error::Result;
use crate::utils::parse::finite_number;
use crate::utils::validation::{validate_positive, validate_range, Validate};
use clap::Args;
use serde::{Deserialize, Serialize};

fn default_investment() -> f64 {
    100.0
}

#[derive(Debug, Clone, Serialize, Deserialize, Args)]
pub struct ArbitrageInput {
    /// Price of a YES share
    #[arg(long, value_parser = finite_number)]
    pub yes_price: f64,

    /// Price of a NO share
    #[arg(long, value_parser = finite_number)]
    pub no_price: f64,

    /// Total dollars to split across both sides
    #[arg(long, default_value_t = 100.0, value_parser = finite_number)]
    #[serde(default = "default_investment")]
    pub investment: f64,
}

#[derive(Debug, Clone, Serialize)]
pub struct ArbitrageResult {
    pub combined_price: f64,
    pub arbitrage: bool,
    /// Payout per dollar invested when buying equal share counts on both sides.
    pub payout_per_dollar: f64,
    pub yes_stake: f64,
    pub no_stake: f64,
    pub shares_each: f64,
    pub guaranteed_payout: f64,
    pub profit: f64,
    pub roi_percent: f64,
}

impl Validate for ArbitrageInput {
    fn validate(&self) -> Result<()> {
        validate_range("yes_price", self.yes_price, MIN_PRICE, MAX_PRICE)?;
        validate_range("no_price", self.no_price, MIN_PRICE, MAX_PRICE)?;
        validate_positive("investment", self.investment)
    }
}

impl Calculator for ArbitrageInput {
    type Output = ArbitrageResult;
    const NAME: &'static str = "polymarket-arbitrage";

    fn compute(&self) -> Result<ArbitrageResult> {
        let combined_price = self.yes_price + self.no_price;
        // Equal share counts on both sides: exactly one side pays $1 per share.
        let shares_each = self.investment / combined_price;
        let guaranteed_payout = shares_each;
        let profit = guaranteed_payout - self.investment;

        Ok(ArbitrageResult {
            combined_price,
            arbitrage: combined_price < 1.0,
            payout_per_dollar: 1.0 / combined_price,
            yes_stake: shares_each * self.yes_price,
            no_stake: shares_each * self.no_price,
            shares_each,
            guaranteed_payout,
            profit,
            roi_percent: profit / self.investment * 100.0,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_arbitrage_exists_below_one_dollar() {
        let input = ArbitrageInput {
            yes_price: 0.45,
            no_price: 0.50,
            investment: 100.0,
        };
        let result = input.calculate().unwrap();
        assert!((result.combined_price - 0.95).abs() < 1e-12);
        assert!(result.arbitrage);
        assert!((result.payout_per_dollar - 1.0526315789).abs() < 1e-9);
        assert!((result.yes_stake + result.no_stake - 100.0).abs() < 1e-9);
        assert!((result.profit - 5.2631578947).abs() < 1e-8);
    }

    #[test]
    fn test_no_arbitrage_at_or_above_one_dollar() {
        let input = ArbitrageInput {
            yes_price: 0.55,
            no_price: 0.50,
            investment: 100.0,
        };
        let result = input.calculate().unwrap();
        assert!(!result.arbitrage);
        assert!(result.profit < 0.0);
    }
}
