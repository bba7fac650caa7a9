use crate::domain::ports::Calculator;
use crate::utils::error::Result;
use crate::utils::parse::finite_number;
use crate::utils::validation::{validate_non_negative, validate_range, Validate};
use clap::Args;
use serde::{Deserialize, Serialize};

fn default_compounds_per_year() -> u32 {
    12
}

#[derive(Debug, Clone, Serialize, Deserialize, Args)]
pub struct CompoundInterestInput {
    #[arg(long, value_parser = finite_number)]
    pub principal: f64,

    /// Annual interest rate in percent
    #[arg(long, value_parser = finite_number)]
    pub annual_rate: f64,

    #[arg(long, value_parser = finite_number)]
    pub years: f64,

    #[arg(long, default_value_t = 12)]
    #[serde(default = "default_compounds_per_year")]
    pub compounds_per_year: u32,

    /// Deposit added at the end of every month
    #[arg(long, default_value_t = 0.0, value_parser = finite_number)]
    #[serde(default)]
    pub monthly_contribution: f64,
}

#[derive(Debug, Clone, Serialize)]
pub struct CompoundInterestResult {
    pub future_value: f64,
    pub total_contributions: f64,
    pub total_interest: f64,
    pub effective_annual_rate_percent: f64,
}

impl Validate for CompoundInterestInput {
    fn validate(&self) -> Result<()> {
        validate_non_negative("principal", self.principal)?;
        validate_range("annual_rate", self.annual_rate, 0.0, 100.0)?;
        validate_range("years", self.years, 0.0, 100.0)?;
        validate_range("compounds_per_year", self.compounds_per_year, 1, 365)?;
        validate_non_negative("monthly_contribution", self.monthly_contribution)
    }
}

impl Calculator for CompoundInterestInput {
    type Output = CompoundInterestResult;
    const NAME: &'static str = "compound-interest";

    fn compute(&self) -> Result<CompoundInterestResult> {
        let rate = self.annual_rate / 100.0;
        let n = f64::from(self.compounds_per_year);

        let principal_growth = self.principal * (1.0 + rate / n).powf(n * self.years);

        // Monthly deposits grow at the monthly rate equivalent to the compounding schedule.
        let months = (self.years * 12.0).floor();
        let monthly_rate = (1.0 + rate / n).powf(n / 12.0) - 1.0;
        let contributions_growth = if monthly_rate == 0.0 {
            self.monthly_contribution * months
        } else {
            self.monthly_contribution * ((1.0 + monthly_rate).powf(months) - 1.0) / monthly_rate
        };

        let future_value = principal_growth + contributions_growth;
        let total_contributions = self.principal + self.monthly_contribution * months;

        Ok(CompoundInterestResult {
            future_value,
            total_contributions,
            total_interest: future_value - total_contributions,
            effective_annual_rate_percent: ((1.0 + rate / n).powf(n) - 1.0) * 100.0,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_annual_compounding() {
        let input = CompoundInterestInput {
            principal: 1000.0,
            annual_rate: 10.0,
            years: 2.0,
            compounds_per_year: 1,
            monthly_contribution: 0.0,
        };
        let result = input.calculate().unwrap();
        assert!((result.future_value - 1210.0).abs() < 1e-9);
        assert!((result.total_interest - 210.0).abs() < 1e-9);
        assert!((result.effective_annual_rate_percent - 10.0).abs() < 1e-9);
    }

    #[test]
    fn test_monthly_contributions_without_interest() {
        let input = CompoundInterestInput {
            principal: 0.0,
            annual_rate: 0.0,
            years: 1.0,
            compounds_per_year: 12,
            monthly_contribution: 100.0,
        };
        let result = input.calculate().unwrap();
        assert!((result.future_value - 1200.0).abs() < 1e-9);
        assert_eq!(result.total_interest, 0.0);
    }

    #[test]
    fn test_monthly_compounding_effective_rate() {
        let input = CompoundInterestInput {
            principal: 1000.0,
            annual_rate: 12.0,
            years: 1.0,
            compounds_per_year: 12,
            monthly_contribution: 0.0,
        };
        let result = input.calculate().unwrap();
        assert!((result.effective_annual_rate_percent - 12.6825).abs() < 1e-4);
    }
}
