use crate::domain::ports::Calculator;
use crate::utils::error::{CalcError, Result};
use crate::utils::parse::finite_number;
use crate::utils::validation::{validate_non_negative, validate_positive, validate_range, Validate};
use clap::Args;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize, Args)]
pub struct MortgageInput {
    #[arg(long, value_parser = finite_number)]
    pub home_price: f64,

    #[arg(long, default_value_t = 0.0, value_parser = finite_number)]
    #[serde(default)]
    pub down_payment: f64,

    /// Annual interest rate in percent
    #[arg(long, value_parser = finite_number)]
    pub annual_rate: f64,

    /// Loan term in years
    #[arg(long)]
    pub years: u32,

    #[arg(long, default_value_t = 0.0, value_parser = finite_number)]
    #[serde(default)]
    pub property_tax_annual: f64,

    #[arg(long, default_value_t = 0.0, value_parser = finite_number)]
    #[serde(default)]
    pub insurance_annual: f64,

    #[arg(long, default_value_t = 0.0, value_parser = finite_number)]
    #[serde(default)]
    pub hoa_monthly: f64,
}

#[derive(Debug, Clone, Serialize)]
pub struct AmortizationYear {
    pub year: u32,
    pub principal_paid: f64,
    pub interest_paid: f64,
    pub ending_balance: f64,
}

#[derive(Debug, Clone, Serialize)]
pub struct MortgageResult {
    pub loan_amount: f64,
    pub monthly_principal_and_interest: f64,
    pub monthly_total: f64,
    pub total_of_payments: f64,
    pub total_interest: f64,
    pub schedule: Vec<AmortizationYear>,
}

/// Fixed monthly payment for a fully amortizing loan.
pub fn monthly_payment(principal: f64, annual_rate_percent: f64, months: u32) -> f64 {
    let n = f64::from(months);
    let r = annual_rate_percent / 100.0 / 12.0;
    if r == 0.0 {
        return principal / n;
    }
    let growth = (1.0 + r).powf(n);
    principal * r * growth / (growth - 1.0)
}

fn yearly_schedule(
    principal: f64,
    annual_rate_percent: f64,
    months: u32,
    payment: f64,
) -> Vec<AmortizationYear> {
    let r = annual_rate_percent / 100.0 / 12.0;
    let mut balance = principal;
    let mut schedule = Vec::new();
    let mut year = AmortizationYear {
        year: 1,
        principal_paid: 0.0,
        interest_paid: 0.0,
        ending_balance: balance,
    };

    for month in 1..=months {
        let interest = balance * r;
        let principal_part = (payment - interest).min(balance);
        balance -= principal_part;
        year.interest_paid += interest;
        year.principal_paid += principal_part;

        if month % 12 == 0 || month == months {
            year.ending_balance = balance.max(0.0);
            let next = year.year + 1;
            schedule.push(year);
            year = AmortizationYear {
                year: next,
                principal_paid: 0.0,
                interest_paid: 0.0,
                ending_balance: balance,
            };
        }
    }
    schedule
}

impl Validate for MortgageInput {
    fn validate(&self) -> Result<()> {
        validate_positive("home_price", self.home_price)?;
        validate_non_negative("down_payment", self.down_payment)?;
        validate_range("annual_rate", self.annual_rate, 0.0, 50.0)?;
        validate_range("years", self.years, 1, 50)?;
        validate_non_negative("property_tax_annual", self.property_tax_annual)?;
        validate_non_negative("insurance_annual", self.insurance_annual)?;
        validate_non_negative("hoa_monthly", self.hoa_monthly)?;
        if self.down_payment >= self.home_price {
            return Err(CalcError::domain("down payment covers the whole price; nothing to finance"));
        }
        Ok(())
    }
}

impl Calculator for MortgageInput {
    type Output = MortgageResult;
    const NAME: &'static str = "mortgage";

    fn compute(&self) -> Result<MortgageResult> {
        let loan_amount = self.home_price - self.down_payment;
        let months = self.years * 12;
        let payment = monthly_payment(loan_amount, self.annual_rate, months);
        let total_of_payments = payment * f64::from(months);

        let monthly_total = payment
            + self.property_tax_annual / 12.0
            + self.insurance_annual / 12.0
            + self.hoa_monthly;

        Ok(MortgageResult {
            loan_amount,
            monthly_principal_and_interest: payment,
            monthly_total,
            total_of_payments,
            total_interest: total_of_payments - loan_amount,
            schedule: yearly_schedule(loan_amount, self.annual_rate, months, payment),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn input() -> MortgageInput {
        MortgageInput {
            home_price: 400_000.0,
            down_payment: 80_000.0,
            annual_rate: 6.0,
            years: 30,
            property_tax_annual: 4_800.0,
            insurance_annual: 1_200.0,
            hoa_monthly: 0.0,
        }
    }

    #[test]
    fn test_standard_thirty_year() {
        let result = input().calculate().unwrap();
        assert_eq!(result.loan_amount, 320_000.0);
        // Standard table value for 320k at 6% over 30 years
        assert!((result.monthly_principal_and_interest - 1918.56).abs() < 0.01);
        assert!((result.monthly_total - (result.monthly_principal_and_interest + 500.0)).abs() < 1e-9);
        assert_eq!(result.schedule.len(), 30);
        assert!(result.schedule[29].ending_balance.abs() < 1e-4);
    }

    #[test]
    fn test_schedule_principal_sums_to_loan() {
        let result = input().calculate().unwrap();
        let principal: f64 = result.schedule.iter().map(|y| y.principal_paid).sum();
        let interest: f64 = result.schedule.iter().map(|y| y.interest_paid).sum();
        assert!((principal - 320_000.0).abs() < 1e-4);
        assert!((interest - result.total_interest).abs() < 1e-3);
    }

    #[test]
    fn test_zero_rate() {
        let mut zero = input();
        zero.annual_rate = 0.0;
        let result = zero.calculate().unwrap();
        assert!((result.monthly_principal_and_interest - 320_000.0 / 360.0).abs() < 1e-9);
        assert!(result.total_interest.abs() < 1e-6);
    }

    #[test]
    fn test_down_payment_exceeding_price() {
        let mut bad = input();
        bad.down_payment = 500_000.0;
        assert!(matches!(bad.calculate(), Err(CalcError::Domain { .. })));
    }
}
