//! Pregnancy due date by Naegele's rule.

use crate::domain::ports::Calculator;
use crate::utils::error::{CalcError, Result};
use crate::utils::validation::{validate_range, Validate};
use chrono::{Duration, Local, NaiveDate};
use clap::Args;
use serde::{Deserialize, Serialize};

const GESTATION_DAYS: i64 = 280;
const STANDARD_CYCLE_DAYS: i64 = 28;
const OVULATION_DAY: i64 = 14;

fn default_cycle_length() -> u32 {
    28
}

#[derive(Debug, Clone, Serialize, Deserialize, Args)]
pub struct DueDateInput {
    /// First day of the last menstrual period (YYYY-MM-DD)
    #[arg(long)]
    pub lmp: NaiveDate,

    /// Average cycle length in days
    #[arg(long, default_value_t = 28)]
    #[serde(default = "default_cycle_length")]
    pub cycle_length: u32,

    /// Date to measure gestational age at; defaults to today
    #[arg(long)]
    #[serde(default)]
    pub as_of: Option<NaiveDate>,
}

#[derive(Debug, Clone, Serialize)]
pub struct DueDateResult {
    pub due_date: NaiveDate,
    pub conception_date: NaiveDate,
    pub as_of: NaiveDate,
    pub gestational_weeks: i64,
    pub gestational_days: i64,
    pub trimester: u8,
    /// Negative once the due date has passed.
    pub days_remaining: i64,
}

impl Validate for DueDateInput {
    fn validate(&self) -> Result<()> {
        validate_range("cycle_length", self.cycle_length, 20, 45)
    }
}

impl Calculator for DueDateInput {
    type Output = DueDateResult;
    const NAME: &'static str = "due-date";

    fn compute(&self) -> Result<DueDateResult> {
        let cycle_shift = i64::from(self.cycle_length) - STANDARD_CYCLE_DAYS;
        let due_date = self.lmp + Duration::days(GESTATION_DAYS + cycle_shift);
        let conception_date = self.lmp + Duration::days(OVULATION_DAY + cycle_shift);

        let as_of = self.as_of.unwrap_or_else(|| Local::now().date_naive());
        let elapsed = (as_of - self.lmp).num_days();
        if elapsed < 0 {
            return Err(CalcError::domain(format!(
                "as-of date {} is before the last period {}",
                as_of, self.lmp
            )));
        }

        let gestational_weeks = elapsed / 7;
        let trimester = match gestational_weeks {
            0..=12 => 1,
            13..=26 => 2,
            _ => 3,
        };

        Ok(DueDateResult {
            due_date,
            conception_date,
            as_of,
            gestational_weeks,
            gestational_days: elapsed % 7,
            trimester,
            days_remaining: (due_date - as_of).num_days(),
        })
    }
}
