use crate::domain::ports::Calculator;
use crate::utils::error::{CalcError, Result};
use crate::utils::validation::Validate;
use chrono::{Datelike, Local, Months, NaiveDate};
use clap::Args;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize, Args)]
pub struct AgeInput {
    /// Date of birth (YYYY-MM-DD)
    #[arg(long)]
    pub birth_date: NaiveDate,

    /// Date to measure the age at; defaults to today
    #[arg(long)]
    #[serde(default)]
    pub as_of: Option<NaiveDate>,
}

#[derive(Debug, Clone, Serialize)]
pub struct AgeResult {
    pub years: u32,
    pub months: u32,
    pub days: i64,
    pub total_months: u32,
    pub total_weeks: i64,
    pub total_days: i64,
    pub next_birthday: NaiveDate,
    pub days_until_next_birthday: i64,
}

/// The birthday falling in `year`; Feb 29 maps to Feb 28 in common years.
fn birthday_in(birth: NaiveDate, year: i32) -> Result<NaiveDate> {
    birth
        .with_year(year)
        .or_else(|| NaiveDate::from_ymd_opt(year, 2, 28))
        .ok_or_else(|| CalcError::domain(format!("year {} is out of range", year)))
}

impl AgeInput {
    fn as_of(&self) -> NaiveDate {
        self.as_of.unwrap_or_else(|| Local::now().date_naive())
    }
}

impl Validate for AgeInput {
    fn validate(&self) -> Result<()> {
        if self.birth_date > self.as_of() {
            return Err(CalcError::domain(format!(
                "birth date {} is after {}",
                self.birth_date,
                self.as_of()
            )));
        }
        Ok(())
    }
}

impl Calculator for AgeInput {
    type Output = AgeResult;
    const NAME: &'static str = "age";

    fn compute(&self) -> Result<AgeResult> {
        let birth = self.birth_date;
        let as_of = self.as_of();

        let mut total_months = (as_of.year() - birth.year()) * 12 + as_of.month() as i32
            - birth.month() as i32;
        if as_of.day() < birth.day() {
            total_months -= 1;
        }
        let total_months = u32::try_from(total_months.max(0))
            .map_err(|_| CalcError::domain("age is out of range"))?;

        let anchor = birth
            .checked_add_months(Months::new(total_months))
            .ok_or_else(|| CalcError::domain("age is out of range"))?;
        let total_days = (as_of - birth).num_days();

        let mut next_birthday = birthday_in(birth, as_of.year())?;
        if next_birthday < as_of {
            next_birthday = birthday_in(birth, as_of.year() + 1)?;
        }

        Ok(AgeResult {
            years: total_months / 12,
            months: total_months % 12,
            days: (as_of - anchor).num_days(),
            total_months,
            total_weeks: total_days / 7,
            total_days,
            next_birthday,
            days_until_next_birthday: (next_birthday - as_of).num_days(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(s: &str) -> NaiveDate {
        s.parse().unwrap()
    }

    fn age(birth: &str, as_of: &str) -> Result<AgeResult> {
        AgeInput {
            birth_date: date(birth),
            as_of: Some(date(as_of)),
        }
        .calculate()
    }

    #[test]
    fn test_age_breakdown() {
        let result = age("1990-05-20", "2024-03-10").unwrap();
        assert_eq!((result.years, result.months, result.days), (33, 9, 19));
        assert_eq!(result.next_birthday, date("2024-05-20"));
        assert_eq!(result.days_until_next_birthday, 71);
    }

    #[test]
    fn test_birthday_today() {
        let result = age("2000-03-10", "2024-03-10").unwrap();
        assert_eq!((result.years, result.months, result.days), (24, 0, 0));
        assert_eq!(result.days_until_next_birthday, 0);
    }

    #[test]
    fn test_leap_day_birthday() {
        let result = age("2000-02-29", "2023-03-01").unwrap();
        assert_eq!(result.years, 23);
        assert_eq!(result.next_birthday, date("2024-02-29"));
    }

    #[test]
    fn test_birth_after_as_of() {
        assert!(matches!(
            age("2030-01-01", "2024-01-01"),
            Err(CalcError::Domain { .. })
        ));
    }
}
