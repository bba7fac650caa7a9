//! Course grade aggregation.
//!
//! Two aggregates are reported and they differ on purpose:
//! `weighted_average` only looks at graded work, `current_grade` treats
//! the weights as shares of the whole course (out of 100) so anything
//! not yet graded counts as zero.

use crate::domain::ports::Calculator;
use crate::utils::error::{CalcError, Result};
use crate::utils::parse::{finite_number, parse_number};
use crate::utils::validation::{validate_non_negative, validate_range, Validate};
use clap::Args;
use serde::{Deserialize, Serialize};
use std::str::FromStr;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GradeEntry {
    pub name: String,
    /// Score in percent
    pub score: f64,
    /// Weight in percent of the course
    pub weight: f64,
}

impl FromStr for GradeEntry {
    type Err = CalcError;

    /// Parses `name:score:weight`, e.g. `Midterm:85:30`.
    fn from_str(raw: &str) -> Result<Self> {
        let parts: Vec<&str> = raw.rsplitn(3, ':').collect();
        let [weight, score, name] = parts.as_slice() else {
            return Err(CalcError::parse("entry", raw, "expected name:score:weight"));
        };
        Ok(Self {
            name: name.trim().to_string(),
            score: parse_number("score", score)?,
            weight: parse_number("weight", weight)?,
        })
    }
}

fn parse_entry(raw: &str) -> std::result::Result<GradeEntry, String> {
    raw.parse().map_err(|e: CalcError| e.to_string())
}

#[derive(Debug, Clone, Serialize, Deserialize, Args)]
pub struct GradeInput {
    /// Graded item as name:score:weight (repeatable)
    #[arg(long = "entry", required = true, value_parser = parse_entry)]
    pub entries: Vec<GradeEntry>,

    /// Desired final course grade in percent
    #[arg(long, value_parser = finite_number)]
    #[serde(default)]
    pub target: Option<f64>,

    /// Weight of the final exam in percent
    #[arg(long, value_parser = finite_number)]
    #[serde(default)]
    pub final_weight: Option<f64>,
}

#[derive(Debug, Clone, Serialize)]
pub struct GradeResult {
    pub weighted_average: f64,
    pub current_grade: f64,
    pub letter: &'static str,
    pub total_weight: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub required_final_score: Option<f64>,
}

const LETTERS: [(f64, &str); 12] = [
    (97.0, "A+"),
    (93.0, "A"),
    (90.0, "A-"),
    (87.0, "B+"),
    (83.0, "B"),
    (80.0, "B-"),
    (77.0, "C+"),
    (73.0, "C"),
    (70.0, "C-"),
    (67.0, "D+"),
    (63.0, "D"),
    (60.0, "D-"),
];

pub fn letter_grade(percent: f64) -> &'static str {
    LETTERS
        .iter()
        .find(|(min, _)| percent >= *min)
        .map(|(_, letter)| *letter)
        .unwrap_or("F")
}

impl Validate for GradeInput {
    fn validate(&self) -> Result<()> {
        if self.entries.is_empty() {
            return Err(CalcError::missing("entries"));
        }
        for entry in &self.entries {
            validate_non_negative("score", entry.score)?;
            validate_non_negative("weight", entry.weight)?;
        }
        if let Some(target) = self.target {
            validate_range("target", target, 0.0, 150.0)?;
        }
        if let Some(final_weight) = self.final_weight {
            validate_range("final_weight", final_weight, 0.01, 100.0)?;
        }
        if self.target.is_some() != self.final_weight.is_some() {
            return Err(CalcError::missing(if self.target.is_none() {
                "target"
            } else {
                "final_weight"
            }));
        }
        Ok(())
    }
}

impl Calculator for GradeInput {
    type Output = GradeResult;
    const NAME: &'static str = "grade";

    fn compute(&self) -> Result<GradeResult> {
        let total_weight: f64 = self.entries.iter().map(|e| e.weight).sum();
        if total_weight <= 0.0 {
            return Err(CalcError::domain("total weight of graded items must be above zero"));
        }

        let weighted_points: f64 = self.entries.iter().map(|e| e.score * e.weight).sum();
        let weighted_average = weighted_points / total_weight;
        let current_grade = weighted_points / 100.0;

        let required_final_score = self.target.zip(self.final_weight).map(|(target, weight)| {
            let w = weight / 100.0;
            (target - weighted_average * (1.0 - w)) / w
        });

        tracing::debug!(
            entries = self.entries.len(),
            total_weight,
            "aggregated grade entries"
        );

        Ok(GradeResult {
            weighted_average,
            current_grade,
            letter: letter_grade(weighted_average),
            total_weight,
            required_final_score,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entries() -> Vec<GradeEntry> {
        vec![
            "Homework:90:20".parse().unwrap(),
            "Midterm:80:30".parse().unwrap(),
        ]
    }

    #[test]
    fn test_weighted_average_vs_current_grade() {
        let input = GradeInput {
            entries: entries(),
            target: None,
            final_weight: None,
        };
        let result = input.calculate().unwrap();
        // (90*20 + 80*30) / 50 = 84
        assert!((result.weighted_average - 84.0).abs() < 1e-9);
        // (90*20 + 80*30) / 100 = 42
        assert!((result.current_grade - 42.0).abs() < 1e-9);
        assert_eq!(result.letter, "B");
        assert!(result.required_final_score.is_none());
    }

    #[test]
    fn test_required_final_score() {
        let input = GradeInput {
            entries: entries(),
            target: Some(90.0),
            final_weight: Some(40.0),
        };
        let result = input.calculate().unwrap();
        // (90 - 84*0.6) / 0.4 = 99
        assert!((result.required_final_score.unwrap() - 99.0).abs() < 1e-9);
    }

    #[test]
    fn test_entry_parsing() {
        let entry: GradeEntry = "Lab: Week 1:95.5:10".parse().unwrap();
        assert_eq!(entry.name, "Lab: Week 1");
        assert_eq!(entry.score, 95.5);
        assert_eq!(entry.weight, 10.0);
        assert!("Quiz:abc:10".parse::<GradeEntry>().is_err());
        assert!("Quiz".parse::<GradeEntry>().is_err());
    }

    #[test]
    fn test_letter_grades() {
        assert_eq!(letter_grade(100.0), "A+");
        assert_eq!(letter_grade(90.0), "A-");
        assert_eq!(letter_grade(59.9), "F");
    }

    #[test]
    fn test_zero_weights_are_rejected() {
        let input = GradeInput {
            entries: vec!["Quiz:80:0".parse().unwrap()],
            target: None,
            final_weight: None,
        };
        assert!(matches!(input.calculate(), Err(CalcError::Domain { .. })));
    }
}
