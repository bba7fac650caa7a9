use super::{UnitSystem, CM_PER_INCH, HEALTHY_BMI_MAX, HEALTHY_BMI_MIN, KG_PER_LB};
use crate::domain::ports::Calculator;
use crate::utils::error::Result;
use crate::utils::parse::finite_number;
use crate::utils::validation::{validate_range, Validate};
use clap::Args;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize, Args)]
pub struct BmiInput {
    /// Body weight (kg, or lb with --units imperial)
    #[arg(long, value_parser = finite_number)]
    pub weight: f64,

    /// Height (cm, or inches with --units imperial)
    #[arg(long, value_parser = finite_number)]
    pub height: f64,

    #[arg(long, value_enum, default_value_t = UnitSystem::Metric)]
    #[serde(default)]
    pub units: UnitSystem,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum BmiCategory {
    Underweight,
    #[serde(rename = "Normal weight")]
    Normal,
    Overweight,
    Obese,
}

impl BmiCategory {
    pub fn from_bmi(bmi: f64) -> Self {
        if bmi < 18.5 {
            Self::Underweight
        } else if bmi < 25.0 {
            Self::Normal
        } else if bmi < 30.0 {
            Self::Overweight
        } else {
            Self::Obese
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct BmiResult {
    pub bmi: f64,
    pub category: BmiCategory,
    pub bmi_prime: f64,
    /// Weight range for BMI 18.5-25 at this height, in the input weight unit.
    pub healthy_weight_min: f64,
    pub healthy_weight_max: f64,
}

impl BmiInput {
    fn metric(&self) -> (f64, f64) {
        match self.units {
            UnitSystem::Metric => (self.weight, self.height / 100.0),
            UnitSystem::Imperial => (self.weight * KG_PER_LB, self.height * CM_PER_INCH / 100.0),
        }
    }
}

impl Validate for BmiInput {
    fn validate(&self) -> Result<()> {
        let (weight_range, height_range) = match self.units {
            UnitSystem::Metric => ((1.0, 700.0), (30.0, 300.0)),
            UnitSystem::Imperial => ((2.0, 1500.0), (12.0, 120.0)),
        };
        validate_range("weight", self.weight, weight_range.0, weight_range.1)?;
        validate_range("height", self.height, height_range.0, height_range.1)
    }
}

impl Calculator for BmiInput {
    type Output = BmiResult;
    const NAME: &'static str = "bmi";

    fn compute(&self) -> Result<BmiResult> {
        let (weight_kg, height_m) = self.metric();
        let bmi = weight_kg / (height_m * height_m);

        let to_input_unit = |kg: f64| match self.units {
            UnitSystem::Metric => kg,
            UnitSystem::Imperial => kg / KG_PER_LB,
        };

        Ok(BmiResult {
            bmi,
            category: BmiCategory::from_bmi(bmi),
            bmi_prime: bmi / 25.0,
            healthy_weight_min: to_input_unit(HEALTHY_BMI_MIN * height_m * height_m),
            healthy_weight_max: to_input_unit(HEALTHY_BMI_MAX * height_m * height_m),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_metric_bmi() {
        let input = BmiInput {
            weight: 70.0,
            height: 175.0,
            units: UnitSystem::Metric,
        };
        let result = input.calculate().unwrap();
        assert!((result.bmi - 22.857).abs() < 1e-3);
        assert_eq!(result.category, BmiCategory::Normal);
        assert!((result.healthy_weight_min - 56.656).abs() < 1e-2);
        assert!((result.healthy_weight_max - 76.5625).abs() < 1e-6);
    }

    #[test]
    fn test_imperial_matches_703_rule() {
        let input = BmiInput {
            weight: 180.0,
            height: 70.0,
            units: UnitSystem::Imperial,
        };
        let result = input.calculate().unwrap();
        let classic = 703.0 * 180.0 / (70.0 * 70.0);
        assert!((result.bmi - classic).abs() < 0.05);
        assert_eq!(result.category, BmiCategory::Overweight);
    }

    #[test]
    fn test_category_boundaries() {
        assert_eq!(BmiCategory::from_bmi(18.49), BmiCategory::Underweight);
        assert_eq!(BmiCategory::from_bmi(18.5), BmiCategory::Normal);
        assert_eq!(BmiCategory::from_bmi(25.0), BmiCategory::Overweight);
        assert_eq!(BmiCategory::from_bmi(30.0), BmiCategory::Obese);
    }

    #[test]
    fn test_rejects_zero_height() {
        let input = BmiInput {
            weight: 70.0,
            height: 0.0,
            units: UnitSystem::Metric,
        };
        assert!(input.calculate().is_err());
    }
}
