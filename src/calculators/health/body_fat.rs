//! U.S. Navy circumference method.

use super::Sex;
use crate::domain::ports::Calculator;
use crate::utils::error::{CalcError, Result};
use crate::utils::parse::finite_number;
use crate::utils::validation::{validate_range, validate_required, Validate};
use clap::Args;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize, Args)]
pub struct BodyFatInput {
    #[arg(long, value_enum)]
    pub sex: Sex,

    /// Height in cm
    #[arg(long, value_parser = finite_number)]
    pub height: f64,

    /// Neck circumference in cm
    #[arg(long, value_parser = finite_number)]
    pub neck: f64,

    /// Waist circumference in cm
    #[arg(long, value_parser = finite_number)]
    pub waist: f64,

    /// Hip circumference in cm (required for female)
    #[arg(long, value_parser = finite_number)]
    #[serde(default)]
    pub hip: Option<f64>,

    /// Body weight in kg, enables fat/lean mass
    #[arg(long, value_parser = finite_number)]
    #[serde(default)]
    pub weight: Option<f64>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum BodyFatCategory {
    #[serde(rename = "Essential fat")]
    Essential,
    Athletes,
    Fitness,
    Average,
    Obese,
}

impl BodyFatCategory {
    pub fn classify(sex: Sex, percent: f64) -> Self {
        let bounds = match sex {
            Sex::Male => [6.0, 14.0, 18.0, 25.0],
            Sex::Female => [14.0, 21.0, 25.0, 32.0],
        };
        if percent < bounds[0] {
            Self::Essential
        } else if percent < bounds[1] {
            Self::Athletes
        } else if percent < bounds[2] {
            Self::Fitness
        } else if percent < bounds[3] {
            Self::Average
        } else {
            Self::Obese
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct BodyFatResult {
    pub body_fat_percent: f64,
    pub category: BodyFatCategory,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fat_mass_kg: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub lean_mass_kg: Option<f64>,
}

impl BodyFatInput {
    /// Circumference difference fed into the log10 term.
    fn girth(&self) -> Result<f64> {
        match self.sex {
            Sex::Male => Ok(self.waist - self.neck),
            Sex::Female => {
                let hip = validate_required("hip", &self.hip)?;
                Ok(self.waist + hip - self.neck)
            }
        }
    }
}

impl Validate for BodyFatInput {
    fn validate(&self) -> Result<()> {
        validate_range("height", self.height, 50.0, 300.0)?;
        validate_range("neck", self.neck, 10.0, 100.0)?;
        validate_range("waist", self.waist, 20.0, 300.0)?;
        if let Some(hip) = self.hip {
            validate_range("hip", hip, 20.0, 300.0)?;
        }
        if let Some(weight) = self.weight {
            validate_range("weight", weight, 1.0, 700.0)?;
        }
        if self.girth()? <= 0.0 {
            return Err(CalcError::domain(
                "waist measurement must be larger than the neck measurement",
            ));
        }
        Ok(())
    }
}

impl Calculator for BodyFatInput {
    type Output = BodyFatResult;
    const NAME: &'static str = "body-fat";

    fn compute(&self) -> Result<BodyFatResult> {
        let girth = self.girth()?.log10();
        let height = self.height.log10();

        let density = match self.sex {
            Sex::Male => 1.0324 - 0.19077 * girth + 0.15456 * height,
            Sex::Female => 1.29579 - 0.35004 * girth + 0.22100 * height,
        };
        let percent = 495.0 / density - 450.0;
        if !(0.0..100.0).contains(&percent) {
            return Err(CalcError::domain(format!(
                "measurements give an implausible body fat of {:.1}%",
                percent
            )));
        }

        let fat_mass_kg = self.weight.map(|w| w * percent / 100.0);
        let lean_mass_kg = self.weight.zip(fat_mass_kg).map(|(w, fat)| w - fat);

        Ok(BodyFatResult {
            body_fat_percent: percent,
            category: BodyFatCategory::classify(self.sex, percent),
            fat_mass_kg,
            lean_mass_kg,
        })
    }
}
