use super::{Sex, CM_PER_INCH, HEALTHY_BMI_MAX, HEALTHY_BMI_MIN};
use crate::domain::ports::Calculator;
use crate::utils::error::Result;
use crate::utils::parse::finite_number;
use crate::utils::validation::{validate_range, Validate};
use clap::Args;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize, Args)]
pub struct IdealWeightInput {
    #[arg(long, value_enum)]
    pub sex: Sex,

    /// Height in cm
    #[arg(long, value_parser = finite_number)]
    pub height: f64,
}

#[derive(Debug, Clone, Serialize)]
pub struct IdealWeightResult {
    pub robinson_kg: f64,
    pub miller_kg: f64,
    pub devine_kg: f64,
    pub hamwi_kg: f64,
    pub healthy_bmi_min_kg: f64,
    pub healthy_bmi_max_kg: f64,
}

/// (base kg at five feet, kg per additional inch)
fn coefficients(sex: Sex) -> [(f64, f64); 4] {
    match sex {
        Sex::Male => [(52.0, 1.9), (56.2, 1.41), (50.0, 2.3), (48.0, 2.7)],
        Sex::Female => [(49.0, 1.7), (53.1, 1.36), (45.5, 2.3), (45.5, 2.2)],
    }
}

impl Validate for IdealWeightInput {
    fn validate(&self) -> Result<()> {
        validate_range("height", self.height, 100.0, 250.0)
    }
}

impl Calculator for IdealWeightInput {
    type Output = IdealWeightResult;
    const NAME: &'static str = "ideal-weight";

    fn compute(&self) -> Result<IdealWeightResult> {
        // The formulas are only defined above five feet; shorter heights get the base weight.
        let inches_over_five_feet = (self.height / CM_PER_INCH - 60.0).max(0.0);
        let [robinson, miller, devine, hamwi] =
            coefficients(self.sex).map(|(base, per_inch)| base + per_inch * inches_over_five_feet);

        let height_m = self.height / 100.0;
        Ok(IdealWeightResult {
            robinson_kg: robinson,
            miller_kg: miller,
            devine_kg: devine,
            hamwi_kg: hamwi,
            healthy_bmi_min_kg: HEALTHY_BMI_MIN * height_m * height_m,
            healthy_bmi_max_kg: HEALTHY_BMI_MAX * height_m * height_m,
        })
    }
}
