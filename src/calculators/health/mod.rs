//! Body-measurement and pregnancy calculators.

pub mod bmi;
pub mod body_fat;
pub mod calorie;
pub mod due_date;
pub mod ideal_weight;

use clap::ValueEnum;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "kebab-case")]
pub enum Sex {
    Male,
    Female,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "kebab-case")]
pub enum UnitSystem {
    /// Kilograms and centimetres
    #[default]
    Metric,
    /// Pounds and inches
    Imperial,
}

pub(crate) const KG_PER_LB: f64 = 0.453_592_37;
pub(crate) const CM_PER_INCH: f64 = 2.54;

/// Healthy BMI band used by the BMI and ideal-weight calculators.
pub(crate) const HEALTHY_BMI_MIN: f64 = 18.5;
pub(crate) const HEALTHY_BMI_MAX: f64 = 25.0;
