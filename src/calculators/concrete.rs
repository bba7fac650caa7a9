use crate::domain::ports::Calculator;
use crate::utils::error::{CalcError, Result};
use crate::utils::parse::finite_number;
use crate::utils::validation::{validate_positive, validate_range, validate_required, Validate};
use clap::{Args, ValueEnum};
use serde::{Deserialize, Serialize};
use std::f64::consts::PI;

const CUBIC_FEET_PER_YARD: f64 = 27.0;
const CUBIC_METRES_PER_FOOT: f64 = 0.028_316_846_592;

/// Yield of premixed bags in cubic feet.
const BAG_YIELDS: [(u32, f64); 3] = [(40, 0.30), (60, 0.45), (80, 0.60)];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "kebab-case")]
pub enum ConcreteShape {
    /// Rectangular slab: --length, --width (ft), --thickness (in)
    Slab,
    /// Round column: --diameter (in), --height (ft)
    Column,
    /// Hollow tube: --outer-diameter, --inner-diameter (in), --height (ft)
    Tube,
}

fn default_quantity() -> u32 {
    1
}

#[derive(Debug, Clone, Serialize, Deserialize, Args)]
pub struct ConcreteInput {
    #[arg(long, value_enum)]
    pub shape: ConcreteShape,

    #[arg(long, value_parser = finite_number)]
    #[serde(default)]
    pub length: Option<f64>,

    #[arg(long, value_parser = finite_number)]
    #[serde(default)]
    pub width: Option<f64>,

    #[arg(long, value_parser = finite_number)]
    #[serde(default)]
    pub thickness: Option<f64>,

    #[arg(long, value_parser = finite_number)]
    #[serde(default)]
    pub diameter: Option<f64>,

    #[arg(long, value_parser = finite_number)]
    #[serde(default)]
    pub outer_diameter: Option<f64>,

    #[arg(long, value_parser = finite_number)]
    #[serde(default)]
    pub inner_diameter: Option<f64>,

    #[arg(long, value_parser = finite_number)]
    #[serde(default)]
    pub height: Option<f64>,

    /// Number of identical pours
    #[arg(long, default_value_t = 1)]
    #[serde(default = "default_quantity")]
    pub quantity: u32,

    /// Extra material for spillage, in percent
    #[arg(long, default_value_t = 0.0, value_parser = finite_number)]
    #[serde(default)]
    pub waste_percent: f64,
}

#[derive(Debug, Clone, Serialize)]
pub struct BagCount {
    pub bag_lb: u32,
    pub bags: u64,
}

#[derive(Debug, Clone, Serialize)]
pub struct ConcreteResult {
    pub cubic_feet: f64,
    pub cubic_yards: f64,
    pub cubic_metres: f64,
    pub bags: Vec<BagCount>,
}

fn positive(field: &str, value: &Option<f64>) -> Result<f64> {
    let value = *validate_required(field, value)?;
    validate_positive(field, value)?;
    Ok(value)
}

fn circle_area_sq_ft(diameter_in: f64) -> f64 {
    let radius_ft = diameter_in / 12.0 / 2.0;
    PI * radius_ft * radius_ft
}

impl ConcreteInput {
    /// Volume of a single pour in cubic feet.
    fn unit_volume(&self) -> Result<f64> {
        match self.shape {
            ConcreteShape::Slab => {
                let length = positive("length", &self.length)?;
                let width = positive("width", &self.width)?;
                let thickness = positive("thickness", &self.thickness)?;
                Ok(length * width * thickness / 12.0)
            }
            ConcreteShape::Column => {
                let diameter = positive("diameter", &self.diameter)?;
                let height = positive("height", &self.height)?;
                Ok(circle_area_sq_ft(diameter) * height)
            }
            ConcreteShape::Tube => {
                let outer = positive("outer_diameter", &self.outer_diameter)?;
                let inner = positive("inner_diameter", &self.inner_diameter)?;
                let height = positive("height", &self.height)?;
                if inner >= outer {
                    return Err(CalcError::domain(
                        "inner diameter must be smaller than the outer diameter",
                    ));
                }
                Ok((circle_area_sq_ft(outer) - circle_area_sq_ft(inner)) * height)
            }
        }
    }
}

impl Validate for ConcreteInput {
    fn validate(&self) -> Result<()> {
        validate_range("quantity", self.quantity, 1, 10_000)?;
        validate_range("waste_percent", self.waste_percent, 0.0, 100.0)?;
        self.unit_volume().map(|_| ())
    }
}

impl Calculator for ConcreteInput {
    type Output = ConcreteResult;
    const NAME: &'static str = "concrete";

    fn compute(&self) -> Result<ConcreteResult> {
        let cubic_feet = self.unit_volume()?
            * f64::from(self.quantity)
            * (1.0 + self.waste_percent / 100.0);

        let bags = BAG_YIELDS
            .iter()
            .map(|&(bag_lb, yield_cu_ft)| BagCount {
                bag_lb,
                bags: (cubic_feet / yield_cu_ft).ceil() as u64,
            })
            .collect();

        Ok(ConcreteResult {
            cubic_feet,
            cubic_yards: cubic_feet / CUBIC_FEET_PER_YARD,
            cubic_metres: cubic_feet * CUBIC_METRES_PER_FOOT,
            bags,
        })
    }
}
