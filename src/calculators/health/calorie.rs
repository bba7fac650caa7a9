use super::Sex;
use crate::domain::ports::Calculator;
use crate::utils::error::Result;
use crate::utils::parse::finite_number;
use crate::utils::validation::{validate_range, validate_required, Validate};
use clap::{Args, ValueEnum};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "kebab-case")]
pub enum BmrFormula {
    #[default]
    MifflinStJeor,
    HarrisBenedict,
    /// Needs --body-fat
    KatchMcArdle,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "kebab-case")]
pub enum ActivityLevel {
    /// Little or no exercise
    Sedentary,
    /// Exercise 1-3 times a week
    Light,
    /// Exercise 4-5 times a week
    #[default]
    Moderate,
    /// Daily or intense exercise 3-4 times a week
    Active,
    /// Intense exercise 6-7 times a week or physical job
    VeryActive,
}

impl ActivityLevel {
    pub fn multiplier(self) -> f64 {
        match self {
            Self::Sedentary => 1.2,
            Self::Light => 1.375,
            Self::Moderate => 1.55,
            Self::Active => 1.725,
            Self::VeryActive => 1.9,
        }
    }
}

const GOALS: [(&str, f64); 6] = [
    ("Maintain weight", 0.0),
    ("Mild weight loss (0.25 kg/week)", -250.0),
    ("Weight loss (0.5 kg/week)", -500.0),
    ("Extreme weight loss (1 kg/week)", -1000.0),
    ("Mild weight gain (0.25 kg/week)", 250.0),
    ("Weight gain (0.5 kg/week)", 500.0),
];

#[derive(Debug, Clone, Serialize, Deserialize, Args)]
pub struct CalorieInput {
    #[arg(long)]
    pub age: u32,

    #[arg(long, value_enum)]
    pub sex: Sex,

    /// Weight in kg
    #[arg(long, value_parser = finite_number)]
    pub weight: f64,

    /// Height in cm
    #[arg(long, value_parser = finite_number)]
    pub height: f64,

    #[arg(long, value_enum, default_value_t = ActivityLevel::Moderate)]
    #[serde(default)]
    pub activity: ActivityLevel,

    #[arg(long, value_enum, default_value_t = BmrFormula::MifflinStJeor)]
    #[serde(default)]
    pub formula: BmrFormula,

    /// Body fat percentage, used by Katch-McArdle
    #[arg(long, value_parser = finite_number)]
    #[serde(default)]
    pub body_fat: Option<f64>,
}

#[derive(Debug, Clone, Serialize)]
pub struct CalorieGoal {
    pub goal: String,
    pub calories_per_day: f64,
}

#[derive(Debug, Clone, Serialize)]
pub struct CalorieResult {
    pub bmr: f64,
    pub tdee: f64,
    pub activity_multiplier: f64,
    pub goals: Vec<CalorieGoal>,
}

/// Basal metabolic rate in kcal/day.
pub fn bmr(input: &CalorieInput) -> Result<f64> {
    let (w, h, a) = (input.weight, input.height, f64::from(input.age));
    let value = match (input.formula, input.sex) {
        (BmrFormula::MifflinStJeor, Sex::Male) => 10.0 * w + 6.25 * h - 5.0 * a + 5.0,
        (BmrFormula::MifflinStJeor, Sex::Female) => 10.0 * w + 6.25 * h - 5.0 * a - 161.0,
        (BmrFormula::HarrisBenedict, Sex::Male) => 13.397 * w + 4.799 * h - 5.677 * a + 88.362,
        (BmrFormula::HarrisBenedict, Sex::Female) => 9.247 * w + 3.098 * h - 4.330 * a + 447.593,
        (BmrFormula::KatchMcArdle, _) => {
            let body_fat = validate_required("body_fat", &input.body_fat)?;
            let lean_mass = w * (1.0 - body_fat / 100.0);
            370.0 + 21.6 * lean_mass
        }
    };
    Ok(value)
}

impl Validate for CalorieInput {
    fn validate(&self) -> Result<()> {
        validate_range("age", self.age, 15, 100)?;
        validate_range("weight", self.weight, 20.0, 400.0)?;
        validate_range("height", self.height, 100.0, 250.0)?;
        if let Some(body_fat) = self.body_fat {
            validate_range("body_fat", body_fat, 2.0, 70.0)?;
        }
        if self.formula == BmrFormula::KatchMcArdle {
            validate_required("body_fat", &self.body_fat)?;
        }
        Ok(())
    }
}

impl Calculator for CalorieInput {
    type Output = CalorieResult;
    const NAME: &'static str = "calorie";

    fn compute(&self) -> Result<CalorieResult> {
        let bmr = bmr(self)?;
        let activity_multiplier = self.activity.multiplier();
        let tdee = bmr * activity_multiplier;

        let goals = GOALS
            .iter()
            .map(|(goal, delta)| CalorieGoal {
                goal: goal.to_string(),
                calories_per_day: tdee + delta,
            })
            .collect();

        Ok(CalorieResult {
            bmr,
            tdee,
            activity_multiplier,
            goals,
        })
    }
}
