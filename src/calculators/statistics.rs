use crate::domain::ports::Calculator;
use crate::utils::error::{CalcError, Result};
use crate::utils::parse::parse_number_list;
use crate::utils::validation::{validate_non_empty_string, Validate};
use clap::Args;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize, Args)]
pub struct StatisticsInput {
    /// Numbers separated by commas, semicolons or whitespace
    #[arg(long)]
    pub data: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct StatisticsResult {
    pub count: usize,
    pub sum: f64,
    pub mean: f64,
    pub median: f64,
    /// Every value sharing the highest frequency; empty when all values are unique.
    pub modes: Vec<f64>,
    pub min: f64,
    pub max: f64,
    pub range: f64,
    pub population_variance: f64,
    pub population_std_dev: f64,
    pub sample_variance: Option<f64>,
    pub sample_std_dev: Option<f64>,
    pub geometric_mean: Option<f64>,
}

fn median(sorted: &[f64]) -> f64 {
    let mid = sorted.len() / 2;
    if sorted.len() % 2 == 0 {
        (sorted[mid - 1] + sorted[mid]) / 2.0
    } else {
        sorted[mid]
    }
}

fn modes(sorted: &[f64]) -> Vec<f64> {
    let mut runs: Vec<(f64, usize)> = Vec::new();
    for &value in sorted {
        match runs.last_mut() {
            Some((last, count)) if *last == value => *count += 1,
            _ => runs.push((value, 1)),
        }
    }

    let best = runs.iter().map(|(_, count)| *count).max().unwrap_or(0);
    if best <= 1 {
        return Vec::new();
    }
    runs.into_iter()
        .filter(|(_, count)| *count == best)
        .map(|(value, _)| value)
        .collect()
}

pub fn describe(values: &[f64]) -> Result<StatisticsResult> {
    if values.is_empty() {
        return Err(CalcError::missing("data"));
    }

    let mut sorted = values.to_vec();
    sorted.sort_by(f64::total_cmp);

    let count = sorted.len();
    let n = count as f64;
    let sum: f64 = sorted.iter().sum();
    let mean = sum / n;
    let squared_deviations: f64 = sorted.iter().map(|x| (x - mean).powi(2)).sum();

    let population_variance = squared_deviations / n;
    let sample_variance = (count > 1).then(|| squared_deviations / (n - 1.0));

    let geometric_mean = sorted
        .iter()
        .all(|&x| x > 0.0)
        .then(|| (sorted.iter().map(|x| x.ln()).sum::<f64>() / n).exp());

    let min = sorted[0];
    let max = sorted[count - 1];

    Ok(StatisticsResult {
        count,
        sum,
        mean,
        median: median(&sorted),
        modes: modes(&sorted),
        min,
        max,
        range: max - min,
        population_variance,
        population_std_dev: population_variance.sqrt(),
        sample_variance,
        sample_std_dev: sample_variance.map(f64::sqrt),
        geometric_mean,
    })
}

impl Validate for StatisticsInput {
    fn validate(&self) -> Result<()> {
        validate_non_empty_string("data", &self.data).map_err(|_| CalcError::missing("data"))
    }
}

impl Calculator for StatisticsInput {
    type Output = StatisticsResult;
    const NAME: &'static str = "statistics";

    fn compute(&self) -> Result<StatisticsResult> {
        let values = parse_number_list("data", &self.data)?;
        tracing::debug!(count = values.len(), "parsed data set");
        describe(&values)
    }
}
