use crate::calculators::concrete::ConcreteInput;
use crate::calculators::conversion::ConvertInput;
use crate::calculators::finance::compound_interest::CompoundInterestInput;
use crate::calculators::finance::mortgage::MortgageInput;
use crate::calculators::finance::percentage::PercentageInput;
use crate::calculators::grade::GradeInput;
use crate::calculators::health::bmi::BmiInput;
use crate::calculators::health::body_fat::BodyFatInput;
use crate::calculators::health::calorie::CalorieInput;
use crate::calculators::health::due_date::DueDateInput;
use crate::calculators::health::ideal_weight::IdealWeightInput;
use crate::calculators::polymarket::arbitrage::ArbitrageInput;
use crate::calculators::polymarket::ev::ExpectedValueInput;
use crate::calculators::polymarket::odds::OddsInput;
use crate::calculators::statistics::StatisticsInput;
use crate::calculators::subnet::SubnetInput;
use crate::calculators::time::age::AgeInput;
use crate::calculators::time::date_add::DateAddInput;
use crate::calculators::time::duration::TimeInput;
use crate::calculators::triangle::TriangleInput;
use crate::domain::model::CalcRecord;
use crate::domain::ports::Evaluate;
use crate::utils::error::Result;
use clap::Subcommand;
use serde::{Deserialize, Serialize};

/// One calculation request. On the command line each variant is a
/// subcommand; in a batch file the `calculator` key selects the variant.
#[derive(Debug, Clone, Serialize, Deserialize, Subcommand)]
#[serde(tag = "calculator", rename_all = "kebab-case")]
pub enum CalcRequest {
    /// Body mass index and healthy weight range
    Bmi(BmiInput),
    /// Body fat percentage (U.S. Navy method)
    BodyFat(BodyFatInput),
    /// Basal metabolic rate and daily calorie needs
    Calorie(CalorieInput),
    /// Ideal body weight by four published formulas
    IdealWeight(IdealWeightInput),
    /// Pregnancy due date from the last menstrual period
    DueDate(DueDateInput),
    /// Weighted course grade and required final exam score
    Grade(GradeInput),
    /// Concrete volume and premix bag count
    Concrete(ConcreteInput),
    /// Unit conversion across ten categories
    Convert(ConvertInput),
    /// IPv4 subnet breakdown
    Subnet(SubnetInput),
    /// Triangle solver (SSS, SAS, ASA, base-height)
    Triangle(TriangleInput),
    /// Descriptive statistics for a list of numbers
    Statistics(StatisticsInput),
    /// Expected value and Kelly sizing for a Polymarket position
    PolymarketEv(ExpectedValueInput),
    /// YES/NO arbitrage check for a Polymarket market
    PolymarketArbitrage(ArbitrageInput),
    /// Convert between probability, decimal, fractional and American odds
    Odds(OddsInput),
    /// Monthly mortgage payment and amortization
    Mortgage(MortgageInput),
    /// Compound interest growth with regular contributions
    CompoundInterest(CompoundInterestInput),
    /// Percentage of, what percent, and percent change
    Percentage(PercentageInput),
    /// Add or subtract durations
    Time(TimeInput),
    /// Add a duration to a date or datetime
    DateAdd(DateAddInput),
    /// Age in years, months and days
    Age(AgeInput),
}

impl CalcRequest {
    pub fn calculator(&self) -> &dyn Evaluate {
        match self {
            Self::Bmi(input) => input,
            Self::BodyFat(input) => input,
            Self::Calorie(input) => input,
            Self::IdealWeight(input) => input,
            Self::DueDate(input) => input,
            Self::Grade(input) => input,
            Self::Concrete(input) => input,
            Self::Convert(input) => input,
            Self::Subnet(input) => input,
            Self::Triangle(input) => input,
            Self::Statistics(input) => input,
            Self::PolymarketEv(input) => input,
            Self::PolymarketArbitrage(input) => input,
            Self::Odds(input) => input,
            Self::Mortgage(input) => input,
            Self::CompoundInterest(input) => input,
            Self::Percentage(input) => input,
            Self::Time(input) => input,
            Self::DateAdd(input) => input,
            Self::Age(input) => input,
        }
    }

    pub fn name(&self) -> &'static str {
        self.calculator().name()
    }

    pub fn evaluate(&self, label: Option<String>) -> Result<CalcRecord> {
        let output = self.calculator().evaluate()?;
        Ok(CalcRecord {
            label,
            calculator: self.name().to_string(),
            output,
        })
    }
}

/// A `[[requests]]` entry of a batch file.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BatchRequest {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
    #[serde(flatten)]
    pub request: CalcRequest,
}

impl BatchRequest {
    /// Label for logs and reports, falling back to the calculator name.
    pub fn display_label(&self) -> String {
        self.label
            .clone()
            .unwrap_or_else(|| self.request.name().to_string())
    }
}
