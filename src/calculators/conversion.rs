//! Table-driven unit conversion.
//!
//! Every unit maps into its category's base unit and back. Linear units
//! only scale; temperature units are affine (scale plus offset) around
//! degrees Celsius.

use crate::domain::ports::Calculator;
use crate::utils::error::{CalcError, Result};
use crate::utils::parse::finite_number;
use crate::utils::validation::{validate_finite, validate_non_empty_string, Validate};
use clap::Args;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Scale {
    /// base = value * factor
    Linear(f64),
    /// base = value * factor + offset
    Affine { factor: f64, offset: f64 },
}

impl Scale {
    pub fn to_base(self, value: f64) -> f64 {
        match self {
            Self::Linear(factor) => value * factor,
            Self::Affine { factor, offset } => value * factor + offset,
        }
    }

    pub fn from_base(self, base: f64) -> f64 {
        match self {
            Self::Linear(factor) => base / factor,
            Self::Affine { factor, offset } => (base - offset) / factor,
        }
    }

    fn factor(self) -> f64 {
        match self {
            Self::Linear(factor) | Self::Affine { factor, .. } => factor,
        }
    }

    fn offset(self) -> f64 {
        match self {
            Self::Linear(_) => 0.0,
            Self::Affine { offset, .. } => offset,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Unit {
    pub symbol: &'static str,
    pub name: &'static str,
    pub scale: Scale,
}

const fn unit(symbol: &'static str, name: &'static str, factor: f64) -> Unit {
    Unit {
        symbol,
        name,
        scale: Scale::Linear(factor),
    }
}

const fn affine(symbol: &'static str, name: &'static str, factor: f64, offset: f64) -> Unit {
    Unit {
        symbol,
        name,
        scale: Scale::Affine { factor, offset },
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Category {
    Length,
    Mass,
    Volume,
    Area,
    Speed,
    Time,
    Data,
    Energy,
    Pressure,
    Temperature,
}

const LENGTH: &[Unit] = &[
    unit("mm", "millimetre", 0.001),
    unit("cm", "centimetre", 0.01),
    unit("m", "metre", 1.0),
    unit("km", "kilometre", 1000.0),
    unit("in", "inch", 0.0254),
    unit("ft", "foot", 0.3048),
    unit("yd", "yard", 0.9144),
    unit("mi", "mile", 1609.344),
    unit("nmi", "nautical mile", 1852.0),
];

const MASS: &[Unit] = &[
    unit("mg", "milligram", 1e-6),
    unit("g", "gram", 0.001),
    unit("kg", "kilogram", 1.0),
    unit("t", "tonne", 1000.0),
    unit("oz", "ounce", 0.028_349_523_125),
    unit("lb", "pound", 0.453_592_37),
    unit("st", "stone", 6.350_293_18),
];

const VOLUME: &[Unit] = &[
    unit("ml", "millilitre", 0.001),
    unit("l", "litre", 1.0),
    unit("m3", "cubic metre", 1000.0),
    unit("tsp", "US teaspoon", 0.004_928_921_593_75),
    unit("tbsp", "US tablespoon", 0.014_786_764_781_25),
    unit("floz", "US fluid ounce", 0.029_573_529_562_5),
    unit("cup", "US cup", 0.236_588_236_5),
    unit("pt", "US pint", 0.473_176_473),
    unit("qt", "US quart", 0.946_352_946),
    unit("gal", "US gallon", 3.785_411_784),
    unit("in3", "cubic inch", 0.016_387_064),
    unit("ft3", "cubic foot", 28.316_846_592),
];

const AREA: &[Unit] = &[
    unit("mm2", "square millimetre", 1e-6),
    unit("cm2", "square centimetre", 1e-4),
    unit("m2", "square metre", 1.0),
    unit("ha", "hectare", 1e4),
    unit("km2", "square kilometre", 1e6),
    unit("in2", "square inch", 0.000_645_16),
    unit("ft2", "square foot", 0.092_903_04),
    unit("yd2", "square yard", 0.836_127_36),
    unit("acre", "acre", 4_046.856_422_4),
    unit("mi2", "square mile", 2_589_988.110_336),
];

const SPEED: &[Unit] = &[
    unit("m/s", "metre per second", 1.0),
    unit("km/h", "kilometre per hour", 1.0 / 3.6),
    unit("mph", "mile per hour", 0.447_04),
    unit("kn", "knot", 1852.0 / 3600.0),
    unit("ft/s", "foot per second", 0.3048),
];

const TIME: &[Unit] = &[
    unit("ms", "millisecond", 0.001),
    unit("s", "second", 1.0),
    unit("min", "minute", 60.0),
    unit("h", "hour", 3600.0),
    unit("day", "day", 86_400.0),
    unit("week", "week", 604_800.0),
    unit("year", "Julian year", 31_557_600.0),
];

const DATA: &[Unit] = &[
    unit("bit", "bit", 0.125),
    unit("B", "byte", 1.0),
    unit("KB", "kilobyte", 1e3),
    unit("MB", "megabyte", 1e6),
    unit("GB", "gigabyte", 1e9),
    unit("TB", "terabyte", 1e12),
    unit("KiB", "kibibyte", 1024.0),
    unit("MiB", "mebibyte", 1_048_576.0),
    unit("GiB", "gibibyte", 1_073_741_824.0),
];

const ENERGY: &[Unit] = &[
    unit("J", "joule", 1.0),
    unit("kJ", "kilojoule", 1000.0),
    unit("cal", "calorie", 4.184),
    unit("kcal", "kilocalorie", 4184.0),
    unit("Wh", "watt-hour", 3600.0),
    unit("kWh", "kilowatt-hour", 3.6e6),
    unit("BTU", "British thermal unit", 1_055.055_852_62),
];

const PRESSURE: &[Unit] = &[
    unit("Pa", "pascal", 1.0),
    unit("kPa", "kilopascal", 1000.0),
    unit("bar", "bar", 1e5),
    unit("atm", "atmosphere", 101_325.0),
    unit("psi", "pound per square inch", 6_894.757_293_168),
    unit("mmHg", "millimetre of mercury", 133.322_387_415),
];

const TEMPERATURE: &[Unit] = &[
    affine("C", "degree Celsius", 1.0, 0.0),
    affine("F", "degree Fahrenheit", 5.0 / 9.0, -160.0 / 9.0),
    affine("K", "kelvin", 1.0, -273.15),
    affine("R", "degree Rankine", 5.0 / 9.0, -273.15),
];

const ABSOLUTE_ZERO_C: f64 = -273.15;

impl Category {
    pub const ALL: [Category; 10] = [
        Self::Length,
        Self::Mass,
        Self::Volume,
        Self::Area,
        Self::Speed,
        Self::Time,
        Self::Data,
        Self::Energy,
        Self::Pressure,
        Self::Temperature,
    ];

    pub fn units(self) -> &'static [Unit] {
        match self {
            Self::Length => LENGTH,
            Self::Mass => MASS,
            Self::Volume => VOLUME,
            Self::Area => AREA,
            Self::Speed => SPEED,
            Self::Time => TIME,
            Self::Data => DATA,
            Self::Energy => ENERGY,
            Self::Pressure => PRESSURE,
            Self::Temperature => TEMPERATURE,
        }
    }
}

/// Look a unit up by symbol. Exact symbol wins over a case-insensitive
/// symbol or name match, so `B` (byte) and `bit` stay distinct.
pub fn find_unit(query: &str) -> Result<(Category, &'static Unit)> {
    let query = query.trim();
    let all = || {
        Category::ALL
            .into_iter()
            .flat_map(|category| category.units().iter().map(move |unit| (category, unit)))
    };

    all()
        .find(|(_, unit)| unit.symbol == query)
        .or_else(|| {
            all().find(|(_, unit)| {
                unit.symbol.eq_ignore_ascii_case(query) || unit.name.eq_ignore_ascii_case(query)
            })
        })
        .ok_or_else(|| CalcError::UnknownUnit {
            unit: query.to_string(),
        })
}

pub fn convert_value(value: f64, from: &Unit, to: &Unit) -> f64 {
    to.scale.from_base(from.scale.to_base(value))
}

fn format_factor(value: f64) -> String {
    let magnitude = value.abs();
    if magnitude != 0.0 && !(1e-6..1e9).contains(&magnitude) {
        return format!("{:e}", value);
    }
    let fixed = format!("{:.10}", value);
    fixed.trim_end_matches('0').trim_end_matches('.').to_string()
}

fn degree_symbol(unit: &Unit) -> String {
    match unit.symbol {
        "K" => "K".to_string(),
        other => format!("°{}", other),
    }
}

/// Human-readable relation between two units of the same category.
pub fn formula(category: Category, from: &Unit, to: &Unit) -> String {
    if category != Category::Temperature {
        let ratio = from.scale.factor() / to.scale.factor();
        return format!("1 {} = {} {}", from.symbol, format_factor(ratio), to.symbol);
    }

    match (from.symbol, to.symbol) {
        ("C", "F") => "°F = °C × 9/5 + 32".to_string(),
        ("F", "C") => "°C = (°F − 32) × 5/9".to_string(),
        ("C", "K") => "K = °C + 273.15".to_string(),
        ("K", "C") => "°C = K − 273.15".to_string(),
        ("F", "K") => "K = (°F − 32) × 5/9 + 273.15".to_string(),
        ("K", "F") => "°F = (K − 273.15) × 9/5 + 32".to_string(),
        _ => {
            // to = from * slope + intercept
            let slope = from.scale.factor() / to.scale.factor();
            let intercept = (from.scale.offset() - to.scale.offset()) / to.scale.factor();
            format!(
                "{} = {} × {} + {}",
                degree_symbol(to),
                degree_symbol(from),
                format_factor(slope),
                format_factor(intercept)
            )
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, Args)]
pub struct ConvertInput {
    #[arg(long, value_parser = finite_number)]
    pub value: f64,

    /// Source unit symbol, e.g. km, lb, F, MiB
    #[arg(long)]
    pub from: String,

    /// Target unit symbol; omit to list every unit in the category
    #[arg(long)]
    #[serde(default)]
    pub to: Option<String>,
}

#[derive(Debug, Clone, Serialize)]
pub struct ConvertedValue {
    pub unit: &'static str,
    pub name: &'static str,
    pub value: f64,
}

#[derive(Debug, Clone, Serialize)]
pub struct ConversionResult {
    pub category: Category,
    pub value: f64,
    pub from: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub to: Option<&'static str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub result: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub formula: Option<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub table: Vec<ConvertedValue>,
}

impl Validate for ConvertInput {
    fn validate(&self) -> Result<()> {
        validate_finite("value", self.value)?;
        validate_non_empty_string("from", &self.from).map_err(|_| CalcError::missing("from"))?;
        let (category, from) = find_unit(&self.from)?;

        if let Some(to) = &self.to {
            let (to_category, _) = find_unit(to)?;
            if to_category != category {
                return Err(CalcError::domain(format!(
                    "cannot convert {:?} unit '{}' to {:?} unit '{}'",
                    category, self.from, to_category, to
                )));
            }
        }

        if category == Category::Temperature && from.scale.to_base(self.value) < ABSOLUTE_ZERO_C {
            return Err(CalcError::out_of_range(
                "value",
                self.value,
                "temperature is below absolute zero",
            ));
        }
        Ok(())
    }
}

impl Calculator for ConvertInput {
    type Output = ConversionResult;
    const NAME: &'static str = "convert";

    fn compute(&self) -> Result<ConversionResult> {
        let (category, from) = find_unit(&self.from)?;

        let mut result = ConversionResult {
            category,
            value: self.value,
            from: from.symbol,
            to: None,
            result: None,
            formula: None,
            table: Vec::new(),
        };

        match &self.to {
            Some(to) => {
                let (_, to) = find_unit(to)?;
                result.to = Some(to.symbol);
                result.result = Some(convert_value(self.value, from, to));
                result.formula = Some(formula(category, from, to));
            }
            None => {
                result.table = category
                    .units()
                    .iter()
                    .map(|unit| ConvertedValue {
                        unit: unit.symbol,
                        name: unit.name,
                        value: convert_value(self.value, from, unit),
                    })
                    .collect();
            }
        }

        Ok(result)
    }
}
