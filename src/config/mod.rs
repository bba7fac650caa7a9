pub mod batch_config;

use crate::core::request::CalcRequest;
use clap::{Parser, ValueEnum};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum DisplayFormat {
    #[default]
    Text,
    Json,
}

#[derive(Debug, Clone, Serialize, Deserialize, Parser)]
#[command(name = "calc-tech")]
#[command(about = "Everyday calculators: health, finance, math, networking, time and more")]
pub struct CliConfig {
    #[arg(long, global = true, help = "Enable verbose output")]
    pub verbose: bool,

    #[arg(long, global = true, value_enum, default_value_t = DisplayFormat::Text)]
    pub format: DisplayFormat,

    /// Optional label echoed in the output
    #[arg(long, global = true)]
    pub label: Option<String>,

    #[command(subcommand)]
    pub command: CalcRequest,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_subcommand_with_globals() {
        let config = CliConfig::try_parse_from([
            "calc-tech",
            "--format",
            "json",
            "subnet",
            "--ip",
            "192.168.1.100",
            "--mask",
            "255.255.255.0",
        ])
        .unwrap();
        assert_eq!(config.format, DisplayFormat::Json);
        assert_eq!(config.command.name(), "subnet");
    }

    #[test]
    fn test_rejects_non_finite_numbers() {
        let parsed = CliConfig::try_parse_from([
            "calc-tech", "bmi", "--weight", "NaN", "--height", "180",
        ]);
        assert!(parsed.is_err());
    }

    #[test]
    fn test_negative_values_reach_the_calculator() {
        let config = CliConfig::try_parse_from([
            "calc-tech", "percentage", "--mode", "change", "--x", "-50", "--y", "-25",
        ])
        .unwrap();
        let record = config.command.evaluate(None).unwrap();
        assert_eq!(record.output["result"], 50.0);
    }
}
