use crate::core::engine::EngineOptions;
use crate::core::request::BatchRequest;
use crate::utils::error::{CalcError, Result};
use crate::utils::validation::{validate_non_empty_string, validate_path, Validate};
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::sync::OnceLock;

const VALID_FORMATS: [&str; 2] = ["json", "csv"];
const VALID_ERROR_MODES: [&str; 2] = ["skip", "fail"];
const VALID_LOG_FORMATS: [&str; 2] = ["compact", "json"];

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BatchConfig {
    pub batch: BatchInfo,
    #[serde(default)]
    pub requests: Vec<BatchRequest>,
    pub output: OutputConfig,
    pub error_handling: Option<ErrorHandlingConfig>,
    pub logging: Option<LoggingConfig>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BatchInfo {
    pub name: String,
    pub description: Option<String>,
    pub version: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OutputConfig {
    pub path: String,
    #[serde(default = "default_formats")]
    pub formats: Vec<String>,
    pub compression: Option<CompressionConfig>,
}

fn default_formats() -> Vec<String> {
    vec!["json".to_string()]
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CompressionConfig {
    pub enabled: bool,
    pub filename: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorHandlingConfig {
    pub on_calculation_error: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    pub format: Option<String>,
}

fn env_var_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| Regex::new(r"\$\{([^}]+)\}").expect("static regex"))
}

fn check_choice(field: &str, value: &str, valid: &[&str]) -> Result<()> {
    if valid.contains(&value) {
        return Ok(());
    }
    Err(CalcError::Config {
        field: field.to_string(),
        message: format!("unsupported value '{}', expected one of: {}", value, valid.join(", ")),
    })
}

impl BatchConfig {
    /// 從 TOML 檔案載入配置
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(&path)?;
        Self::from_toml_str(&content)
    }

    /// 從 TOML 字串解析配置
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let processed = Self::substitute_env_vars(content);
        Ok(toml::from_str(&processed)?)
    }

    /// Replaces `${VAR}` with the environment value; unset variables stay
    /// as written.
    fn substitute_env_vars(content: &str) -> String {
        env_var_pattern()
            .replace_all(content, |caps: &regex::Captures| {
                let var_name = &caps[1];
                std::env::var(var_name).unwrap_or_else(|_| format!("${{{}}}", var_name))
            })
            .into_owned()
    }

    pub fn validate_config(&self) -> Result<()> {
        validate_non_empty_string("batch.name", &self.batch.name)?;
        validate_path("output.path", &self.output.path)?;

        if self.requests.is_empty() {
            return Err(CalcError::Config {
                field: "requests".to_string(),
                message: "the batch has no [[requests]] entries".to_string(),
            });
        }

        if self.output.formats.is_empty() {
            return Err(CalcError::Config {
                field: "output.formats".to_string(),
                message: "at least one output format is required".to_string(),
            });
        }
        for format in &self.output.formats {
            check_choice("output.formats", format, &VALID_FORMATS)?;
        }

        if let Some(compression) = &self.output.compression {
            if let Some(filename) = &compression.filename {
                validate_path("output.compression.filename", filename)?;
            }
        }

        if let Some(mode) = self
            .error_handling
            .as_ref()
            .and_then(|e| e.on_calculation_error.as_deref())
        {
            check_choice("error_handling.on_calculation_error", mode, &VALID_ERROR_MODES)?;
        }

        if let Some(format) = self.logging.as_ref().and_then(|l| l.format.as_deref()) {
            check_choice("logging.format", format, &VALID_LOG_FORMATS)?;
        }

        Ok(())
    }

    pub fn output_path(&self) -> &str {
        &self.output.path
    }

    pub fn writes_format(&self, format: &str) -> bool {
        self.output.formats.iter().any(|f| f == format)
    }

    /// Zip filename when compression is enabled.
    pub fn archive_filename(&self) -> Option<String> {
        self.output
            .compression
            .as_ref()
            .filter(|c| c.enabled)
            .map(|c| {
                c.filename
                    .clone()
                    .unwrap_or_else(|| format!("{}.zip", self.batch.name))
            })
    }

    pub fn fail_fast(&self) -> bool {
        self.error_handling
            .as_ref()
            .and_then(|e| e.on_calculation_error.as_deref())
            == Some("fail")
    }

    pub fn json_logging(&self) -> bool {
        self.logging.as_ref().and_then(|l| l.format.as_deref()) == Some("json")
    }

    pub fn engine_options(&self) -> EngineOptions {
        EngineOptions {
            write_json: self.writes_format("json"),
            write_csv: self.writes_format("csv"),
            archive: self.archive_filename(),
            fail_fast: self.fail_fast(),
        }
    }
}

impl Validate for BatchConfig {
    fn validate(&self) -> Result<()> {
        self.validate_config()
    }
}
