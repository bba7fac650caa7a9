use serde::{Deserialize, Serialize};

/// One evaluated calculation, output kept as a JSON object.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CalcRecord {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
    pub calculator: String,
    pub output: serde_json::Value,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CalcFailure {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
    pub calculator: String,
    pub error: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct BatchOutcome {
    pub records: Vec<CalcRecord>,
    pub failures: Vec<CalcFailure>,
}

/// Serialized artifacts produced from a batch outcome.
#[derive(Debug, Clone)]
pub struct RenderedOutcome {
    pub json_output: String,
    pub csv_output: String,
    pub record_count: usize,
    pub failure_count: usize,
}
