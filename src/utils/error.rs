use thiserror::Error;

#[derive(Error, Debug)]
pub enum CalcError {
    #[error("Invalid number for {field}: '{value}' ({reason})")]
    Parse {
        field: String,
        value: String,
        reason: String,
    },

    #[error("Value out of range for {field}: {value} ({reason})")]
    OutOfRange {
        field: String,
        value: String,
        reason: String,
    },

    #[error("Missing input: {field}")]
    MissingInput { field: String },

    #[error("Calculation error: {message}")]
    Domain { message: String },

    #[error("Invalid triangle: {message}")]
    InvalidTriangle { message: String },

    #[error("Invalid address '{input}': {reason}")]
    InvalidAddress { input: String, reason: String },

    #[error("Unknown unit: {unit}")]
    UnknownUnit { unit: String },

    #[error("Configuration error in {field}: {message}")]
    Config { field: String, message: String },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("CSV processing error: {0}")]
    Csv(#[from] csv::Error),

    #[error("Zip operation failed: {0}")]
    Zip(#[from] zip::result::ZipError),

    #[error("TOML parsing error: {0}")]
    Toml(#[from] toml::de::Error),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Input,
    Domain,
    Configuration,
    System,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum ErrorSeverity {
    Low,
    Medium,
    High,
    Critical,
}

impl CalcError {
    pub fn parse(field: &str, value: &str, reason: impl Into<String>) -> Self {
        Self::Parse {
            field: field.to_string(),
            value: value.to_string(),
            reason: reason.into(),
        }
    }

    pub fn out_of_range(field: &str, value: impl ToString, reason: impl Into<String>) -> Self {
        Self::OutOfRange {
            field: field.to_string(),
            value: value.to_string(),
            reason: reason.into(),
        }
    }

    pub fn missing(field: &str) -> Self {
        Self::MissingInput {
            field: field.to_string(),
        }
    }

    pub fn domain(message: impl Into<String>) -> Self {
        Self::Domain {
            message: message.into(),
        }
    }

    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::Parse { .. } | Self::OutOfRange { .. } | Self::MissingInput { .. } => {
                ErrorCategory::Input
            }
            Self::Domain { .. }
            | Self::InvalidTriangle { .. }
            | Self::InvalidAddress { .. }
            | Self::UnknownUnit { .. } => ErrorCategory::Domain,
            Self::Config { .. } | Self::Toml(_) => ErrorCategory::Configuration,
            Self::Io(_) | Self::Serialization(_) | Self::Csv(_) | Self::Zip(_) => {
                ErrorCategory::System
            }
        }
    }

    pub fn severity(&self) -> ErrorSeverity {
        match self.category() {
            ErrorCategory::Input | ErrorCategory::Domain => ErrorSeverity::High,
            ErrorCategory::Configuration => ErrorSeverity::Medium,
            ErrorCategory::System => ErrorSeverity::Critical,
        }
    }

    pub fn recovery_suggestion(&self) -> String {
        match self {
            Self::Parse { field, .. } => {
                format!("Enter a plain decimal number for '{}' (e.g. 42 or 3.5)", field)
            }
            Self::OutOfRange { field, reason, .. } => {
                format!("Adjust '{}': {}", field, reason)
            }
            Self::MissingInput { field } => format!("Provide a value for '{}'", field),
            Self::Domain { .. } => "Check that the inputs describe a valid scenario".to_string(),
            Self::InvalidTriangle { .. } => {
                "Each side must be shorter than the sum of the other two and the angles must total less than 180°".to_string()
            }
            Self::InvalidAddress { .. } => {
                "Use dotted IPv4 notation (192.168.1.10) and a CIDR prefix (/24) or mask (255.255.255.0)".to_string()
            }
            Self::UnknownUnit { .. } => {
                "Run the convert calculator without --to to list the units in that category".to_string()
            }
            Self::Config { .. } | Self::Toml(_) => {
                "Check the batch file against the documented TOML layout".to_string()
            }
            Self::Io(_) => "Check that the path exists and is writable".to_string(),
            Self::Serialization(_) | Self::Csv(_) | Self::Zip(_) => {
                "Retry; if the problem persists, report it with --verbose output".to_string()
            }
        }
    }

    pub fn user_friendly_message(&self) -> String {
        match self.category() {
            ErrorCategory::Input => format!("Input problem: {}", self),
            ErrorCategory::Domain => format!("Cannot calculate: {}", self),
            ErrorCategory::Configuration => format!("Configuration problem: {}", self),
            ErrorCategory::System => format!("System error: {}", self),
        }
    }

    /// Process exit code for this error.
    pub fn exit_code(&self) -> i32 {
        match self.severity() {
            ErrorSeverity::Low => 0,
            ErrorSeverity::Medium => 2,
            ErrorSeverity::High => 1,
            ErrorSeverity::Critical => 3,
        }
    }
}

pub type Result<T> = std::result::Result<T, CalcError>;
