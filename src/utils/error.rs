use thiserror::Error;

#[derive(Error, Debug)]
pub enum EtlError {
    #[error("Required columns are missing: {}", missing.join(", "))]
    SchemaError { missing: Vec<String> },

    #[error("No data left after filtering")]
    EmptyResultError,

    #[error("Unexpected input: {message}")]
    UnexpectedInputError { message: String },

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Spreadsheet export error: {0}")]
    XlsxError(#[from] rust_xlsxwriter::XlsxError),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("Configuration error: {message}")]
    ConfigError { message: String },

    #[error("Invalid value '{value}' for '{field}': {reason}")]
    InvalidConfigValueError {
        field: String,
        value: String,
        reason: String,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Schema,
    Data,
    Input,
    Output,
    Configuration,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum ErrorSeverity {
    Low,
    Medium,
    High,
    Critical,
}

impl ErrorSeverity {
    /// Process exit code for a run that failed with this severity.
    pub fn exit_code(self) -> i32 {
        match self {
            ErrorSeverity::Low => 0,
            ErrorSeverity::Medium => 2,
            ErrorSeverity::High => 1,
            ErrorSeverity::Critical => 3,
        }
    }
}

impl EtlError {
    pub fn schema<I, S>(missing: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        EtlError::SchemaError {
            missing: missing.into_iter().map(Into::into).collect(),
        }
    }

    pub fn unexpected_input(message: impl Into<String>) -> Self {
        EtlError::UnexpectedInputError {
            message: message.into(),
        }
    }

    pub fn category(&self) -> ErrorCategory {
        match self {
            EtlError::SchemaError { .. } => ErrorCategory::Schema,
            EtlError::EmptyResultError => ErrorCategory::Data,
            EtlError::UnexpectedInputError { .. } => ErrorCategory::Input,
            EtlError::IoError(_) | EtlError::XlsxError(_) | EtlError::SerializationError(_) => {
                ErrorCategory::Output
            }
            EtlError::ConfigError { .. } | EtlError::InvalidConfigValueError { .. } => {
                ErrorCategory::Configuration
            }
        }
    }

    pub fn severity(&self) -> ErrorSeverity {
        match self {
            EtlError::EmptyResultError => ErrorSeverity::Medium,
            EtlError::SchemaError { .. } | EtlError::UnexpectedInputError { .. } => {
                ErrorSeverity::High
            }
            EtlError::ConfigError { .. } | EtlError::InvalidConfigValueError { .. } => {
                ErrorSeverity::High
            }
            EtlError::IoError(_) | EtlError::XlsxError(_) | EtlError::SerializationError(_) => {
                ErrorSeverity::Critical
            }
        }
    }

    pub fn recovery_suggestion(&self) -> &'static str {
        match self.category() {
            ErrorCategory::Schema => "Export the claims file again with every required column present",
            ErrorCategory::Data => "Check that the file contains claims with status 'R'",
            ErrorCategory::Input => "Make sure the upload is a comma-separated UTF-8 file with a header row",
            ErrorCategory::Output => "Check that the output directory exists and is writable",
            ErrorCategory::Configuration => "Review the command line flags or the TOML configuration file",
        }
    }

    /// Message shown to the operator; mirrors the wording of the upload screen.
    pub fn user_friendly_message(&self) -> String {
        match self {
            EtlError::SchemaError { missing } if missing.len() == 1 && missing[0] == crate::domain::schema::STATUS_COLUMN => {
                format!("The column '{}' is missing from the uploaded file.", missing[0])
            }
            EtlError::SchemaError { missing } => {
                format!("The following required columns are missing: {}", missing.join(", "))
            }
            EtlError::EmptyResultError => {
                "No data left after filtering. Please check the input file.".to_string()
            }
            other => format!("An error occurred while processing the file: {}", other),
        }
    }
}

pub type Result<T> = std::result::Result<T, EtlError>;
