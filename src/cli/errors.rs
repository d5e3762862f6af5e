//! CLI-specific error types

use std::fmt;
use std::io;

use crate::config::ConfigError;

/// CLI error codes
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CliErrorCode {
    /// Configuration file error
    ConfigError,
    /// I/O error (stdin/stdout)
    IoError,
    /// Requested schema does not exist
    UnknownSchema,
    /// At least one document was rejected
    ValidationFailed,
}

impl CliErrorCode {
    /// Get the error code string
    pub fn code(&self) -> &'static str {
        match self {
            Self::ConfigError => "DOC_CLI_CONFIG_ERROR",
            Self::IoError => "DOC_CLI_IO_ERROR",
            Self::UnknownSchema => "DOC_CLI_UNKNOWN_SCHEMA",
            Self::ValidationFailed => "DOC_CLI_VALIDATION_FAILED",
        }
    }
}

/// CLI error
#[derive(Debug)]
pub struct CliError {
    code: CliErrorCode,
    message: String,
}

impl CliError {
    /// Create a new CLI error
    pub fn new(code: CliErrorCode, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
        }
    }

    /// Config error
    pub fn config_error(msg: impl Into<String>) -> Self {
        Self::new(CliErrorCode::ConfigError, msg)
    }

    /// I/O error
    pub fn io_error(msg: impl Into<String>) -> Self {
        Self::new(CliErrorCode::IoError, msg)
    }

    /// Unknown schema
    pub fn unknown_schema(name: &str) -> Self {
        Self::new(
            CliErrorCode::UnknownSchema,
            format!(
                "Unknown schema '{}'. Run 'docschema schemas' to list them.",
                name
            ),
        )
    }

    /// Some documents failed validation
    pub fn validation_failed(failed: usize, total: usize) -> Self {
        Self::new(
            CliErrorCode::ValidationFailed,
            format!("{} of {} documents failed validation", failed, total),
        )
    }

    /// Get the error code string
    pub fn code_str(&self) -> &'static str {
        self.code.code()
    }
}

impl fmt::Display for CliError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.code.code(), self.message)
    }
}

impl std::error::Error for CliError {}

impl From<io::Error> for CliError {
    fn from(e: io::Error) -> Self {
        Self::io_error(e.to_string())
    }
}

impl From<serde_json::Error> for CliError {
    fn from(e: serde_json::Error) -> Self {
        Self::io_error(format!("JSON error: {}", e))
    }
}

impl From<ConfigError> for CliError {
    fn from(e: ConfigError) -> Self {
        Self::config_error(e.to_string())
    }
}

/// CLI result type
pub type CliResult<T> = Result<T, CliError>;
