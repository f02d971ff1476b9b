//! Error types for mxmoney-core
//!
//! The search, highlight and aggregation operations are total and never
//! return these. They cover the surrounding plumbing: reading a snapshot
//! from disk, decoding it and checking record invariants.

use serde::{Deserialize, Serialize};
use std::io;
use thiserror::Error;

/// Error codes for programmatic error handling
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ErrorCode {
    FileNotFound,
    ParseError,
    ValidationError,
    IoError,
    ConfigError,
    InternalError,
}

impl std::fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ErrorCode::FileNotFound => write!(f, "FILE_NOT_FOUND"),
            ErrorCode::ParseError => write!(f, "PARSE_ERROR"),
            ErrorCode::ValidationError => write!(f, "VALIDATION_ERROR"),
            ErrorCode::IoError => write!(f, "IO_ERROR"),
            ErrorCode::ConfigError => write!(f, "CONFIG_ERROR"),
            ErrorCode::InternalError => write!(f, "INTERNAL_ERROR"),
        }
    }
}

/// Error severity levels
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ErrorSeverity {
    Warning,
    Error,
    Critical,
}

impl std::fmt::Display for ErrorSeverity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ErrorSeverity::Warning => write!(f, "warning"),
            ErrorSeverity::Error => write!(f, "error"),
            ErrorSeverity::Critical => write!(f, "critical"),
        }
    }
}

/// Detailed error information for display
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorDetails {
    pub code: ErrorCode,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<serde_json::Value>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub suggestions: Vec<String>,
}

impl ErrorDetails {
    pub fn new(code: ErrorCode, message: String) -> Self {
        Self {
            code,
            message,
            details: None,
            suggestions: vec![],
        }
    }

    pub fn with_detail(mut self, detail: serde_json::Value) -> Self {
        self.details = Some(detail);
        self
    }

    pub fn with_suggestion(mut self, suggestion: String) -> Self {
        self.suggestions.push(suggestion);
        self
    }
}

impl std::fmt::Display for ErrorDetails {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[{}] {}", self.code, self.message)?;
        if let Some(ref details) = self.details {
            write!(f, "\nDetails: {}", details)?;
        }
        if !self.suggestions.is_empty() {
            write!(f, "\nSuggestions:")?;
            for suggestion in &self.suggestions {
                write!(f, "\n  - {}", suggestion)?;
            }
        }
        Ok(())
    }
}

/// Main error type for mxmoney-core
#[derive(Error, Debug)]
pub enum CoreError {
    #[error("File not found: {path}")]
    FileNotFound { path: String },

    #[error("Parse error: {message}")]
    ParseError { message: String },

    #[error("Validation error: {message}")]
    ValidationError { message: String },

    #[error("IO error: {0}")]
    IoError(#[from] io::Error),

    #[error("Configuration error: {message}")]
    ConfigError { message: String },

    #[error("Internal error: {message}")]
    InternalError { message: String },
}

impl CoreError {
    pub fn code(&self) -> ErrorCode {
        match self {
            CoreError::FileNotFound { .. } => ErrorCode::FileNotFound,
            CoreError::ParseError { .. } => ErrorCode::ParseError,
            CoreError::ValidationError { .. } => ErrorCode::ValidationError,
            CoreError::IoError(_) => ErrorCode::IoError,
            CoreError::ConfigError { .. } => ErrorCode::ConfigError,
            CoreError::InternalError { .. } => ErrorCode::InternalError,
        }
    }

    pub fn severity(&self) -> ErrorSeverity {
        match self {
            CoreError::ValidationError { .. } => ErrorSeverity::Warning,
            CoreError::ConfigError { .. } | CoreError::InternalError { .. } => ErrorSeverity::Critical,
            _ => ErrorSeverity::Error,
        }
    }

    /// Convert to detailed error info
    pub fn to_details(&self) -> ErrorDetails {
        let details = ErrorDetails::new(self.code(), self.to_string());

        match self {
            CoreError::FileNotFound { path } => details
                .with_detail(serde_json::json!({ "path": path }))
                .with_suggestion("Set data.snapshot in the config or pass --data.".to_string()),
            CoreError::ParseError { message } => details
                .with_detail(serde_json::json!({ "parse_error": message }))
                .with_suggestion("The snapshot must be a JSON array of transactions.".to_string())
                .with_suggestion("Dates use YYYY-MM-DD and type is INCOME or EXPENSE.".to_string()),
            CoreError::ValidationError { .. } => details
                .with_suggestion("Amounts must be non-negative and categories named.".to_string()),
            _ => details,
        }
    }
}

impl From<mxmoney_config::ConfigError> for CoreError {
    fn from(error: mxmoney_config::ConfigError) -> Self {
        CoreError::ConfigError {
            message: error.to_string(),
        }
    }
}

impl From<serde_json::Error> for CoreError {
    fn from(error: serde_json::Error) -> Self {
        CoreError::ParseError {
            message: error.to_string(),
        }
    }
}

/// Result type with CoreError
pub type CoreResult<T> = Result<T, CoreError>;

/// Error logger trait
pub trait ErrorLogger {
    fn log_error(&self, error: &CoreError, operation: &str);
}

/// Default error logger using the log crate
#[derive(Default)]
pub struct DefaultErrorLogger;

impl ErrorLogger for DefaultErrorLogger {
    fn log_error(&self, error: &CoreError, operation: &str) {
        match error.severity() {
            ErrorSeverity::Warning => log::warn!(
                target: "mxmoney::error",
                "{} - Operation: {}",
                error.to_details(),
                operation
            ),
            _ => log::error!(
                target: "mxmoney::error",
                "{} - Operation: {}",
                error.to_details(),
                operation
            ),
        }
    }
}
