//! Error types for sneakerweb-core
//!
//! This module provides error handling for the transaction store and form
//! controller, including error codes, detailed messages, and suggestions.

use thiserror::Error;
use serde::{Deserialize, Serialize};

use crate::types::TransactionId;

/// Error codes for programmatic error handling
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ErrorCode {
    /// Transaction not found
    TransactionNotFound,
    /// Required field missing
    ValidationError,
    /// Unknown form field
    InvalidField,
    /// Field value not accepted
    InvalidValue,
    /// Duplicate id in seeded data
    DuplicateEntry,
}

impl std::fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ErrorCode::TransactionNotFound => write!(f, "TRANSACTION_NOT_FOUND"),
            ErrorCode::ValidationError => write!(f, "VALIDATION_ERROR"),
            ErrorCode::InvalidField => write!(f, "INVALID_FIELD"),
            ErrorCode::InvalidValue => write!(f, "INVALID_VALUE"),
            ErrorCode::DuplicateEntry => write!(f, "DUPLICATE_ENTRY"),
        }
    }
}

/// Detailed error information for API responses
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorDetails {
    /// Error code
    pub code: ErrorCode,
    /// Human-readable message
    pub message: String,
    /// Additional details
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<serde_json::Value>,
    /// Suggestions for resolution
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub suggestions: Vec<String>,
}

impl ErrorDetails {
    /// Create a new error detail
    pub fn new(code: ErrorCode, message: String) -> Self {
        Self {
            code,
            message,
            details: None,
            suggestions: vec![],
        }
    }

    /// Add detail information
    pub fn with_detail(mut self, detail: serde_json::Value) -> Self {
        self.details = Some(detail);
        self
    }

    /// Add a suggestion
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

/// Error severity levels
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ErrorSeverity {
    /// Informational
    Info,
    /// Warning - operation may be affected
    Warning,
    /// Error - operation failed
    Error,
}

impl std::fmt::Display for ErrorSeverity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ErrorSeverity::Info => write!(f, "info"),
            ErrorSeverity::Warning => write!(f, "warning"),
            ErrorSeverity::Error => write!(f, "error"),
        }
    }
}

/// Main error type for sneakerweb-core
#[derive(Error, Debug)]
pub enum CoreError {
    #[error("Transaction not found: {id}")]
    TransactionNotFound { id: TransactionId },

    #[error("Validation error: {message}")]
    ValidationError { message: String },

    #[error("Unknown form field: {field}")]
    InvalidField { field: String },

    #[error("Invalid value for {field}: {value}")]
    InvalidValue { field: String, value: String },

    #[error("Duplicate entry: {entry}")]
    DuplicateEntry { entry: String },
}

impl CoreError {
    /// Get the error code
    pub fn code(&self) -> ErrorCode {
        match self {
            CoreError::TransactionNotFound { .. } => ErrorCode::TransactionNotFound,
            CoreError::ValidationError { .. } => ErrorCode::ValidationError,
            CoreError::InvalidField { .. } => ErrorCode::InvalidField,
            CoreError::InvalidValue { .. } => ErrorCode::InvalidValue,
            CoreError::DuplicateEntry { .. } => ErrorCode::DuplicateEntry,
        }
    }

    /// Get the severity level
    pub fn severity(&self) -> ErrorSeverity {
        match self {
            CoreError::TransactionNotFound { .. } => ErrorSeverity::Info,
            CoreError::ValidationError { .. } => ErrorSeverity::Warning,
            CoreError::InvalidField { .. } => ErrorSeverity::Warning,
            CoreError::InvalidValue { .. } => ErrorSeverity::Warning,
            CoreError::DuplicateEntry { .. } => ErrorSeverity::Error,
        }
    }

    /// Convert to detailed error info
    pub fn to_details(&self) -> ErrorDetails {
        let mut details = ErrorDetails::new(self.code(), self.to_string());

        match self {
            CoreError::TransactionNotFound { id } => {
                details = details.with_detail(serde_json::json!({ "id": id }));
                details = details.with_suggestion(
                    "The transaction may have been deleted; reload the list.".to_string()
                );
                details = details.with_suggestion(
                    "Use the /api/transactions endpoint to list all transactions.".to_string()
                );
            }
            CoreError::ValidationError { message } => {
                details = details.with_detail(serde_json::json!({ "validation_message": message }));
                details = details.with_suggestion(
                    "Date and amount are required.".to_string()
                );
            }
            CoreError::InvalidField { field } => {
                details = details.with_detail(serde_json::json!({ "field": field }));
                details = details.with_suggestion(
                    "Valid fields are: date, amount, type, brand.".to_string()
                );
            }
            CoreError::InvalidValue { field, .. } if field == "type" => {
                details = details.with_suggestion(
                    "Type must be Income or Expense.".to_string()
                );
            }
            _ => {}
        }

        details
    }
}

/// Result type with CoreError
pub type CoreResult<T> = Result<T, CoreError>;

/// Error context for reporting
#[derive(Debug, Clone, Default)]
pub struct ErrorContext {
    /// Operation being performed
    pub operation: String,
    /// Additional context data
    pub data: serde_json::Value,
}

impl ErrorContext {
    /// Create a new error context
    pub fn new(operation: impl Into<String>) -> Self {
        Self {
            operation: operation.into(),
            data: serde_json::json!({}),
        }
    }

    /// Add context data
    pub fn with_data(mut self, key: &str, value: serde_json::Value) -> Self {
        self.data[key] = value;
        self
    }
}

/// Error logger trait
pub trait ErrorLogger {
    /// Log an error
    fn log_error(&self, error: &CoreError, context: &ErrorContext);
    /// Log a warning
    fn log_warning(&self, message: &str, context: &ErrorContext);
}

/// Default error logger using log crate
#[derive(Default)]
pub struct DefaultErrorLogger;

impl ErrorLogger for DefaultErrorLogger {
    fn log_error(&self, error: &CoreError, context: &ErrorContext) {
        match error.severity() {
            ErrorSeverity::Info | ErrorSeverity::Warning => log::warn!(
                target: "sneakerweb::error",
                "{} - Operation: {} - Data: {}",
                error.to_details(),
                context.operation,
                context.data
            ),
            ErrorSeverity::Error => log::error!(
                target: "sneakerweb::error",
                "{} - Operation: {} - Data: {}",
                error.to_details(),
                context.operation,
                context.data
            ),
        }
    }

    fn log_warning(&self, message: &str, context: &ErrorContext) {
        log::warn!(
            target: "sneakerweb::error",
            "WARNING: {} - Operation: {} - Data: {}",
            message,
            context.operation,
            context.data
        );
    }
}

// ==================== Tests ====================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_code_display() {
        assert_eq!(ErrorCode::TransactionNotFound.to_string(), "TRANSACTION_NOT_FOUND");
        assert_eq!(ErrorCode::ValidationError.to_string(), "VALIDATION_ERROR");
        assert_eq!(ErrorCode::InvalidField.to_string(), "INVALID_FIELD");
    }

    #[test]
    fn test_core_error_code_and_severity() {
        let error = CoreError::TransactionNotFound { id: 7 };
        assert_eq!(error.code(), ErrorCode::TransactionNotFound);
        assert_eq!(error.severity(), ErrorSeverity::Info);
        assert_eq!(error.to_string(), "Transaction not found: 7");

        let error = CoreError::DuplicateEntry { entry: "id 2".to_string() };
        assert_eq!(error.code(), ErrorCode::DuplicateEntry);
        assert_eq!(error.severity(), ErrorSeverity::Error);
    }

    #[test]
    fn test_error_details_not_found() {
        let details = CoreError::TransactionNotFound { id: 3 }.to_details();
        assert_eq!(details.code, ErrorCode::TransactionNotFound);
        assert_eq!(details.details, Some(serde_json::json!({ "id": 3 })));
        assert_eq!(details.suggestions.len(), 2);
    }

    #[test]
    fn test_error_details_invalid_type_value() {
        let error = CoreError::InvalidValue {
            field: "type".to_string(),
            value: "Refund".to_string(),
        };
        let details = error.to_details();
        assert!(details.message.contains("Refund"));
        assert_eq!(details.suggestions, vec!["Type must be Income or Expense.".to_string()]);
    }

    #[test]
    fn test_error_context() {
        let context = ErrorContext::new("submit")
            .with_data("editing", serde_json::json!(true));
        assert_eq!(context.operation, "submit");
        assert_eq!(context.data["editing"], serde_json::json!(true));
    }
}
