//! Error handling for StyleBuddy
//!
//! This module defines the main error types used throughout the application
//! and provides a unified error handling strategy.

use thiserror::Error;

/// Main error type for StyleBuddy application
#[derive(Error, Debug)]
pub enum StyleBuddyError {
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("Database migration error: {0}")]
    Migration(#[from] sqlx::migrate::MigrateError),

    #[error("Language model error: {0}")]
    Llm(#[from] LlmError),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Product not found: {product_id}")]
    ProductNotFound { product_id: i64 },

    #[error("Product out of stock: {product_id}")]
    OutOfStock { product_id: i64 },

    #[error("Cart not found for user: {user_id}")]
    CartNotFound { user_id: i64 },

    #[error("HTTP request error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Service unavailable: {0}")]
    ServiceUnavailable(String),
}

/// Language-model API specific errors
#[derive(Error, Debug)]
pub enum LlmError {
    #[error("Language model request failed: {0}")]
    RequestFailed(String),

    #[error("Language model request timeout")]
    Timeout,

    #[error("Invalid language model response: {0}")]
    InvalidResponse(String),

    #[error("Language model service disabled")]
    Disabled,

    #[error("Language model service unavailable")]
    ServiceUnavailable,
}

/// Result type alias for StyleBuddy operations
pub type Result<T> = std::result::Result<T, StyleBuddyError>;

/// Result type alias for language-model operations
pub type LlmResult<T> = std::result::Result<T, LlmError>;

impl StyleBuddyError {
    /// Check if the error is recoverable
    pub fn is_recoverable(&self) -> bool {
        match self {
            StyleBuddyError::Database(_) => false,
            StyleBuddyError::Migration(_) => false,
            StyleBuddyError::Llm(_) => true,
            StyleBuddyError::Config(_) => false,
            StyleBuddyError::ProductNotFound { .. } => false,
            StyleBuddyError::OutOfStock { .. } => false,
            StyleBuddyError::CartNotFound { .. } => false,
            StyleBuddyError::Http(_) => true,
            StyleBuddyError::Serialization(_) => false,
            StyleBuddyError::Io(_) => true,
            StyleBuddyError::InvalidInput(_) => false,
            StyleBuddyError::ServiceUnavailable(_) => true,
        }
    }

    /// Get error severity level
    pub fn severity(&self) -> ErrorSeverity {
        match self {
            StyleBuddyError::Database(_) => ErrorSeverity::Critical,
            StyleBuddyError::Migration(_) => ErrorSeverity::Critical,
            StyleBuddyError::Config(_) => ErrorSeverity::Critical,
            StyleBuddyError::ProductNotFound { .. } => ErrorSeverity::Info,
            StyleBuddyError::OutOfStock { .. } => ErrorSeverity::Info,
            StyleBuddyError::CartNotFound { .. } => ErrorSeverity::Info,
            StyleBuddyError::InvalidInput(_) => ErrorSeverity::Info,
            _ => ErrorSeverity::Error,
        }
    }
}

/// Error severity levels
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorSeverity {
    Info,
    Warning,
    Error,
    Critical,
}

impl std::fmt::Display for ErrorSeverity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ErrorSeverity::Info => write!(f, "INFO"),
            ErrorSeverity::Warning => write!(f, "WARN"),
            ErrorSeverity::Error => write!(f, "ERROR"),
            ErrorSeverity::Critical => write!(f, "CRITICAL"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_llm_errors_are_recoverable() {
        let err = StyleBuddyError::Llm(LlmError::Timeout);
        assert!(err.is_recoverable());

        let err = StyleBuddyError::Llm(LlmError::InvalidResponse("not json".to_string()));
        assert!(err.is_recoverable());
    }

    #[test]
    fn test_validation_errors_are_terminal() {
        let errors = [
            StyleBuddyError::ProductNotFound { product_id: 42 },
            StyleBuddyError::OutOfStock { product_id: 42 },
            StyleBuddyError::CartNotFound { user_id: 7 },
            StyleBuddyError::InvalidInput("empty message".to_string()),
        ];
        for err in errors {
            assert!(!err.is_recoverable(), "{err}");
            assert_eq!(err.severity(), ErrorSeverity::Info);
        }
    }

    #[test]
    fn test_config_errors_are_critical() {
        let err = StyleBuddyError::Config("missing database url".to_string());
        assert_eq!(err.severity(), ErrorSeverity::Critical);
        assert!(!err.is_recoverable());
    }
}
