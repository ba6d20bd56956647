//! Configuration error types

use thiserror::Error;

/// Errors that can occur during configuration loading
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Configuration loading failed: {0}")]
    LoadError(#[from] config::ConfigError),

    #[error("Validation failed: {0}")]
    ValidationFailed(#[from] ValidationError),
}

/// Errors that can occur during configuration validation
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ValidationError {
    #[error("Unsupported default locale: {0}")]
    UnsupportedLocale(String),

    #[error("Minimum voice duration must be between 1 and 300 seconds")]
    InvalidVoiceDuration,

    #[error("Review UTC offset must be between -12 and 14 hours")]
    InvalidUtcOffset,

    #[error("Empty log filter")]
    EmptyLogFilter,
}
