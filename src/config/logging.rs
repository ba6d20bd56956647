//! Logging configuration

use serde::Deserialize;

use super::error::ValidationError;

/// Tracing subscriber settings
#[derive(Debug, Clone, Deserialize)]
pub struct LoggingConfig {
    /// `EnvFilter` directive; `RUST_LOG` takes precedence when set
    #[serde(default = "default_filter")]
    pub filter: String,

    /// Emit JSON lines instead of human-readable output
    #[serde(default)]
    pub json: bool,
}

impl LoggingConfig {
    /// Validate logging configuration
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.filter.trim().is_empty() {
            return Err(ValidationError::EmptyLogFilter);
        }
        Ok(())
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            filter: default_filter(),
            json: false,
        }
    }
}

fn default_filter() -> String {
    "info,hiring_intake=debug".to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_logging_config_defaults() {
        let config = LoggingConfig::default();
        assert_eq!(config.filter, "info,hiring_intake=debug");
        assert!(!config.json);
    }

    #[test]
    fn test_validation_empty_filter() {
        let config = LoggingConfig {
            filter: "  ".to_string(),
            ..Default::default()
        };
        assert_eq!(config.validate(), Err(ValidationError::EmptyLogFilter));
    }
}
