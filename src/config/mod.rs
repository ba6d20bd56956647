//! Application configuration module
//!
//! This module provides type-safe configuration loading from environment variables
//! using the `config` and `dotenvy` crates. Configuration is loaded with the
//! `HIRING_INTAKE` prefix and nested values use double underscores as separators.
//!
//! # Example
//!
//! ```no_run
//! use hiring_intake::config::AppConfig;
//!
//! let config = AppConfig::load().expect("Failed to load configuration");
//! config.validate().expect("Invalid configuration");
//!
//! println!("Reviews go to {:?}", config.gateway.destination());
//! ```

mod error;
mod gateway;
mod logging;
mod session;

pub use error::{ConfigError, ValidationError};
pub use gateway::GatewayConfig;
pub use logging::LoggingConfig;
pub use session::SessionConfig;

use serde::Deserialize;

/// Root application configuration
///
/// Every section has defaults, so loading succeeds with no variables set.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AppConfig {
    /// Review channel and summary time zone
    #[serde(default)]
    pub gateway: GatewayConfig,

    /// Session defaults (locale, voice sample threshold)
    #[serde(default)]
    pub session: SessionConfig,

    /// Tracing subscriber settings
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl AppConfig {
    /// Load configuration from environment variables
    ///
    /// This function:
    /// 1. Loads `.env` file if present (for development)
    /// 2. Reads environment variables with `HIRING_INTAKE` prefix
    /// 3. Uses `__` (double underscore) to separate nested values
    /// 4. Deserializes into typed configuration structs
    ///
    /// # Environment Variable Format
    ///
    /// - `HIRING_INTAKE__GATEWAY__REVIEW_CHAT_ID=-100123` -> `gateway.review_chat_id`
    /// - `HIRING_INTAKE__SESSION__DEFAULT_LOCALE=ru` -> `session.default_locale`
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if values cannot be parsed into expected types.
    pub fn load() -> Result<Self, ConfigError> {
        // Load .env file if present (development)
        dotenvy::dotenv().ok();

        let config = config::Config::builder()
            .add_source(
                config::Environment::default()
                    .prefix("HIRING_INTAKE")
                    .separator("__"),
            )
            .build()?
            .try_deserialize()?;

        Ok(config)
    }

    /// Validate all configuration values
    ///
    /// A missing or malformed review channel is not an error here; the
    /// intake runs and reports submissions as undeliverable.
    ///
    /// # Errors
    ///
    /// Returns `ValidationError` if any configuration value is invalid.
    pub fn validate(&self) -> Result<(), ValidationError> {
        self.gateway.validate()?;
        self.session.validate()?;
        self.logging.validate()?;
        Ok(())
    }
}
