//! Session configuration

use serde::Deserialize;

use super::error::ValidationError;
use crate::domain::foundation::Locale;
use crate::domain::questionnaire::DEFAULT_MIN_VOICE_SECONDS;

/// Per-session defaults and thresholds
#[derive(Debug, Clone, Deserialize)]
pub struct SessionConfig {
    /// Locale code given to sessions on first contact
    #[serde(default = "default_locale")]
    pub default_locale: String,

    /// Shortest accepted Russian voice sample, in seconds
    #[serde(default = "default_min_voice_seconds")]
    pub min_voice_seconds: u32,
}

impl SessionConfig {
    pub fn locale(&self) -> Result<Locale, ValidationError> {
        self.default_locale
            .parse()
            .map_err(|_| ValidationError::UnsupportedLocale(self.default_locale.clone()))
    }

    /// Validate session configuration
    pub fn validate(&self) -> Result<(), ValidationError> {
        self.locale()?;
        if self.min_voice_seconds == 0 || self.min_voice_seconds > 300 {
            return Err(ValidationError::InvalidVoiceDuration);
        }
        Ok(())
    }
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            default_locale: default_locale(),
            min_voice_seconds: default_min_voice_seconds(),
        }
    }
}

fn default_locale() -> String {
    Locale::default().code().to_string()
}

fn default_min_voice_seconds() -> u32 {
    DEFAULT_MIN_VOICE_SECONDS
}
