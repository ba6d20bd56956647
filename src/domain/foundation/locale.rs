//! Interface language of a session.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use super::ValidationError;

/// One of the supported interface languages.
///
/// The engine never renders text; the locale only travels with the session
/// so the transport can resolve prompt keys. It is the one piece of session
/// data that survives a clear.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum Locale {
    #[default]
    Uz,
    Ru,
    En,
}

impl Locale {
    /// All supported locales, in menu order.
    pub const ALL: [Locale; 3] = [Locale::Uz, Locale::Ru, Locale::En];

    /// Returns the short code used on the wire.
    pub fn code(&self) -> &'static str {
        match self {
            Self::Uz => "uz",
            Self::Ru => "ru",
            Self::En => "en",
        }
    }

    /// Returns the language's own name, for the language picker.
    pub fn label(&self) -> &'static str {
        match self {
            Self::Uz => "O'zbek",
            Self::Ru => "Русский",
            Self::En => "English",
        }
    }
}

impl fmt::Display for Locale {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

impl FromStr for Locale {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let code = s.trim().to_ascii_lowercase();
        Self::ALL
            .into_iter()
            .find(|locale| locale.code() == code)
            .ok_or_else(|| {
                ValidationError::invalid_format("locale", format!("unsupported code '{}'", s))
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_locale_is_uzbek() {
        assert_eq!(Locale::default(), Locale::Uz);
    }

    #[test]
    fn parses_supported_codes_case_insensitively() {
        assert_eq!("ru".parse::<Locale>().unwrap(), Locale::Ru);
        assert_eq!(" EN ".parse::<Locale>().unwrap(), Locale::En);
    }

    #[test]
    fn rejects_unsupported_code() {
        let err = "de".parse::<Locale>().unwrap_err();
        assert!(err.to_string().contains("unsupported code 'de'"));
    }

    #[test]
    fn serializes_to_snake_case_code() {
        assert_eq!(serde_json::to_string(&Locale::Uz).unwrap(), "\"uz\"");
    }

    #[test]
    fn every_locale_has_label() {
        for locale in Locale::ALL {
            assert!(!locale.label().is_empty());
            assert_eq!(locale.to_string(), locale.code());
        }
    }
}
