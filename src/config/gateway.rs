//! Submission gateway configuration

use chrono::FixedOffset;
use serde::Deserialize;

use super::error::ValidationError;
use crate::ports::ReviewChannelId;

/// Where and how finished applications are delivered
#[derive(Debug, Clone, Deserialize)]
pub struct GatewayConfig {
    /// Reviewers' channel id; unset means submissions cannot be delivered
    pub review_chat_id: Option<String>,

    /// Reviewers' local offset from UTC, used for timestamps in summaries
    #[serde(default = "default_review_utc_offset_hours")]
    pub review_utc_offset_hours: i32,
}

impl GatewayConfig {
    /// Parsed review channel, or `None` if unset or malformed.
    pub fn destination(&self) -> Option<ReviewChannelId> {
        let raw = self.review_chat_id.as_deref()?.trim();
        if raw.is_empty() {
            return None;
        }
        match raw.parse::<ReviewChannelId>() {
            Ok(channel) => Some(channel),
            Err(e) => {
                tracing::warn!("Ignoring malformed review chat id: {}", e);
                None
            }
        }
    }

    pub fn review_offset(&self) -> Option<FixedOffset> {
        FixedOffset::east_opt(self.review_utc_offset_hours.checked_mul(3600)?)
    }

    /// Validate gateway configuration
    pub fn validate(&self) -> Result<(), ValidationError> {
        if !(-12..=14).contains(&self.review_utc_offset_hours) {
            return Err(ValidationError::InvalidUtcOffset);
        }
        Ok(())
    }
}

impl Default for GatewayConfig {
    fn default() -> Self {
        Self {
            review_chat_id: None,
            review_utc_offset_hours: default_review_utc_offset_hours(),
        }
    }
}

fn default_review_utc_offset_hours() -> i32 {
    5
}

#[cfg(test)]
mod tests {
    use super::*;

    fn with_chat_id(id: &str) -> GatewayConfig {
        GatewayConfig {
            review_chat_id: Some(id.to_string()),
            ..Default::default()
        }
    }

    #[test]
    fn test_unset_destination_is_none() {
        assert_eq!(GatewayConfig::default().destination(), None);
        assert_eq!(with_chat_id("  ").destination(), None);
    }

    #[test]
    fn test_group_destination_parses() {
        assert_eq!(
            with_chat_id("-1001234567890").destination(),
            Some(ReviewChannelId::new(-1001234567890))
        );
    }

    #[test]
    fn test_malformed_destination_is_none() {
        assert_eq!(with_chat_id("@hr_channel").destination(), None);
        assert_eq!(with_chat_id("12345678901234567890").destination(), None);
    }

    #[test]
    fn test_default_offset_is_utc_plus_five() {
        let offset = GatewayConfig::default().review_offset().unwrap();
        assert_eq!(offset.local_minus_utc(), 5 * 3600);
    }

    #[test]
    fn test_validation_offset_range() {
        let config = GatewayConfig {
            review_utc_offset_hours: 15,
            ..Default::default()
        };
        assert_eq!(config.validate(), Err(ValidationError::InvalidUtcOffset));
        assert!(GatewayConfig::default().validate().is_ok());
    }
}
