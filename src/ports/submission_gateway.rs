//! Submission Gateway Port - Interface for delivering finished applications.
//!
//! The gateway receives the finalized record, its rendered summary, and the
//! attachments in review order, and forwards them to the reviewers'
//! channel. It is called at most once per confirmed application.

use async_trait::async_trait;
use serde::Serialize;
use std::fmt;
use std::str::FromStr;

use crate::domain::foundation::ValidationError;
use crate::domain::summary::Submission;

/// Longest digit run accepted for a channel id (fits in `i64`).
const MAX_CHANNEL_DIGITS: usize = 19;

/// Numeric id of the reviewers' channel; group ids are negative.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct ReviewChannelId(i64);

impl ReviewChannelId {
    pub fn new(id: i64) -> Self {
        Self(id)
    }

    pub fn as_i64(&self) -> i64 {
        self.0
    }
}

impl fmt::Display for ReviewChannelId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for ReviewChannelId {
    type Err = ValidationError;

    /// Accepts an optional leading `-` followed by 1 to 19 digits.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        let digits = s.strip_prefix('-').unwrap_or(s);
        if digits.is_empty()
            || digits.len() > MAX_CHANNEL_DIGITS
            || !digits.bytes().all(|b| b.is_ascii_digit())
        {
            return Err(ValidationError::invalid_format(
                "review_chat_id",
                format!("'{}' is not a numeric channel id", s),
            ));
        }
        s.parse::<i64>().map(Self).map_err(|_| {
            ValidationError::invalid_format("review_chat_id", format!("'{}' is out of range", s))
        })
    }
}

/// Errors that can occur while delivering a submission
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum GatewayError {
    #[error("Review channel is not configured")]
    Unconfigured,

    #[error("Delivery failed: {0}")]
    Delivery(String),

    #[error("Submission rejected by channel: {0}")]
    Rejected(String),
}

/// Port for forwarding submissions to reviewers
#[async_trait]
pub trait SubmissionGateway: Send + Sync {
    /// Deliver a submission to `channel`.
    ///
    /// # Errors
    /// Returns `GatewayError` if the channel refuses or cannot be reached
    async fn submit(
        &self,
        channel: ReviewChannelId,
        submission: &Submission,
    ) -> Result<(), GatewayError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_group_and_user_ids() {
        assert_eq!(
            "-1001234567890".parse::<ReviewChannelId>().unwrap().as_i64(),
            -1001234567890
        );
        assert_eq!("42".parse::<ReviewChannelId>().unwrap().as_i64(), 42);
        assert_eq!(" 7 ".parse::<ReviewChannelId>().unwrap().as_i64(), 7);
    }

    #[test]
    fn rejects_non_numeric_ids() {
        assert!("".parse::<ReviewChannelId>().is_err());
        assert!("-".parse::<ReviewChannelId>().is_err());
        assert!("@hr_group".parse::<ReviewChannelId>().is_err());
        assert!("12a".parse::<ReviewChannelId>().is_err());
        assert!("--5".parse::<ReviewChannelId>().is_err());
    }

    #[test]
    fn rejects_ids_too_long_for_i64() {
        assert!("12345678901234567890".parse::<ReviewChannelId>().is_err());
        assert!("9999999999999999999".parse::<ReviewChannelId>().is_err());
        assert!("9223372036854775807".parse::<ReviewChannelId>().is_ok());
    }

    #[test]
    fn gateway_error_messages() {
        assert_eq!(
            GatewayError::Delivery("timeout".into()).to_string(),
            "Delivery failed: timeout"
        );
    }
}
