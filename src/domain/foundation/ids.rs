//! Strongly-typed identifier value objects.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use uuid::Uuid;

use super::ValidationError;

/// Identifier of one conversation.
///
/// Opaque to the engine: the transport decides what it contains (usually a
/// chat id). Stable for the conversation's lifetime and never empty.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SessionId(String);

impl SessionId {
    /// Creates a SessionId, rejecting blank values.
    pub fn new(value: impl Into<String>) -> Result<Self, ValidationError> {
        let value = value.into();
        if value.trim().is_empty() {
            return Err(ValidationError::empty_field("session_id"));
        }
        Ok(Self(value))
    }

    /// Returns the raw identifier.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<i64> for SessionId {
    fn from(chat_id: i64) -> Self {
        Self(chat_id.to_string())
    }
}

impl fmt::Display for SessionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for SessionId {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s)
    }
}

/// Unique identifier minted for each confirmed application.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SubmissionId(Uuid);

impl SubmissionId {
    /// Creates a new random SubmissionId.
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for SubmissionId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for SubmissionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for SubmissionId {
    type Err = uuid::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self(Uuid::parse_str(s)?))
    }
}

/// The person talking to the intake, as reported by the transport.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Submitter {
    /// Numeric account id on the chat platform.
    pub id: i64,
    /// Public handle without the leading `@`, if the account has one.
    pub handle: Option<String>,
}

impl Submitter {
    pub fn new(id: i64, handle: Option<String>) -> Self {
        let handle = handle
            .map(|h| h.trim_start_matches('@').to_string())
            .filter(|h| !h.is_empty());
        Self { id, handle }
    }

    /// Creates a submitter without a public handle.
    pub fn anonymous(id: i64) -> Self {
        Self { id, handle: None }
    }
}
