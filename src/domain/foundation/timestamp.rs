//! Timestamp value object for immutable points in time.

use chrono::{DateTime, FixedOffset, Utc};
use serde::{Deserialize, Serialize};

/// Layout used wherever a timestamp is shown to reviewers.
pub const REVIEW_TIME_FORMAT: &str = "%d.%m.%Y %H:%M";

/// Immutable point in time, always UTC.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Timestamp(DateTime<Utc>);

impl Timestamp {
    /// Creates a timestamp for the current moment.
    pub fn now() -> Self {
        Self(Utc::now())
    }

    /// Creates a timestamp from a DateTime<Utc>.
    pub fn from_datetime(dt: DateTime<Utc>) -> Self {
        Self(dt)
    }

    /// Returns the inner DateTime.
    pub fn as_datetime(&self) -> &DateTime<Utc> {
        &self.0
    }

    /// Renders the timestamp as `DD.MM.YYYY HH:MM` in the given offset.
    pub fn format_review(&self, offset: FixedOffset) -> String {
        self.0.with_timezone(&offset).format(REVIEW_TIME_FORMAT).to_string()
    }
}
