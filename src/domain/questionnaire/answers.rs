//! The answer set: typed values collected so far.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Field of the application record a step writes to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Field {
    Branch,
    Department,
    Position,
    PassportName,
    PassportSurname,
    FatherName,
    DateOfBirth,
    Address,
    Phone,
    PhoneConfirmed,
    IsStudent,
    Education,
    Gender,
    RussianLevel,
    RussianVoice,
    EnglishLevel,
    EnglishMedia,
    IeltsCertificate,
    WorkExperience,
    LastWorkplace,
    Photo,
    HearAbout,
}

/// How a file reached the intake.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MediaKind {
    Voice,
    Audio,
    Video,
    Document,
    Photo,
}

/// Opaque reference to a file held by the transport, tagged with its kind.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Attachment {
    pub kind: MediaKind,
    pub file: String,
}

impl Attachment {
    pub fn new(kind: MediaKind, file: impl Into<String>) -> Self {
        Self {
            kind,
            file: file.into(),
        }
    }
}

/// A typed answer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", content = "value", rename_all = "snake_case")]
pub enum AnswerValue {
    Text(String),
    /// Key of the selected catalog option.
    Choice(String),
    Date(NaiveDate),
    /// Canonical `+998XXXXXXXXX` number.
    Phone(String),
    Flag(bool),
    File(Attachment),
    /// An optional step the applicant skipped.
    Absent,
}

impl AnswerValue {
    pub fn as_text(&self) -> Option<&str> {
        match self {
            Self::Text(s) | Self::Choice(s) | Self::Phone(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_attachment(&self) -> Option<&Attachment> {
        match self {
            Self::File(attachment) => Some(attachment),
            _ => None,
        }
    }

    pub fn is_absent(&self) -> bool {
        matches!(self, Self::Absent)
    }
}

/// Field → value mapping for one in-progress application.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AnswerSet(BTreeMap<Field, AnswerValue>);

impl AnswerSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Stores a value, returning the one it replaced.
    pub fn insert(&mut self, field: Field, value: AnswerValue) -> Option<AnswerValue> {
        self.0.insert(field, value)
    }

    pub fn get(&self, field: Field) -> Option<&AnswerValue> {
        self.0.get(&field)
    }

    /// Text, choice key, or phone stored under `field`.
    pub fn text(&self, field: Field) -> Option<&str> {
        self.get(field).and_then(AnswerValue::as_text)
    }

    /// Attachment stored under `field`, ignoring skipped steps.
    pub fn attachment(&self, field: Field) -> Option<&Attachment> {
        self.get(field).and_then(AnswerValue::as_attachment)
    }

    pub fn contains(&self, field: Field) -> bool {
        self.0.contains_key(&field)
    }

    pub fn remove(&mut self, field: Field) -> Option<AnswerValue> {
        self.0.remove(&field)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn clear(&mut self) {
        self.0.clear();
    }

    pub fn iter(&self) -> impl Iterator<Item = (&Field, &AnswerValue)> {
        self.0.iter()
    }
}
