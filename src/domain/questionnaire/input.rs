//! Inbound events, abstracted from any chat transport.

use serde::{Deserialize, Serialize};

use crate::domain::foundation::{SessionId, Submitter};

/// A file the transport received.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MediaPayload {
    /// Transport-owned reference to the file.
    pub file: String,
    /// Length in whole seconds, when the transport knows it.
    #[serde(default)]
    pub duration_secs: Option<u32>,
}

impl MediaPayload {
    pub fn new(file: impl Into<String>) -> Self {
        Self {
            file: file.into(),
            duration_secs: None,
        }
    }

    pub fn with_duration(file: impl Into<String>, duration_secs: u32) -> Self {
        Self {
            file: file.into(),
            duration_secs: Some(duration_secs),
        }
    }
}

/// An uploaded document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DocumentPayload {
    pub file: String,
    pub mime_type: Option<String>,
}

/// Menu-level commands available outside the step pipeline.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "command", content = "arg", rename_all = "snake_case")]
pub enum Command {
    Start,
    Restart,
    OpenVacancies,
    About,
    Contacts,
    Feedback,
    ChangeLanguage,
    /// Locale code chosen from the language menu.
    SelectLocale(String),
    MenuBack,
    Cancel,
}

/// What the applicant sent.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "payload", rename_all = "snake_case")]
pub enum Input {
    Text(String),
    /// Key of a pressed option button.
    Choice(String),
    /// Shared contact card.
    Contact { phone_number: String },
    Voice(MediaPayload),
    Audio(MediaPayload),
    Video(MediaPayload),
    Document(DocumentPayload),
    Photo(MediaPayload),
    Back,
    Skip,
    Command(Command),
}

impl Input {
    pub fn text(text: impl Into<String>) -> Self {
        Self::Text(text.into())
    }

    pub fn choice(key: impl Into<String>) -> Self {
        Self::Choice(key.into())
    }

    /// Short tag for logs.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Text(_) => "text",
            Self::Choice(_) => "choice",
            Self::Contact { .. } => "contact",
            Self::Voice(_) => "voice",
            Self::Audio(_) => "audio",
            Self::Video(_) => "video",
            Self::Document(_) => "document",
            Self::Photo(_) => "photo",
            Self::Back => "back",
            Self::Skip => "skip",
            Self::Command(_) => "command",
        }
    }
}

/// One inbound event for a session.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InboundEvent {
    pub session_id: SessionId,
    pub submitter: Submitter,
    pub input: Input,
}

impl InboundEvent {
    pub fn new(session_id: SessionId, submitter: Submitter, input: Input) -> Self {
        Self {
            session_id,
            submitter,
            input,
        }
    }
}
