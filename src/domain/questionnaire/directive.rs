//! Outbound directives: what the transport should show next.

use serde::{Deserialize, Serialize};

use super::registry::PromptKey;
use crate::domain::catalog::ChoiceOption;
use crate::domain::foundation::{Locale, SessionId};

/// Why an answer was not accepted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, thiserror::Error)]
#[serde(tag = "reason", rename_all = "snake_case")]
pub enum Rejection {
    #[error("selection is not one of the offered options")]
    InvalidSelection,
    #[error("text answer is required")]
    RequireText,
    #[error("date must be written as DD.MM.YYYY")]
    InvalidDate,
    #[error("phone number is not a valid Uzbek mobile number")]
    InvalidPhone,
    #[error("answer must be yes or no")]
    InvalidYesNo,
    #[error("voice sample shorter than {min_secs} seconds")]
    AudioTooShort { min_secs: u32 },
    #[error("a voice message is required")]
    RequireVoice,
    #[error("a voice, audio, or video message is required")]
    RequireMedia,
    #[error("a PDF document is required")]
    RequirePdf,
    #[error("a photo is required")]
    RequirePhoto,
    #[error("input not expected here")]
    UnexpectedInput,
    #[error("an application is in progress")]
    ApplicationInProgress,
}

/// Informational message keys.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum NoticeKey {
    Welcome,
    VacancyStart,
    About,
    Contacts,
    Feedback,
    LanguageChanged,
    Cancelled,
    RestartApplication,
    ApplicationSubmitted,
    ThankYou,
    SubmissionFailed,
    SubmissionUnavailable,
}

/// One thing the transport should render.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Directive {
    Prompt {
        key: PromptKey,
        #[serde(skip_serializing_if = "Vec::is_empty")]
        options: Vec<ChoiceOption>,
        #[serde(skip_serializing_if = "Option::is_none")]
        rejected: Option<Rejection>,
        /// Previously captured value the applicant is asked to confirm.
        #[serde(skip_serializing_if = "Option::is_none")]
        echo: Option<String>,
    },
    Notice {
        key: NoticeKey,
    },
    /// Rendered summary shown before the final confirmation.
    Review {
        summary: String,
    },
}

impl Directive {
    pub fn prompt(key: PromptKey, options: Vec<ChoiceOption>) -> Self {
        Self::Prompt {
            key,
            options,
            rejected: None,
            echo: None,
        }
    }

    pub fn reprompt(key: PromptKey, options: Vec<ChoiceOption>, rejection: Rejection) -> Self {
        Self::Prompt {
            key,
            options,
            rejected: Some(rejection),
            echo: None,
        }
    }

    /// Attaches a value to a prompt; other directives are returned unchanged.
    pub fn with_echo(self, value: Option<String>) -> Self {
        match self {
            Self::Prompt {
                key,
                options,
                rejected,
                ..
            } => Self::Prompt {
                key,
                options,
                rejected,
                echo: value,
            },
            other => other,
        }
    }

    pub fn echo(&self) -> Option<&str> {
        match self {
            Self::Prompt { echo, .. } => echo.as_deref(),
            _ => None,
        }
    }

    pub fn notice(key: NoticeKey) -> Self {
        Self::Notice { key }
    }

    pub fn prompt_key(&self) -> Option<PromptKey> {
        match self {
            Self::Prompt { key, .. } => Some(*key),
            _ => None,
        }
    }

    pub fn rejection(&self) -> Option<Rejection> {
        match self {
            Self::Prompt { rejected, .. } => *rejected,
            _ => None,
        }
    }
}

/// Directives for one session in response to one event.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Reply {
    pub session_id: SessionId,
    pub locale: Locale,
    pub directives: Vec<Directive>,
}

impl Reply {
    /// The last prompt in the reply, which is what the applicant answers next.
    pub fn prompt(&self) -> Option<PromptKey> {
        self.directives.iter().rev().find_map(Directive::prompt_key)
    }

    pub fn rejection(&self) -> Option<Rejection> {
        self.directives.iter().find_map(Directive::rejection)
    }

    pub fn has_notice(&self, key: NoticeKey) -> bool {
        self.directives
            .iter()
            .any(|d| matches!(d, Directive::Notice { key: k } if *k == key))
    }

    pub fn review(&self) -> Option<&str> {
        self.directives.iter().find_map(|d| match d {
            Directive::Review { summary } => Some(summary.as_str()),
            _ => None,
        })
    }
}
