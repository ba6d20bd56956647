//! Parses console lines into abstract inputs.
//!
//! | Line                | Input                          |
//! |---------------------|--------------------------------|
//! | `/start`            | `Command::Start`               |
//! | `/restart`          | `Command::Restart`             |
//! | `/vacancies`        | `Command::OpenVacancies`       |
//! | `/about`            | `Command::About`               |
//! | `/contacts`         | `Command::Contacts`            |
//! | `/feedback`         | `Command::Feedback`            |
//! | `/language`         | `Command::ChangeLanguage`      |
//! | `/lang <code>`      | `Command::SelectLocale`        |
//! | `/menu`             | `Command::MenuBack`            |
//! | `/cancel`           | `Command::Cancel`              |
//! | `back`, `skip`      | `Input::Back`, `Input::Skip`   |
//! | `choice <key>`      | `Input::Choice`                |
//! | `contact <phone>`   | `Input::Contact`               |
//! | `voice <secs>`      | `Input::Voice` with duration   |
//! | `audio`, `video`    | `Input::Audio`, `Input::Video` |
//! | `photo`             | `Input::Photo`                 |
//! | `doc <mime>`        | `Input::Document`              |
//!
//! Anything else is free text. File references are generated from a
//! running counter since the console has no real uploads.

use std::sync::atomic::{AtomicU64, Ordering};

use crate::domain::questionnaire::{Command, DocumentPayload, Input, MediaPayload};

/// Stateful parser; the counter names fake file references.
#[derive(Debug, Default)]
pub struct LineParser {
    files: AtomicU64,
}

impl LineParser {
    pub fn new() -> Self {
        Self::default()
    }

    fn next_file(&self, prefix: &str) -> String {
        let n = self.files.fetch_add(1, Ordering::Relaxed) + 1;
        format!("console-{}-{}", prefix, n)
    }

    /// `None` for blank lines.
    pub fn parse(&self, line: &str) -> Option<Input> {
        let line = line.trim();
        if line.is_empty() {
            return None;
        }
        let (head, rest) = match line.split_once(char::is_whitespace) {
            Some((head, rest)) => (head, rest.trim()),
            None => (line, ""),
        };

        let input = match (head.to_ascii_lowercase().as_str(), rest) {
            ("/start", _) => Input::Command(Command::Start),
            ("/restart", _) => Input::Command(Command::Restart),
            ("/vacancies", _) => Input::Command(Command::OpenVacancies),
            ("/about", _) => Input::Command(Command::About),
            ("/contacts", _) => Input::Command(Command::Contacts),
            ("/feedback", _) => Input::Command(Command::Feedback),
            ("/language", _) => Input::Command(Command::ChangeLanguage),
            ("/lang", code) if !code.is_empty() => {
                Input::Command(Command::SelectLocale(code.to_string()))
            }
            ("/menu", _) => Input::Command(Command::MenuBack),
            ("/cancel", _) => Input::Command(Command::Cancel),
            ("back", "") => Input::Back,
            ("skip", "") => Input::Skip,
            ("choice", key) if !key.is_empty() => Input::choice(key),
            ("contact", phone) if !phone.is_empty() => Input::Contact {
                phone_number: phone.to_string(),
            },
            ("voice", secs) => Input::Voice(MediaPayload {
                file: self.next_file("voice"),
                duration_secs: secs.parse().ok(),
            }),
            ("audio", "") => Input::Audio(MediaPayload::new(self.next_file("audio"))),
            ("video", "") => Input::Video(MediaPayload::new(self.next_file("video"))),
            ("photo", "") => Input::Photo(MediaPayload::new(self.next_file("photo"))),
            ("doc", mime) => Input::Document(DocumentPayload {
                file: self.next_file("doc"),
                mime_type: (!mime.is_empty()).then(|| mime.to_string()),
            }),
            _ => Input::text(line),
        };
        Some(input)
    }
}
