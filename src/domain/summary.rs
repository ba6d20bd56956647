//! Summary builder - renders a finished application for reviewers.
//!
//! The record is rendered once for the pre-confirmation review and once for
//! the gateway; both go through [`SummaryBuilder::render`] so the applicant
//! sees exactly what reviewers will.

use chrono::FixedOffset;
use serde::Serialize;

use crate::domain::catalog::{self, ChoiceOption, LanguageLevel, REGION};
use crate::domain::foundation::{SubmissionId, Submitter, Timestamp};
use crate::domain::questionnaire::{
    registry, AnswerSet, AnswerValue, Attachment, BranchTaken, Field, Session,
};
use crate::domain::validation::DATE_FORMAT;

/// Placeholder for fields the applicant never provided.
pub const MISSING: &str = "N/A";

/// A finalized application.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ApplicationRecord {
    pub submission_id: SubmissionId,
    pub submitter: Submitter,
    pub submitted_at: Timestamp,
    /// Answers on the path actually taken; abandoned detour samples dropped.
    pub answers: AnswerSet,
}

impl ApplicationRecord {
    /// Snapshots a session's answers, discarding samples from detours the
    /// applicant later backed out of.
    pub fn from_session(
        session: &Session,
        submitter: Submitter,
        submitted_at: Timestamp,
        submission_id: SubmissionId,
    ) -> Self {
        let mut answers = session.answers().clone();
        for fork in registry().forks() {
            if session.branch_taken(fork.id) != Some(BranchTaken::Entered) {
                if let Some(field) = registry().definition(fork.detour).and_then(|d| d.field) {
                    answers.remove(field);
                }
            }
        }
        Self {
            submission_id,
            submitter,
            submitted_at,
            answers,
        }
    }

    /// Files to forward, in review order: photo, Russian voice, English
    /// media, IELTS certificate.
    pub fn attachments(&self) -> Vec<Attachment> {
        [
            Field::Photo,
            Field::RussianVoice,
            Field::EnglishMedia,
            Field::IeltsCertificate,
        ]
        .into_iter()
        .filter_map(|field| self.answers.attachment(field).cloned())
        .collect()
    }

    pub fn has_ielts_certificate(&self) -> bool {
        self.answers.attachment(Field::IeltsCertificate).is_some()
    }
}

/// A finished application ready for delivery.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Submission {
    pub record: ApplicationRecord,
    pub summary: String,
    pub attachments: Vec<Attachment>,
}

/// Renders records as the fixed-line reviewer report.
#[derive(Debug, Clone, Copy)]
pub struct SummaryBuilder {
    offset: FixedOffset,
}

impl SummaryBuilder {
    /// `offset` is the reviewers' local time zone.
    pub fn new(offset: FixedOffset) -> Self {
        Self { offset }
    }

    pub fn offset(&self) -> FixedOffset {
        self.offset
    }

    pub fn render(&self, record: &ApplicationRecord) -> String {
        let answers = &record.answers;
        let department = answers.text(Field::Department).unwrap_or_default();

        let lines = [
            "NEW JOB APPLICATION".to_string(),
            String::new(),
            format!("Branch: {}", choice(answers, Field::Branch, &catalog::BRANCHES)),
            format!("Region: {}", REGION),
            format!(
                "Department: {}",
                choice(answers, Field::Department, &catalog::DEPARTMENTS)
            ),
            format!(
                "Position: {}",
                choice(answers, Field::Position, catalog::positions(department))
            ),
            format!("Submitted: {}", record.submitted_at.format_review(self.offset)),
            String::new(),
            "PERSONAL DETAILS".to_string(),
            format!("Full name: {}", full_name(answers)),
            format!("Date of birth: {}", date(answers, Field::DateOfBirth)),
            format!("Address: {}", text(answers, Field::Address)),
            format!("Phone: {}", text(answers, Field::Phone)),
            format!("Student: {}", flag(answers, Field::IsStudent)),
            format!(
                "Education: {}",
                choice(answers, Field::Education, &catalog::EDUCATION_LEVELS)
            ),
            format!("Gender: {}", choice(answers, Field::Gender, &catalog::GENDERS)),
            String::new(),
            "LANGUAGES".to_string(),
            format!("Russian: {}", level(answers, Field::RussianLevel)),
            format!("English: {}", level(answers, Field::EnglishLevel)),
            format!(
                "IELTS: {}",
                if record.has_ielts_certificate() {
                    "Provided"
                } else {
                    MISSING
                }
            ),
            String::new(),
            "EXPERIENCE".to_string(),
            format!(
                "Experience: {}",
                choice(answers, Field::WorkExperience, &catalog::WORK_EXPERIENCE)
            ),
            format!("Last workplace: {}", text(answers, Field::LastWorkplace)),
            format!("Heard about us: {}", text(answers, Field::HearAbout)),
            String::new(),
            format!("Submitter: {}", handle(&record.submitter)),
            format!("ID: {}", record.submitter.id),
        ];
        lines.join("\n")
    }
}

fn text(answers: &AnswerSet, field: Field) -> String {
    match answers.get(field) {
        Some(AnswerValue::Text(s)) | Some(AnswerValue::Phone(s)) if !s.is_empty() => s.clone(),
        _ => MISSING.to_string(),
    }
}

fn choice(answers: &AnswerSet, field: Field, options: &[ChoiceOption]) -> String {
    answers
        .text(field)
        .map(|key| catalog::label_of(options, key).unwrap_or(key).to_string())
        .unwrap_or_else(|| MISSING.to_string())
}

fn level(answers: &AnswerSet, field: Field) -> String {
    answers
        .text(field)
        .and_then(LanguageLevel::from_key)
        .map(|l| l.label().to_string())
        .unwrap_or_else(|| MISSING.to_string())
}

fn date(answers: &AnswerSet, field: Field) -> String {
    match answers.get(field) {
        Some(AnswerValue::Date(d)) => d.format(DATE_FORMAT).to_string(),
        _ => MISSING.to_string(),
    }
}

fn flag(answers: &AnswerSet, field: Field) -> String {
    match answers.get(field) {
        Some(AnswerValue::Flag(true)) => "Yes".to_string(),
        Some(AnswerValue::Flag(false)) => "No".to_string(),
        _ => MISSING.to_string(),
    }
}

fn full_name(answers: &AnswerSet) -> String {
    let parts: Vec<&str> = [Field::PassportName, Field::PassportSurname, Field::FatherName]
        .into_iter()
        .filter_map(|field| answers.text(field))
        .filter(|s| !s.is_empty())
        .collect();
    if parts.is_empty() {
        MISSING.to_string()
    } else {
        parts.join(" ")
    }
}

fn handle(submitter: &Submitter) -> String {
    submitter
        .handle
        .as_ref()
        .map(|h| format!("@{}", h))
        .unwrap_or_else(|| MISSING.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::foundation::{Locale, SessionId};
    use crate::domain::questionnaire::{ForkId, MediaKind};
    use chrono::{DateTime, NaiveDate, Utc};

    fn tashkent() -> FixedOffset {
        FixedOffset::east_opt(5 * 3600).unwrap()
    }

    fn at(rfc3339: &str) -> Timestamp {
        Timestamp::from_datetime(DateTime::parse_from_rfc3339(rfc3339).unwrap().with_timezone(&Utc))
    }

    fn record(answers: AnswerSet, submitter: Submitter) -> ApplicationRecord {
        ApplicationRecord {
            submission_id: SubmissionId::new(),
            submitter,
            submitted_at: at("2024-03-05T08:07:00Z"),
            answers,
        }
    }

    fn full_answers() -> AnswerSet {
        let mut a = AnswerSet::new();
        a.insert(Field::Branch, AnswerValue::Choice("clara".into()));
        a.insert(Field::Department, AnswerValue::Choice("akademik".into()));
        a.insert(Field::Position, AnswerValue::Choice("ielts_instructor".into()));
        a.insert(Field::PassportName, AnswerValue::Text("Ali".into()));
        a.insert(Field::PassportSurname, AnswerValue::Text("Valiyev".into()));
        a.insert(Field::FatherName, AnswerValue::Text("Karimovich".into()));
        a.insert(
            Field::DateOfBirth,
            AnswerValue::Date(NaiveDate::from_ymd_opt(2000, 1, 2).unwrap()),
        );
        a.insert(Field::Address, AnswerValue::Text("Andijon, Navoiy 1".into()));
        a.insert(Field::Phone, AnswerValue::Phone("+998901234567".into()));
        a.insert(Field::IsStudent, AnswerValue::Flag(false));
        a.insert(Field::Education, AnswerValue::Choice("higher".into()));
        a.insert(Field::Gender, AnswerValue::Choice("male".into()));
        a.insert(Field::RussianLevel, AnswerValue::Choice("low".into()));
        a.insert(Field::EnglishLevel, AnswerValue::Choice("low".into()));
        a.insert(Field::IeltsCertificate, AnswerValue::Absent);
        a.insert(Field::WorkExperience, AnswerValue::Choice("one_to_three".into()));
        a.insert(Field::LastWorkplace, AnswerValue::Text("School 5".into()));
        a.insert(
            Field::Photo,
            AnswerValue::File(Attachment::new(MediaKind::Photo, "photo-1")),
        );
        a.insert(Field::HearAbout, AnswerValue::Text("Instagram".into()));
        a
    }

    mod render {
        use super::*;

        #[test]
        fn renders_labels_not_keys() {
            let summary = SummaryBuilder::new(tashkent()).render(&record(
                full_answers(),
                Submitter::new(77, Some("ali".into())),
            ));
            assert!(summary.contains("Branch: Clara"));
            assert!(summary.contains("Region: Andijon"));
            assert!(summary.contains("Department: Akademik bo'lim"));
            assert!(summary.contains("Position: IELTS Instructor"));
            assert!(summary.contains("Education: Oliy"));
            assert!(summary.contains("Russian: Past"));
            assert!(summary.contains("Experience: 1-3 years"));
        }

        #[test]
        fn renders_personal_details() {
            let summary = SummaryBuilder::new(tashkent()).render(&record(
                full_answers(),
                Submitter::new(77, Some("ali".into())),
            ));
            assert!(summary.contains("Full name: Ali Valiyev Karimovich"));
            assert!(summary.contains("Date of birth: 02.01.2000"));
            assert!(summary.contains("Phone: +998901234567"));
            assert!(summary.contains("Student: No"));
            assert!(summary.contains("Submitter: @ali"));
            assert!(summary.contains("ID: 77"));
        }

        #[test]
        fn submission_time_uses_reviewer_offset() {
            let summary = SummaryBuilder::new(tashkent())
                .render(&record(full_answers(), Submitter::anonymous(1)));
            assert!(summary.contains("Submitted: 05.03.2024 13:07"));
        }

        #[test]
        fn skipped_ielts_renders_placeholder() {
            let summary = SummaryBuilder::new(tashkent())
                .render(&record(full_answers(), Submitter::anonymous(1)));
            assert!(summary.contains("IELTS: N/A"));
        }

        #[test]
        fn uploaded_ielts_renders_provided() {
            let mut answers = full_answers();
            answers.insert(
                Field::IeltsCertificate,
                AnswerValue::File(Attachment::new(MediaKind::Document, "cert")),
            );
            let summary =
                SummaryBuilder::new(tashkent()).render(&record(answers, Submitter::anonymous(1)));
            assert!(summary.contains("IELTS: Provided"));
        }

        #[test]
        fn missing_fields_render_placeholder() {
            let summary = SummaryBuilder::new(tashkent())
                .render(&record(AnswerSet::new(), Submitter::anonymous(9)));
            assert!(summary.contains("Branch: N/A"));
            assert!(summary.contains("Full name: N/A"));
            assert!(summary.contains("Date of birth: N/A"));
            assert!(summary.contains("Submitter: N/A"));
            assert!(summary.contains("ID: 9"));
        }

        #[test]
        fn region_line_follows_branch_line() {
            let summary = SummaryBuilder::new(tashkent())
                .render(&record(full_answers(), Submitter::anonymous(1)));
            let lines: Vec<&str> = summary.lines().collect();
            let branch = lines.iter().position(|l| l.starts_with("Branch:")).unwrap();
            assert_eq!(lines[branch + 1], "Region: Andijon");
        }
    }

    mod attachments {
        use super::*;

        fn session_with_samples(russian: BranchTaken, english: BranchTaken) -> Session {
            let mut session = Session::new(SessionId::from(5), Locale::Uz);
            session.record(
                Field::Photo,
                AnswerValue::File(Attachment::new(MediaKind::Photo, "photo")),
            );
            session.record(
                Field::RussianVoice,
                AnswerValue::File(Attachment::new(MediaKind::Voice, "ru")),
            );
            session.record(
                Field::EnglishMedia,
                AnswerValue::File(Attachment::new(MediaKind::Video, "en")),
            );
            session.record(
                Field::IeltsCertificate,
                AnswerValue::File(Attachment::new(MediaKind::Document, "ielts")),
            );
            session.record_fork(ForkId::Russian, russian);
            session.record_fork(ForkId::English, english);
            session
        }

        #[test]
        fn ordered_photo_voice_media_certificate() {
            let session = session_with_samples(BranchTaken::Entered, BranchTaken::Entered);
            let record = ApplicationRecord::from_session(
                &session,
                Submitter::anonymous(1),
                Timestamp::now(),
                SubmissionId::new(),
            );
            let attachments = record.attachments();
            let files: Vec<&str> = attachments.iter().map(|a| a.file.as_str()).collect();
            assert_eq!(files, vec!["photo", "ru", "en", "ielts"]);
        }

        #[test]
        fn samples_from_abandoned_detours_are_dropped() {
            let session = session_with_samples(BranchTaken::Skipped, BranchTaken::Skipped);
            let record = ApplicationRecord::from_session(
                &session,
                Submitter::anonymous(1),
                Timestamp::now(),
                SubmissionId::new(),
            );
            let attachments = record.attachments();
            let files: Vec<&str> = attachments.iter().map(|a| a.file.as_str()).collect();
            assert_eq!(files, vec!["photo", "ielts"]);
            assert!(!record.answers.contains(Field::RussianVoice));
            assert!(!record.answers.contains(Field::EnglishMedia));
        }

        #[test]
        fn english_media_keeps_its_kind() {
            let session = session_with_samples(BranchTaken::Skipped, BranchTaken::Entered);
            let record = ApplicationRecord::from_session(
                &session,
                Submitter::anonymous(1),
                Timestamp::now(),
                SubmissionId::new(),
            );
            let media = record.attachments()[1].clone();
            assert_eq!(media.kind, MediaKind::Video);
        }
    }
}
