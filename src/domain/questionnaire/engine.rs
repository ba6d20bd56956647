//! Questionnaire engine - pure transition function over sessions.
//!
//! `decide` takes the current session and one inbound event and returns the
//! next session, the directives to render, and (on confirmation) the
//! finalized submission. It performs no I/O; storage and delivery belong to
//! the application layer.

use chrono::{FixedOffset, Offset, Utc};

use super::answers::{AnswerValue, Attachment, Field, MediaKind};
use super::directive::{Directive, NoticeKey, Rejection};
use super::input::{Command, InboundEvent, Input};
use super::registry::{registry, Back, Forward, InputKind, PromptKey, StepDefinition};
use super::session::{BranchTaken, MenuContext, Session};
use super::step::Step;
use crate::domain::catalog::{self, ChoiceOption, CERTIFICATE_MIME_TYPE};
use crate::domain::foundation::{Locale, SubmissionId, Submitter, Timestamp};
use crate::domain::summary::{ApplicationRecord, Submission, SummaryBuilder};
use crate::domain::validation::{normalize_phone, parse_date, validate_phone};

/// Shortest accepted Russian voice sample, in seconds.
pub const DEFAULT_MIN_VOICE_SECONDS: u32 = 10;

/// Reviewers' local offset (UTC+5).
pub const DEFAULT_REVIEW_OFFSET_SECS: i32 = 5 * 3600;

/// Tunables for the engine.
#[derive(Debug, Clone, Copy)]
pub struct EngineConfig {
    pub min_voice_seconds: u32,
    pub review_offset: FixedOffset,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            min_voice_seconds: DEFAULT_MIN_VOICE_SECONDS,
            review_offset: FixedOffset::east_opt(DEFAULT_REVIEW_OFFSET_SECS)
                .unwrap_or_else(|| Utc.fix()),
        }
    }
}

/// Why a session was cleared.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClearReason {
    Start,
    Cancel,
    LeftPipeline,
    Restart,
}

/// What an event did, for logging and tests.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    Started,
    Advanced { from: Step, to: Step },
    WentBack { from: Step, to: Step },
    Rejected { step: Step, rejection: Rejection },
    Cleared(ClearReason),
    Submitted,
    Menu,
    LocaleChanged(Locale),
}

/// Result of applying one event.
#[derive(Debug, Clone)]
pub struct Decision {
    pub session: Session,
    pub directives: Vec<Directive>,
    pub outcome: Outcome,
    pub submission: Option<Submission>,
}

impl Decision {
    fn new(session: Session, directives: Vec<Directive>, outcome: Outcome) -> Self {
        Self {
            session,
            directives,
            outcome,
            submission: None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Direction {
    Forward,
    Backward,
}

/// Per-event context the engine needs besides the session.
struct Context<'a> {
    submitter: &'a Submitter,
    now: Timestamp,
}

/// Drives sessions through the step registry.
#[derive(Debug, Clone)]
pub struct QuestionnaireEngine {
    config: EngineConfig,
    summary: SummaryBuilder,
}

impl Default for QuestionnaireEngine {
    fn default() -> Self {
        Self::new(EngineConfig::default())
    }
}

impl QuestionnaireEngine {
    pub fn new(config: EngineConfig) -> Self {
        Self {
            config,
            summary: SummaryBuilder::new(config.review_offset),
        }
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Applies one event to a session.
    pub fn decide(&self, session: &Session, event: &InboundEvent, now: Timestamp) -> Decision {
        let next = session.clone();
        let ctx = Context {
            submitter: &event.submitter,
            now,
        };
        match &event.input {
            Input::Command(command) => self.on_command(next, command, &ctx),
            input => match registry().definition(session.step()) {
                Some(definition) => self.on_step_input(next, definition, input, &ctx),
                None => self.on_idle_input(next, input),
            },
        }
    }

    fn on_command(&self, mut session: Session, command: &Command, ctx: &Context) -> Decision {
        match command {
            Command::Start | Command::Restart => {
                session.clear();
                session.set_menu_context(Some(MenuContext::MainMenu));
                Decision::new(
                    session,
                    vec![Directive::notice(NoticeKey::Welcome), main_menu()],
                    Outcome::Cleared(ClearReason::Start),
                )
            }
            Command::Cancel => {
                session.clear();
                session.set_menu_context(Some(MenuContext::MainMenu));
                Decision::new(
                    session,
                    vec![Directive::notice(NoticeKey::Cancelled), main_menu()],
                    Outcome::Cleared(ClearReason::Cancel),
                )
            }
            Command::OpenVacancies => {
                session.clear();
                if session.move_to(Step::first()).is_err() {
                    return self.reject(session, Rejection::UnexpectedInput);
                }
                let mut directives = vec![Directive::notice(NoticeKey::VacancyStart)];
                directives.extend(self.prompt_directives(&session, ctx));
                Decision::new(session, directives, Outcome::Started)
            }
            Command::About | Command::Contacts | Command::Feedback => {
                if !session.is_idle() {
                    return self.reject(session, Rejection::ApplicationInProgress);
                }
                let notice = match command {
                    Command::About => NoticeKey::About,
                    Command::Contacts => NoticeKey::Contacts,
                    _ => NoticeKey::Feedback,
                };
                session.set_menu_context(Some(MenuContext::Info));
                Decision::new(
                    session,
                    vec![
                        Directive::notice(notice),
                        Directive::prompt(PromptKey::MenuBack, vec![]),
                    ],
                    Outcome::Menu,
                )
            }
            Command::ChangeLanguage => {
                if !session.is_idle() {
                    return self.reject(session, Rejection::ApplicationInProgress);
                }
                session.set_menu_context(Some(MenuContext::LanguageMenu));
                Decision::new(
                    session,
                    vec![Directive::prompt(PromptKey::SelectLanguage, locale_options())],
                    Outcome::Menu,
                )
            }
            Command::SelectLocale(code) => match code.parse::<Locale>() {
                Ok(locale) => {
                    session.set_locale(locale);
                    let mut directives = vec![Directive::notice(NoticeKey::LanguageChanged)];
                    if session.is_idle() {
                        session.set_menu_context(Some(MenuContext::MainMenu));
                        directives.push(main_menu());
                    } else {
                        directives.extend(self.prompt_directives(&session, ctx));
                    }
                    Decision::new(session, directives, Outcome::LocaleChanged(locale))
                }
                Err(_) => {
                    let step = session.step();
                    let rejection = Rejection::InvalidSelection;
                    session.reject(rejection);
                    Decision::new(
                        session,
                        vec![Directive::reprompt(
                            PromptKey::SelectLanguage,
                            locale_options(),
                            rejection,
                        )],
                        Outcome::Rejected { step, rejection },
                    )
                }
            },
            Command::MenuBack => {
                if session.is_idle() {
                    session.set_menu_context(Some(MenuContext::MainMenu));
                    Decision::new(session, vec![main_menu()], Outcome::Menu)
                } else {
                    let directives = self.prompt_directives(&session, ctx);
                    Decision::new(session, directives, Outcome::Menu)
                }
            }
        }
    }

    fn on_idle_input(&self, mut session: Session, input: &Input) -> Decision {
        match input {
            Input::Back => {
                session.set_menu_context(Some(MenuContext::MainMenu));
                Decision::new(session, vec![main_menu()], Outcome::Menu)
            }
            _ => self.reject(session, Rejection::UnexpectedInput),
        }
    }

    fn on_step_input(
        &self,
        mut session: Session,
        definition: &StepDefinition,
        input: &Input,
        ctx: &Context,
    ) -> Decision {
        match (input, definition.step) {
            (Input::Back, _) => self.go_back(session, definition, ctx),
            (Input::Skip, _) if definition.optional => {
                if let Some(field) = definition.field {
                    session.record(field, AnswerValue::Absent);
                }
                self.go_forward(session, definition, ctx)
            }
            (_, Step::PhoneConfirmation) => self.confirm_phone(session, definition, input, ctx),
            (_, Step::Confirmation) => match input {
                Input::Choice(key) if key == "yes" => self.submit(session, ctx),
                _ => self.reject(session, Rejection::InvalidSelection),
            },
            _ => match self.accept(definition, input, &session) {
                Ok(value) => {
                    if let Some(field) = definition.field {
                        session.record(field, value);
                    }
                    self.go_forward(session, definition, ctx)
                }
                Err(rejection) => self.reject(session, rejection),
            },
        }
    }

    /// Validates `input` against what the step accepts.
    fn accept(
        &self,
        definition: &StepDefinition,
        input: &Input,
        session: &Session,
    ) -> Result<AnswerValue, Rejection> {
        match definition.input {
            InputKind::FreeText => match input {
                Input::Text(text) if !text.trim().is_empty() => {
                    Ok(AnswerValue::Text(text.trim().to_string()))
                }
                _ => Err(Rejection::RequireText),
            },
            InputKind::Choice(set) => match input {
                Input::Choice(key) if set.contains(session.answers(), key) => {
                    Ok(AnswerValue::Choice(key.clone()))
                }
                _ => Err(Rejection::InvalidSelection),
            },
            InputKind::Date => match input {
                Input::Text(text) => parse_date(text.trim())
                    .map(AnswerValue::Date)
                    .ok_or(Rejection::InvalidDate),
                _ => Err(Rejection::InvalidDate),
            },
            InputKind::Phone => {
                let raw = match input {
                    Input::Text(text) => text,
                    Input::Contact { phone_number } => phone_number,
                    _ => return Err(Rejection::InvalidPhone),
                };
                normalize_phone(raw)
                    .filter(|phone| validate_phone(phone))
                    .map(AnswerValue::Phone)
                    .ok_or(Rejection::InvalidPhone)
            }
            InputKind::YesNo => match input {
                Input::Choice(key) if key == "yes" => Ok(AnswerValue::Flag(true)),
                Input::Choice(key) if key == "no" => Ok(AnswerValue::Flag(false)),
                _ => Err(Rejection::InvalidYesNo),
            },
            InputKind::VoiceSample => match input {
                Input::Voice(media) => {
                    let min_secs = self.config.min_voice_seconds;
                    if media.duration_secs.unwrap_or(0) >= min_secs {
                        Ok(file(MediaKind::Voice, &media.file))
                    } else {
                        Err(Rejection::AudioTooShort { min_secs })
                    }
                }
                _ => Err(Rejection::RequireVoice),
            },
            InputKind::MediaSample => match input {
                Input::Voice(media) => Ok(file(MediaKind::Voice, &media.file)),
                Input::Audio(media) => Ok(file(MediaKind::Audio, &media.file)),
                Input::Video(media) => Ok(file(MediaKind::Video, &media.file)),
                _ => Err(Rejection::RequireMedia),
            },
            InputKind::Certificate => match input {
                Input::Document(document)
                    if document
                        .mime_type
                        .as_deref()
                        .is_some_and(|mime| mime.eq_ignore_ascii_case(CERTIFICATE_MIME_TYPE)) =>
                {
                    Ok(file(MediaKind::Document, &document.file))
                }
                _ => Err(Rejection::RequirePdf),
            },
            InputKind::Photo => match input {
                Input::Photo(media) => Ok(file(MediaKind::Photo, &media.file)),
                _ => Err(Rejection::RequirePhoto),
            },
        }
    }

    /// "yes" re-checks the stored number before moving on; "edit" goes back
    /// to phone entry.
    fn confirm_phone(
        &self,
        mut session: Session,
        definition: &StepDefinition,
        input: &Input,
        ctx: &Context,
    ) -> Decision {
        match input {
            Input::Choice(key) if key == "yes" => {
                let stored_is_valid = session
                    .answers()
                    .text(Field::Phone)
                    .is_some_and(validate_phone);
                if stored_is_valid {
                    session.record(Field::PhoneConfirmed, AnswerValue::Flag(true));
                    self.go_forward(session, definition, ctx)
                } else if session.move_to(Step::PhoneEntry).is_ok() {
                    self.reject(session, Rejection::InvalidPhone)
                } else {
                    self.reject(session, Rejection::UnexpectedInput)
                }
            }
            Input::Choice(key) if key == "edit" => {
                self.goto(session, Step::PhoneEntry, Direction::Backward, ctx)
            }
            _ => self.reject(session, Rejection::InvalidSelection),
        }
    }

    fn go_forward(&self, mut session: Session, definition: &StepDefinition, ctx: &Context) -> Decision {
        match definition.forward {
            Forward::Next(step) => self.goto(session, step, Direction::Forward, ctx),
            Forward::Fork(id) => {
                let Some(fork) = registry().fork(id) else {
                    return self.reject(session, Rejection::UnexpectedInput);
                };
                let (taken, target) = if fork.takes_detour(session.answers()) {
                    (BranchTaken::Entered, fork.detour)
                } else {
                    (BranchTaken::Skipped, fork.rejoin)
                };
                session.record_fork(id, taken);
                self.goto(session, target, Direction::Forward, ctx)
            }
            Forward::Submit => self.submit(session, ctx),
        }
    }

    fn go_back(&self, mut session: Session, definition: &StepDefinition, ctx: &Context) -> Decision {
        match definition.back {
            Back::To(step) => self.goto(session, step, Direction::Backward, ctx),
            Back::AfterFork(id) => {
                let Some(fork) = registry().fork(id) else {
                    return self.reject(session, Rejection::UnexpectedInput);
                };
                let target = match session.branch_taken(id) {
                    Some(BranchTaken::Entered) => fork.detour,
                    _ => fork.origin,
                };
                self.goto(session, target, Direction::Backward, ctx)
            }
            Back::ToMenu => {
                session.clear();
                session.set_menu_context(Some(MenuContext::MainMenu));
                Decision::new(
                    session,
                    vec![main_menu()],
                    Outcome::Cleared(ClearReason::LeftPipeline),
                )
            }
            Back::Restart => {
                session.clear();
                session.set_menu_context(Some(MenuContext::MainMenu));
                Decision::new(
                    session,
                    vec![Directive::notice(NoticeKey::RestartApplication), main_menu()],
                    Outcome::Cleared(ClearReason::Restart),
                )
            }
        }
    }

    fn goto(&self, mut session: Session, target: Step, direction: Direction, ctx: &Context) -> Decision {
        let from = session.step();
        if session.move_to(target).is_err() {
            return self.reject(session, Rejection::UnexpectedInput);
        }
        let directives = self.prompt_directives(&session, ctx);
        let outcome = match direction {
            Direction::Forward => Outcome::Advanced { from, to: target },
            Direction::Backward => Outcome::WentBack { from, to: target },
        };
        Decision::new(session, directives, outcome)
    }

    /// Finalizes the record and clears the session. Delivery is up to the
    /// caller.
    fn submit(&self, mut session: Session, ctx: &Context) -> Decision {
        let record = ApplicationRecord::from_session(
            &session,
            ctx.submitter.clone(),
            ctx.now,
            SubmissionId::new(),
        );
        let summary = self.summary.render(&record);
        let attachments = record.attachments();
        session.clear();
        Decision {
            session,
            directives: Vec::new(),
            outcome: Outcome::Submitted,
            submission: Some(Submission {
                record,
                summary,
                attachments,
            }),
        }
    }

    /// Re-prompts the current step; only the rejection flag changes.
    fn reject(&self, mut session: Session, rejection: Rejection) -> Decision {
        let step = session.step();
        session.reject(rejection);
        let directive = match registry().definition(step) {
            Some(definition) => Directive::reprompt(
                definition.prompt,
                options_for(definition, &session),
                rejection,
            )
            .with_echo(echo_for(definition, &session)),
            None => Directive::reprompt(PromptKey::MainMenu, vec![], rejection),
        };
        Decision::new(session, vec![directive], Outcome::Rejected { step, rejection })
    }

    /// Prompt for the step the session is on. Landing on confirmation shows
    /// the review first.
    fn prompt_directives(&self, session: &Session, ctx: &Context) -> Vec<Directive> {
        let Some(definition) = registry().definition(session.step()) else {
            return vec![main_menu()];
        };
        let mut directives = Vec::with_capacity(2);
        if definition.step == Step::Confirmation {
            let preview = ApplicationRecord::from_session(
                session,
                ctx.submitter.clone(),
                ctx.now,
                SubmissionId::new(),
            );
            directives.push(Directive::Review {
                summary: self.summary.render(&preview),
            });
        }
        directives.push(
            Directive::prompt(definition.prompt, options_for(definition, session))
                .with_echo(echo_for(definition, session)),
        );
        directives
    }
}

fn main_menu() -> Directive {
    Directive::prompt(PromptKey::MainMenu, vec![])
}

fn file(kind: MediaKind, reference: &str) -> AnswerValue {
    AnswerValue::File(Attachment::new(kind, reference))
}

fn options_for(definition: &StepDefinition, session: &Session) -> Vec<ChoiceOption> {
    match definition.input {
        InputKind::Choice(set) => set.options(session.answers()),
        InputKind::YesNo => catalog::YES_NO.to_vec(),
        _ => Vec::new(),
    }
}

/// The stored number is shown back on the phone confirmation prompt.
fn echo_for(definition: &StepDefinition, session: &Session) -> Option<String> {
    match definition.step {
        Step::PhoneConfirmation => session.answers().text(Field::Phone).map(str::to_string),
        _ => None,
    }
}

fn locale_options() -> Vec<ChoiceOption> {
    Locale::ALL
        .iter()
        .map(|locale| ChoiceOption {
            key: locale.code(),
            label: locale.label(),
        })
        .collect()
}
