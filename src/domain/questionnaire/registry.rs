//! Step registry - the single declarative table describing the pipeline.
//!
//! Each step declares the input it accepts, the field it writes, where it
//! goes forward, and where back goes. Conditional sub-steps are expressed
//! as forks: a level answer at the origin decides between the detour step
//! and the rejoin step, and the session remembers the outcome so that back
//! from the rejoin step lands on whichever step actually preceded it.

use serde::{Deserialize, Serialize};

use super::answers::{AnswerSet, Field};
use super::step::Step;
use crate::domain::catalog::{self, ChoiceOption, LanguageLevel};

/// Closed set of option lists a choice step can offer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChoiceSet {
    Branches,
    Departments,
    /// Depends on the department already answered.
    Positions,
    EducationLevels,
    Genders,
    LanguageLevels,
    WorkExperience,
    PhoneConfirmation,
    SubmitConfirmation,
}

impl ChoiceSet {
    pub fn options(&self, answers: &AnswerSet) -> Vec<ChoiceOption> {
        match self {
            Self::Branches => catalog::BRANCHES.to_vec(),
            Self::Departments => catalog::DEPARTMENTS.to_vec(),
            Self::Positions => answers
                .text(Field::Department)
                .map(|department| catalog::positions(department).to_vec())
                .unwrap_or_default(),
            Self::EducationLevels => catalog::EDUCATION_LEVELS.to_vec(),
            Self::Genders => catalog::GENDERS.to_vec(),
            Self::LanguageLevels => catalog::LANGUAGE_LEVELS.to_vec(),
            Self::WorkExperience => catalog::WORK_EXPERIENCE.to_vec(),
            Self::PhoneConfirmation => catalog::PHONE_CONFIRMATION.to_vec(),
            Self::SubmitConfirmation => catalog::SUBMIT_CONFIRMATION.to_vec(),
        }
    }

    pub fn contains(&self, answers: &AnswerSet, key: &str) -> bool {
        self.options(answers).iter().any(|o| o.key == key)
    }
}

/// What a step accepts.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputKind {
    /// Any non-empty text.
    FreeText,
    Choice(ChoiceSet),
    /// `DD.MM.YYYY` text.
    Date,
    /// Typed number or shared contact.
    Phone,
    /// Two-way yes/no selection stored as a flag.
    YesNo,
    /// Voice message at least the configured minimum long.
    VoiceSample,
    /// Voice, audio, or video.
    MediaSample,
    /// PDF document.
    Certificate,
    Photo,
}

/// Prompt the transport should render for a step or menu.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PromptKey {
    MainMenu,
    MenuBack,
    SelectLanguage,
    SelectBranch,
    SelectDepartment,
    SelectPosition,
    AskPassportName,
    AskPassportSurname,
    AskFatherName,
    AskDateOfBirth,
    AskAddress,
    AskPhone,
    ConfirmPhone,
    AskIsStudent,
    AskEducation,
    AskGender,
    AskRussianLevel,
    AskRussianVoice,
    AskEnglishLevel,
    AskEnglishMedia,
    AskIeltsCertificate,
    AskWorkExperience,
    AskLastWorkplace,
    AskPhoto,
    AskHearAbout,
    ConfirmSubmission,
}

/// Identifies one conditional sub-step.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ForkId {
    Russian,
    English,
}

/// A conditional detour between two pipeline steps.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Fork {
    pub id: ForkId,
    /// Step whose level answer decides the fork.
    pub origin: Step,
    /// Field the level answer lives in.
    pub level_field: Field,
    /// Sub-step entered when the level requires a sample.
    pub detour: Step,
    /// Step both paths continue at.
    pub rejoin: Step,
}

impl Fork {
    /// True when the recorded level sends the applicant through the detour.
    pub fn takes_detour(&self, answers: &AnswerSet) -> bool {
        answers
            .text(self.level_field)
            .and_then(LanguageLevel::from_key)
            .map(|level| level.requires_sample())
            .unwrap_or(false)
    }
}

/// Forward transition after an accepted answer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Forward {
    Next(Step),
    Fork(ForkId),
    /// Finalize and hand the record to the gateway.
    Submit,
}

/// Where back goes from a step.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Back {
    To(Step),
    /// Detour or origin of the fork, whichever the applicant came through.
    AfterFork(ForkId),
    /// Leave the pipeline for the main menu.
    ToMenu,
    /// Discard the application and tell the applicant to start over.
    Restart,
}

/// Declarative definition of one step.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StepDefinition {
    pub step: Step,
    pub input: InputKind,
    /// Field written on acceptance; `None` for the confirmation step.
    pub field: Option<Field>,
    pub prompt: PromptKey,
    /// Whether `Skip` is accepted, recording the field as absent.
    pub optional: bool,
    pub forward: Forward,
    pub back: Back,
}

const fn def(
    step: Step,
    input: InputKind,
    field: Option<Field>,
    prompt: PromptKey,
    forward: Forward,
    back: Back,
) -> StepDefinition {
    StepDefinition {
        step,
        input,
        field,
        prompt,
        optional: false,
        forward,
        back,
    }
}

const fn optional(definition: StepDefinition) -> StepDefinition {
    StepDefinition {
        optional: true,
        ..definition
    }
}

static FORKS: [Fork; 2] = [
    Fork {
        id: ForkId::Russian,
        origin: Step::RussianLevel,
        level_field: Field::RussianLevel,
        detour: Step::RussianVoiceSample,
        rejoin: Step::EnglishLevel,
    },
    Fork {
        id: ForkId::English,
        origin: Step::EnglishLevel,
        level_field: Field::EnglishLevel,
        detour: Step::EnglishMediaSample,
        rejoin: Step::IeltsCertificate,
    },
];

static STEPS: [StepDefinition; 23] = [
    def(
        Step::BranchSelect,
        InputKind::Choice(ChoiceSet::Branches),
        Some(Field::Branch),
        PromptKey::SelectBranch,
        Forward::Next(Step::DepartmentSelect),
        Back::ToMenu,
    ),
    def(
        Step::DepartmentSelect,
        InputKind::Choice(ChoiceSet::Departments),
        Some(Field::Department),
        PromptKey::SelectDepartment,
        Forward::Next(Step::PositionSelect),
        Back::To(Step::BranchSelect),
    ),
    def(
        Step::PositionSelect,
        InputKind::Choice(ChoiceSet::Positions),
        Some(Field::Position),
        PromptKey::SelectPosition,
        Forward::Next(Step::PassportName),
        Back::To(Step::DepartmentSelect),
    ),
    def(
        Step::PassportName,
        InputKind::FreeText,
        Some(Field::PassportName),
        PromptKey::AskPassportName,
        Forward::Next(Step::PassportSurname),
        Back::To(Step::PositionSelect),
    ),
    def(
        Step::PassportSurname,
        InputKind::FreeText,
        Some(Field::PassportSurname),
        PromptKey::AskPassportSurname,
        Forward::Next(Step::FatherName),
        Back::To(Step::PassportName),
    ),
    def(
        Step::FatherName,
        InputKind::FreeText,
        Some(Field::FatherName),
        PromptKey::AskFatherName,
        Forward::Next(Step::DateOfBirth),
        Back::To(Step::PassportSurname),
    ),
    def(
        Step::DateOfBirth,
        InputKind::Date,
        Some(Field::DateOfBirth),
        PromptKey::AskDateOfBirth,
        Forward::Next(Step::Address),
        Back::To(Step::FatherName),
    ),
    def(
        Step::Address,
        InputKind::FreeText,
        Some(Field::Address),
        PromptKey::AskAddress,
        Forward::Next(Step::PhoneEntry),
        Back::To(Step::DateOfBirth),
    ),
    def(
        Step::PhoneEntry,
        InputKind::Phone,
        Some(Field::Phone),
        PromptKey::AskPhone,
        Forward::Next(Step::PhoneConfirmation),
        Back::To(Step::Address),
    ),
    def(
        Step::PhoneConfirmation,
        InputKind::Choice(ChoiceSet::PhoneConfirmation),
        Some(Field::PhoneConfirmed),
        PromptKey::ConfirmPhone,
        Forward::Next(Step::IsStudent),
        Back::To(Step::PhoneEntry),
    ),
    def(
        Step::IsStudent,
        InputKind::YesNo,
        Some(Field::IsStudent),
        PromptKey::AskIsStudent,
        Forward::Next(Step::EducationLevel),
        Back::To(Step::PhoneConfirmation),
    ),
    def(
        Step::EducationLevel,
        InputKind::Choice(ChoiceSet::EducationLevels),
        Some(Field::Education),
        PromptKey::AskEducation,
        Forward::Next(Step::Gender),
        Back::To(Step::IsStudent),
    ),
    def(
        Step::Gender,
        InputKind::Choice(ChoiceSet::Genders),
        Some(Field::Gender),
        PromptKey::AskGender,
        Forward::Next(Step::RussianLevel),
        Back::To(Step::EducationLevel),
    ),
    def(
        Step::RussianLevel,
        InputKind::Choice(ChoiceSet::LanguageLevels),
        Some(Field::RussianLevel),
        PromptKey::AskRussianLevel,
        Forward::Fork(ForkId::Russian),
        Back::To(Step::Gender),
    ),
    def(
        Step::RussianVoiceSample,
        InputKind::VoiceSample,
        Some(Field::RussianVoice),
        PromptKey::AskRussianVoice,
        Forward::Next(Step::EnglishLevel),
        Back::To(Step::RussianLevel),
    ),
    def(
        Step::EnglishLevel,
        InputKind::Choice(ChoiceSet::LanguageLevels),
        Some(Field::EnglishLevel),
        PromptKey::AskEnglishLevel,
        Forward::Fork(ForkId::English),
        Back::AfterFork(ForkId::Russian),
    ),
    optional(def(
        Step::EnglishMediaSample,
        InputKind::MediaSample,
        Some(Field::EnglishMedia),
        PromptKey::AskEnglishMedia,
        Forward::Next(Step::IeltsCertificate),
        Back::To(Step::EnglishLevel),
    )),
    optional(def(
        Step::IeltsCertificate,
        InputKind::Certificate,
        Some(Field::IeltsCertificate),
        PromptKey::AskIeltsCertificate,
        Forward::Next(Step::WorkExperience),
        Back::AfterFork(ForkId::English),
    )),
    def(
        Step::WorkExperience,
        InputKind::Choice(ChoiceSet::WorkExperience),
        Some(Field::WorkExperience),
        PromptKey::AskWorkExperience,
        Forward::Next(Step::LastWorkplace),
        Back::To(Step::IeltsCertificate),
    ),
    def(
        Step::LastWorkplace,
        InputKind::FreeText,
        Some(Field::LastWorkplace),
        PromptKey::AskLastWorkplace,
        Forward::Next(Step::Photo),
        Back::To(Step::WorkExperience),
    ),
    def(
        Step::Photo,
        InputKind::Photo,
        Some(Field::Photo),
        PromptKey::AskPhoto,
        Forward::Next(Step::HearAboutSource),
        Back::To(Step::LastWorkplace),
    ),
    def(
        Step::HearAboutSource,
        InputKind::FreeText,
        Some(Field::HearAbout),
        PromptKey::AskHearAbout,
        Forward::Next(Step::Confirmation),
        Back::To(Step::Photo),
    ),
    def(
        Step::Confirmation,
        InputKind::Choice(ChoiceSet::SubmitConfirmation),
        None,
        PromptKey::ConfirmSubmission,
        Forward::Submit,
        Back::Restart,
    ),
];

/// Lookup over the static step and fork tables.
#[derive(Debug)]
pub struct StepRegistry {
    steps: &'static [StepDefinition],
    forks: &'static [Fork],
}

static REGISTRY: StepRegistry = StepRegistry {
    steps: &STEPS,
    forks: &FORKS,
};

/// The pipeline registry.
pub fn registry() -> &'static StepRegistry {
    &REGISTRY
}

impl StepRegistry {
    /// Definition for a pipeline step; `None` for the idle state.
    pub fn definition(&self, step: Step) -> Option<&'static StepDefinition> {
        self.steps.iter().find(|d| d.step == step)
    }

    pub fn fork(&self, id: ForkId) -> Option<&'static Fork> {
        self.forks.iter().find(|f| f.id == id)
    }

    pub fn steps(&self) -> &'static [StepDefinition] {
        self.steps
    }

    pub fn forks(&self) -> &'static [Fork] {
        self.forks
    }

    /// Prompt shown when the applicant lands on `step`.
    pub fn prompt_for(&self, step: Step) -> PromptKey {
        self.definition(step)
            .map(|d| d.prompt)
            .unwrap_or(PromptKey::MainMenu)
    }

    /// Every step directly reachable from `step` by a forward or back move.
    pub fn targets_of(&self, step: Step) -> Vec<Step> {
        let Some(definition) = self.definition(step) else {
            return Vec::new();
        };
        let mut targets = Vec::new();
        match definition.forward {
            Forward::Next(next) => targets.push(next),
            Forward::Fork(id) => {
                if let Some(fork) = self.fork(id) {
                    targets.push(fork.detour);
                    targets.push(fork.rejoin);
                }
            }
            Forward::Submit => targets.push(Step::None),
        }
        match definition.back {
            Back::To(previous) => targets.push(previous),
            Back::AfterFork(id) => {
                if let Some(fork) = self.fork(id) {
                    targets.push(fork.detour);
                    targets.push(fork.origin);
                }
            }
            Back::ToMenu | Back::Restart => targets.push(Step::None),
        }
        targets
    }
}
