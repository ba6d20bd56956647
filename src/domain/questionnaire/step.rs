//! Steps of the application pipeline.

use serde::{Deserialize, Serialize};

use super::registry::registry;
use crate::domain::foundation::StateMachine;

/// One addressable point in the application pipeline.
///
/// `None` is the idle state outside the pipeline (main menu). Every other
/// variant has exactly one definition in the step registry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum Step {
    #[default]
    None,
    BranchSelect,
    DepartmentSelect,
    PositionSelect,
    PassportName,
    PassportSurname,
    FatherName,
    DateOfBirth,
    Address,
    PhoneEntry,
    PhoneConfirmation,
    IsStudent,
    EducationLevel,
    Gender,
    RussianLevel,
    RussianVoiceSample,
    EnglishLevel,
    EnglishMediaSample,
    IeltsCertificate,
    WorkExperience,
    LastWorkplace,
    Photo,
    HearAboutSource,
    Confirmation,
}

impl Step {
    /// Pipeline steps in canonical order, sub-steps included.
    pub const PIPELINE: [Step; 23] = [
        Step::BranchSelect,
        Step::DepartmentSelect,
        Step::PositionSelect,
        Step::PassportName,
        Step::PassportSurname,
        Step::FatherName,
        Step::DateOfBirth,
        Step::Address,
        Step::PhoneEntry,
        Step::PhoneConfirmation,
        Step::IsStudent,
        Step::EducationLevel,
        Step::Gender,
        Step::RussianLevel,
        Step::RussianVoiceSample,
        Step::EnglishLevel,
        Step::EnglishMediaSample,
        Step::IeltsCertificate,
        Step::WorkExperience,
        Step::LastWorkplace,
        Step::Photo,
        Step::HearAboutSource,
        Step::Confirmation,
    ];

    /// The step a fresh application starts on.
    pub fn first() -> Step {
        Step::BranchSelect
    }

    /// True while an application is being filled in.
    pub fn in_pipeline(&self) -> bool {
        *self != Step::None
    }
}

impl StateMachine for Step {
    /// Forward and back targets from the registry, plus the idle state that
    /// any clearing transition returns to.
    fn valid_transitions(&self) -> Vec<Self> {
        let mut targets = match self {
            Step::None => vec![Step::first()],
            step => registry().targets_of(*step),
        };
        if !targets.contains(&Step::None) {
            targets.push(Step::None);
        }
        targets
    }
}
