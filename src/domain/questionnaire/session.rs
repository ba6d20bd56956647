//! Session - per-applicant conversational state.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use super::answers::{AnswerSet, AnswerValue, Field};
use super::directive::Rejection;
use super::registry::ForkId;
use super::step::Step;
use crate::domain::foundation::{Locale, SessionId, StateMachine, ValidationError};

/// Which path the applicant took at a fork.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BranchTaken {
    Entered,
    Skipped,
}

/// Fork outcomes recorded while moving forward.
pub type ForkTrail = BTreeMap<ForkId, BranchTaken>;

/// Menu screen the applicant is looking at while idle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MenuContext {
    MainMenu,
    Info,
    LanguageMenu,
}

/// State of one applicant's conversation.
///
/// Fields are mutated only through the engine; readers get accessors.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Session {
    id: SessionId,
    step: Step,
    locale: Locale,
    answers: AnswerSet,
    forks: ForkTrail,
    menu_context: Option<MenuContext>,
    last_rejection: Option<Rejection>,
}

impl Session {
    /// Fresh idle session.
    pub fn new(id: SessionId, locale: Locale) -> Self {
        Self {
            id,
            step: Step::None,
            locale,
            answers: AnswerSet::new(),
            forks: ForkTrail::new(),
            menu_context: None,
            last_rejection: None,
        }
    }

    pub fn id(&self) -> &SessionId {
        &self.id
    }

    pub fn step(&self) -> Step {
        self.step
    }

    pub fn locale(&self) -> Locale {
        self.locale
    }

    pub fn answers(&self) -> &AnswerSet {
        &self.answers
    }

    pub fn forks(&self) -> &ForkTrail {
        &self.forks
    }

    pub fn branch_taken(&self, fork: ForkId) -> Option<BranchTaken> {
        self.forks.get(&fork).copied()
    }

    pub fn menu_context(&self) -> Option<MenuContext> {
        self.menu_context
    }

    pub fn last_rejection(&self) -> Option<Rejection> {
        self.last_rejection
    }

    pub fn is_idle(&self) -> bool {
        !self.step.in_pipeline()
    }

    /// Moves to `target` if the step table allows it.
    pub(crate) fn move_to(&mut self, target: Step) -> Result<(), ValidationError> {
        self.step = self.step.transition_to(target)?;
        self.last_rejection = None;
        Ok(())
    }

    pub(crate) fn record(&mut self, field: Field, value: AnswerValue) {
        self.answers.insert(field, value);
    }

    pub(crate) fn record_fork(&mut self, fork: ForkId, taken: BranchTaken) {
        self.forks.insert(fork, taken);
    }

    pub(crate) fn reject(&mut self, rejection: Rejection) {
        self.last_rejection = Some(rejection);
    }

    pub(crate) fn set_locale(&mut self, locale: Locale) {
        self.locale = locale;
    }

    pub(crate) fn set_menu_context(&mut self, context: Option<MenuContext>) {
        self.menu_context = context;
    }

    /// Drops the application in progress. The locale survives.
    pub(crate) fn clear(&mut self) {
        self.step = Step::None;
        self.answers.clear();
        self.forks.clear();
        self.menu_context = None;
        self.last_rejection = None;
    }
}
