//! Questionnaire - the application pipeline as a declarative state machine.
//!
//! - `step` - closed set of pipeline steps
//! - `registry` - per-step input, field, forward, and back declarations
//! - `session` - per-applicant state
//! - `engine` - pure `(session, event) -> decision` transition function

mod answers;
mod directive;
mod engine;
mod input;
mod registry;
mod session;
mod step;

pub use answers::{AnswerSet, AnswerValue, Attachment, Field, MediaKind};
pub use directive::{Directive, NoticeKey, Rejection, Reply};
pub use engine::{
    ClearReason, Decision, EngineConfig, Outcome, QuestionnaireEngine,
    DEFAULT_MIN_VOICE_SECONDS, DEFAULT_REVIEW_OFFSET_SECS,
};
pub use input::{Command, DocumentPayload, InboundEvent, Input, MediaPayload};
pub use registry::{
    registry, Back, ChoiceSet, Fork, ForkId, Forward, InputKind, PromptKey, StepDefinition,
    StepRegistry,
};
pub use session::{BranchTaken, ForkTrail, MenuContext, Session};
pub use step::Step;
