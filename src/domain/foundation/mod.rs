//! Foundation module - Shared domain primitives.
//!
//! Contains value objects, identifiers, and error types that form the
//! vocabulary of the intake domain.

mod errors;
mod ids;
mod locale;
mod state_machine;
mod timestamp;

pub use errors::ValidationError;
pub use ids::{SessionId, SubmissionId, Submitter};
pub use locale::Locale;
pub use state_machine::StateMachine;
pub use timestamp::{Timestamp, REVIEW_TIME_FORMAT};
