//! State machine trait for step-like enums.
//!
//! Gives every closed set of states the same guarded transition API, so a
//! caller can never move a session onto a state the table does not allow.

use super::ValidationError;

/// Trait for enums that represent state machines.
///
/// Implementors list their legal targets; `transition_to` and `is_terminal`
/// come for free.
///
/// # Example
///
/// ```ignore
/// impl StateMachine for Step {
///     fn valid_transitions(&self) -> Vec<Self> {
///         registry().targets_of(*self)
///     }
/// }
///
/// let next = Step::Address.transition_to(Step::PhoneEntry)?;
/// ```
pub trait StateMachine: Sized + Copy + PartialEq + std::fmt::Debug {
    /// Returns all valid target states from current state.
    fn valid_transitions(&self) -> Vec<Self>;

    /// Returns true if transition from self to target is valid.
    fn can_transition_to(&self, target: &Self) -> bool {
        self.valid_transitions().contains(target)
    }

    /// Performs transition with validation, returning error if invalid.
    fn transition_to(&self, target: Self) -> Result<Self, ValidationError> {
        if self.can_transition_to(&target) {
            Ok(target)
        } else {
            Err(ValidationError::invalid_format(
                "state_transition",
                format!("Cannot transition from {:?} to {:?}", self, target),
            ))
        }
    }

    /// Checks if current state is terminal (no valid outgoing transitions).
    fn is_terminal(&self) -> bool {
        self.valid_transitions().is_empty()
    }
}
