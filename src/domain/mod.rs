//! Domain layer containing business logic and domain types.
//!
//! # Module Organization
//!
//! - `foundation` - Shared domain primitives (value objects, IDs, errors)
//! - `validation` - Pure phone and date validators
//! - `catalog` - Fixed choice vocabularies
//! - `questionnaire` - Steps, registry, sessions, and the transition engine
//! - `summary` - Finalized application records and reviewer rendering

pub mod catalog;
pub mod foundation;
pub mod questionnaire;
pub mod summary;
pub mod validation;
