//! Application handlers.
//!
//! Command handlers that orchestrate the questionnaire core and its ports.

pub mod intake;

pub use intake::{
    DeliveryStatus, HandleInputCommand, HandleInputHandler, HandleInputResult, IntakeError,
    IntakeSettings,
};
