//! Intake handlers.

mod handle_input;

pub use handle_input::{
    DeliveryStatus, HandleInputCommand, HandleInputHandler, HandleInputResult, IntakeError,
    IntakeSettings,
};
