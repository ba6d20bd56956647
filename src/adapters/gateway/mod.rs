//! Submission Gateway Adapters
//!
//! - **ConsoleGateway** - Prints submissions to standard output
//! - **RecordingGateway** - Captures submissions in memory (testing)

mod console;
mod recording;

pub use console::ConsoleGateway;
pub use recording::{Delivery, RecordingGateway};
