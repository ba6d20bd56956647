//! Adapters - Implementations of port interfaces.
//!
//! Adapters connect the questionnaire core to external systems:
//! - `storage` - Session store implementations (in-memory)
//! - `gateway` - Submission delivery (console, recording)
//! - `console` - Line-based input parsing for the local driver

pub mod console;
pub mod gateway;
pub mod storage;

pub use console::LineParser;
pub use gateway::{ConsoleGateway, Delivery, RecordingGateway};
pub use storage::InMemorySessionStore;
