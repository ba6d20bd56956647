//! Ports - Interfaces for external dependencies.
//!
//! Following hexagonal architecture, ports define the contracts between
//! the questionnaire core and the outside world. Adapters implement these
//! ports.
//!
//! - `SessionStore` - Per-session exclusive leases over conversation state
//! - `SubmissionGateway` - Delivery of finished applications to reviewers

mod session_store;
mod submission_gateway;

pub use session_store::{SessionLease, SessionStore, SessionStoreError};
pub use submission_gateway::{GatewayError, ReviewChannelId, SubmissionGateway};
