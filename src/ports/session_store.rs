//! Session Store Port - Interface for per-applicant session state.
//!
//! Sessions are handed out as exclusive leases: while a caller holds the
//! lease for a session id, no other event for that id can be applied.
//! Leases for different ids never block each other.

use async_trait::async_trait;
use tokio::sync::OwnedMutexGuard;

use crate::domain::foundation::{Locale, SessionId};
use crate::domain::questionnaire::Session;

/// Exclusive, mutable access to one session. Released on drop.
pub type SessionLease = OwnedMutexGuard<Session>;

/// Errors that can occur during session store operations
#[derive(Debug, thiserror::Error)]
pub enum SessionStoreError {
    #[error("Session store unavailable: {0}")]
    Unavailable(String),
}

/// Port for leasing and inspecting sessions
#[async_trait]
pub trait SessionStore: Send + Sync {
    /// Lease a session for exclusive use, creating an idle one with
    /// `default_locale` if the id has never been seen.
    ///
    /// # Errors
    /// Returns `SessionStoreError` if the store cannot be reached
    async fn lease(
        &self,
        id: &SessionId,
        default_locale: Locale,
    ) -> Result<SessionLease, SessionStoreError>;

    /// Copy of the current session, if one exists.
    ///
    /// Waits for any outstanding lease on the same id.
    async fn snapshot(&self, id: &SessionId) -> Result<Option<Session>, SessionStoreError>;

    /// Number of sessions held.
    async fn count(&self) -> Result<usize, SessionStoreError>;
}
