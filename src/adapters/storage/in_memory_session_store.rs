//! In-Memory Session Store Adapter
//!
//! Keeps sessions in process memory. Each session sits behind its own
//! mutex so that events for one applicant are applied strictly one at a
//! time while other applicants proceed in parallel.

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::{Mutex, RwLock};

use crate::domain::foundation::{Locale, SessionId};
use crate::domain::questionnaire::Session;
use crate::ports::{SessionLease, SessionStore, SessionStoreError};

type SessionSlot = Arc<Mutex<Session>>;

/// In-memory storage for sessions
#[derive(Debug, Clone, Default)]
pub struct InMemorySessionStore {
    sessions: Arc<RwLock<HashMap<SessionId, SessionSlot>>>,
}

impl InMemorySessionStore {
    /// Create a new in-memory store
    pub fn new() -> Self {
        Self::default()
    }

    /// Drop every session (useful for tests)
    pub async fn clear(&self) {
        self.sessions.write().await.clear();
    }

    /// Slot for `id`, inserting a fresh idle session on first use.
    async fn slot(&self, id: &SessionId, default_locale: Locale) -> SessionSlot {
        if let Some(slot) = self.sessions.read().await.get(id) {
            return Arc::clone(slot);
        }
        let mut sessions = self.sessions.write().await;
        let slot = sessions.entry(id.clone()).or_insert_with(|| {
            tracing::debug!(session_id = %id, locale = %default_locale, "Creating session");
            Arc::new(Mutex::new(Session::new(id.clone(), default_locale)))
        });
        Arc::clone(slot)
    }
}

#[async_trait]
impl SessionStore for InMemorySessionStore {
    async fn lease(
        &self,
        id: &SessionId,
        default_locale: Locale,
    ) -> Result<SessionLease, SessionStoreError> {
        let slot = self.slot(id, default_locale).await;
        Ok(slot.lock_owned().await)
    }

    async fn snapshot(&self, id: &SessionId) -> Result<Option<Session>, SessionStoreError> {
        let slot = self.sessions.read().await.get(id).map(Arc::clone);
        match slot {
            Some(slot) => Ok(Some(slot.lock().await.clone())),
            None => Ok(None),
        }
    }

    async fn count(&self) -> Result<usize, SessionStoreError> {
        Ok(self.sessions.read().await.len())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::questionnaire::Step;
    use std::time::Duration;

    fn id(n: i64) -> SessionId {
        SessionId::from(n)
    }

    #[tokio::test]
    async fn lease_creates_idle_session_with_default_locale() {
        let store = InMemorySessionStore::new();
        let lease = store.lease(&id(1), Locale::Ru).await.unwrap();
        assert_eq!(lease.step(), Step::None);
        assert_eq!(lease.locale(), Locale::Ru);
        drop(lease);
        assert_eq!(store.count().await.unwrap(), 1);
    }

    #[tokio::test]
    async fn default_locale_only_applies_on_creation() {
        let store = InMemorySessionStore::new();
        drop(store.lease(&id(1), Locale::En).await.unwrap());
        let lease = store.lease(&id(1), Locale::Uz).await.unwrap();
        assert_eq!(lease.locale(), Locale::En);
    }

    #[tokio::test]
    async fn snapshot_of_unknown_session_is_none() {
        let store = InMemorySessionStore::new();
        assert!(store.snapshot(&id(9)).await.unwrap().is_none());
        assert_eq!(store.count().await.unwrap(), 0);
    }

    #[tokio::test]
    async fn lease_is_exclusive_per_session() {
        let store = InMemorySessionStore::new();
        let first = store.lease(&id(1), Locale::Uz).await.unwrap();

        let contender = store.clone();
        let waiting = tokio::spawn(async move { contender.lease(&id(1), Locale::Uz).await.map(|_| ()) });

        tokio::time::sleep(Duration::from_millis(20)).await;
        assert!(!waiting.is_finished());

        drop(first);
        tokio::time::timeout(Duration::from_secs(1), waiting)
            .await
            .expect("second lease should be granted after release")
            .unwrap()
            .unwrap();
    }

    #[tokio::test]
    async fn different_sessions_do_not_block() {
        let store = InMemorySessionStore::new();
        let _first = store.lease(&id(1), Locale::Uz).await.unwrap();
        let second = tokio::time::timeout(Duration::from_secs(1), store.lease(&id(2), Locale::Uz))
            .await
            .expect("other session should not wait");
        assert!(second.is_ok());
    }

    #[tokio::test]
    async fn clear_removes_all_sessions() {
        let store = InMemorySessionStore::new();
        drop(store.lease(&id(1), Locale::Uz).await.unwrap());
        drop(store.lease(&id(2), Locale::Uz).await.unwrap());
        store.clear().await;
        assert_eq!(store.count().await.unwrap(), 0);
    }
}
