//! In-Memory Session Store Adapter
//!
//! Process-wide session table behind an RwLock. Each stored session is
//! wrapped in its own mutex, so callers that hold the same handle serialize
//! while different sessions proceed without contention.

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::{Mutex, RwLock};

use crate::domain::foundation::{DomainError, SessionId};
use crate::domain::session::Session;
use crate::ports::{SessionHandle, SessionStore};

/// In-memory implementation of the session store.
#[derive(Debug, Clone, Default)]
pub struct InMemorySessionStore {
    sessions: Arc<RwLock<HashMap<SessionId, SessionHandle>>>,
}

impl InMemorySessionStore {
    /// Creates an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Clears all stored sessions (useful for tests).
    pub async fn clear(&self) {
        self.sessions.write().await.clear();
    }
}

#[async_trait]
impl SessionStore for InMemorySessionStore {
    async fn insert(&self, session: Session) -> Result<SessionHandle, DomainError> {
        let id = *session.id();
        let handle: SessionHandle = Arc::new(Mutex::new(session));
        self.sessions.write().await.insert(id, handle.clone());
        Ok(handle)
    }

    async fn get(&self, id: &SessionId) -> Result<Option<SessionHandle>, DomainError> {
        Ok(self.sessions.read().await.get(id).cloned())
    }

    async fn remove(&self, id: &SessionId) -> Result<bool, DomainError> {
        Ok(self.sessions.write().await.remove(id).is_some())
    }

    async fn count(&self) -> Result<usize, DomainError> {
        Ok(self.sessions.read().await.len())
    }
}
