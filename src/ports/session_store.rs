//! Session store port.
//!
//! Sessions live in a store keyed by session identifier with get/insert/
//! delete semantics. The store hands out [`SessionHandle`]s rather than bare
//! sessions: holders of the same handle serialize through its mutex (the
//! insertion algorithm is not idempotent, so concurrent `record_answer`
//! calls against one session must be mutually exclusive), while different
//! sessions proceed independently without contention.
//!
//! The reference implementation is memory-resident; swapping in durable
//! storage only requires another implementation of this port. No expiry
//! policy is defined: sessions are retained until explicit removal or
//! process restart.

use async_trait::async_trait;
use std::sync::Arc;
use tokio::sync::Mutex;

use crate::domain::foundation::{DomainError, SessionId};
use crate::domain::session::Session;

/// Shared, per-session-serialized handle to a stored session.
pub type SessionHandle = Arc<Mutex<Session>>;

/// Port for session persistence with per-key mutual exclusion.
#[async_trait]
pub trait SessionStore: Send + Sync {
    /// Stores a new session and returns its handle.
    ///
    /// # Errors
    ///
    /// - `StorageError` on persistence failure
    async fn insert(&self, session: Session) -> Result<SessionHandle, DomainError>;

    /// Looks up a session by identifier.
    ///
    /// Returns `None` if not found.
    async fn get(&self, id: &SessionId) -> Result<Option<SessionHandle>, DomainError>;

    /// Removes a session. Returns true if it existed.
    ///
    /// # Errors
    ///
    /// - `StorageError` on persistence failure
    async fn remove(&self, id: &SessionId) -> Result<bool, DomainError>;

    /// Returns the number of stored sessions.
    async fn count(&self) -> Result<usize, DomainError>;
}
