//! EndAssessmentHandler - Command handler for ending sessions.
//!
//! Removes the session from the store entirely. Sessions are otherwise
//! retained until process restart; there is no expiry policy.

use std::sync::Arc;

use tracing::info;

use crate::domain::foundation::SessionId;
use crate::domain::session::SessionError;
use crate::ports::SessionStore;

/// Command to end (hard-delete) a session.
#[derive(Debug, Clone)]
pub struct EndAssessmentCommand {
    pub session_id: SessionId,
}

/// Handler for ending sessions.
pub struct EndAssessmentHandler {
    store: Arc<dyn SessionStore>,
}

impl EndAssessmentHandler {
    pub fn new(store: Arc<dyn SessionStore>) -> Self {
        Self { store }
    }

    pub async fn handle(&self, cmd: EndAssessmentCommand) -> Result<(), SessionError> {
        let removed = self.store.remove(&cmd.session_id).await?;
        if !removed {
            return Err(SessionError::not_found(cmd.session_id));
        }
        info!(session = %cmd.session_id, "assessment session ended");
        Ok(())
    }
}
