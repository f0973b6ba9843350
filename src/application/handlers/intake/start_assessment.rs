//! StartAssessmentHandler - Command handler for starting intake sessions.

use std::sync::Arc;

use crate::domain::catalog::{Question, QuestionCatalog};
use crate::domain::foundation::{AssessmentStatus, SessionId};
use crate::domain::intake::IntakeEngine;
use crate::domain::session::{ProfileHints, SessionError};
use crate::ports::SessionStore;

/// Command to start a new assessment session.
#[derive(Debug, Clone, Default)]
pub struct StartAssessmentCommand {
    /// Answers already known from a stored profile, if any.
    pub profile: Option<ProfileHints>,
}

/// Result of a successful session start.
#[derive(Debug, Clone)]
pub struct StartAssessmentResult {
    pub session_id: SessionId,
    /// The first question to ask.
    pub first_question: Option<Question>,
    /// Length of the effective sequence at start. Symptom follow-ups and
    /// conditional insertions grow this during the conversation.
    pub estimated_question_count: usize,
    pub status: AssessmentStatus,
}

/// Handler for starting sessions.
pub struct StartAssessmentHandler {
    engine: IntakeEngine,
    store: Arc<dyn SessionStore>,
}

impl StartAssessmentHandler {
    pub fn new(catalog: Arc<QuestionCatalog>, store: Arc<dyn SessionStore>) -> Self {
        Self {
            engine: IntakeEngine::new(catalog),
            store,
        }
    }

    pub async fn handle(
        &self,
        cmd: StartAssessmentCommand,
    ) -> Result<StartAssessmentResult, SessionError> {
        let session = self.engine.start(cmd.profile.as_ref());

        let result = StartAssessmentResult {
            session_id: *session.id(),
            first_question: self.engine.pending_question(&session),
            estimated_question_count: session.effective_len(),
            status: session.status(),
        };

        self.store.insert(session).await?;

        Ok(result)
    }
}
