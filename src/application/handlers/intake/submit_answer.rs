//! SubmitAnswerHandler - Command handler for recording answers.

use std::sync::Arc;

use crate::domain::catalog::{Question, QuestionCatalog};
use crate::domain::foundation::{QuestionId, SessionId};
use crate::domain::intake::{Advance, IntakeEngine};
use crate::domain::session::{AnswerValue, SessionError};
use crate::ports::SessionStore;

/// Command to record an answer for the currently pending question.
#[derive(Debug, Clone)]
pub struct SubmitAnswerCommand {
    pub session_id: SessionId,
    pub question_id: QuestionId,
    pub value: AnswerValue,
}

/// Result of a recorded answer.
#[derive(Debug, Clone, PartialEq)]
pub enum SubmitAnswerResult {
    /// The conversation continues with this question.
    NextQuestion(Question),
    /// The effective sequence is exhausted; the session completed.
    Completed,
}

/// Handler for answer submission.
///
/// Mutations run under the session handle's mutex, so concurrent
/// submissions against the same session serialize while different sessions
/// proceed independently.
pub struct SubmitAnswerHandler {
    engine: IntakeEngine,
    store: Arc<dyn SessionStore>,
}

impl SubmitAnswerHandler {
    pub fn new(catalog: Arc<QuestionCatalog>, store: Arc<dyn SessionStore>) -> Self {
        Self {
            engine: IntakeEngine::new(catalog),
            store,
        }
    }

    pub async fn handle(&self, cmd: SubmitAnswerCommand) -> Result<SubmitAnswerResult, SessionError> {
        let handle = self
            .store
            .get(&cmd.session_id)
            .await?
            .ok_or_else(|| SessionError::not_found(cmd.session_id))?;

        let mut session = handle.lock().await;
        match self
            .engine
            .record_answer(&mut session, &cmd.question_id, cmd.value)?
        {
            Advance::Next(question) => Ok(SubmitAnswerResult::NextQuestion(question)),
            Advance::Completed => Ok(SubmitAnswerResult::Completed),
        }
    }
}
