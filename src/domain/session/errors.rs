//! Session-specific error types.

use crate::domain::foundation::{DomainError, ErrorCode, QuestionId, SessionId};

/// Session-specific errors.
///
/// Every variant is reported synchronously and leaves the session state
/// unchanged (no partial insertion, no partial answer record).
#[derive(Debug, Clone, PartialEq)]
pub enum SessionError {
    /// Session was not found in the store.
    NotFound(SessionId),
    /// An answer was submitted for a question other than the pending one.
    OutOfOrder {
        expected: Option<QuestionId>,
        got: QuestionId,
    },
    /// The answer value failed the question's type/option constraints.
    InvalidAnswer {
        question: QuestionId,
        reason: String,
    },
    /// The session has already completed; no further answers are accepted.
    AlreadyCompleted,
    /// The session has not completed; report assembly is not possible yet.
    NotCompleted,
    /// Infrastructure error from the session store.
    Storage(String),
}

impl SessionError {
    pub fn not_found(id: SessionId) -> Self {
        SessionError::NotFound(id)
    }

    pub fn out_of_order(expected: Option<QuestionId>, got: QuestionId) -> Self {
        SessionError::OutOfOrder { expected, got }
    }

    pub fn invalid_answer(question: QuestionId, reason: impl Into<String>) -> Self {
        SessionError::InvalidAnswer {
            question,
            reason: reason.into(),
        }
    }

    pub fn already_completed() -> Self {
        SessionError::AlreadyCompleted
    }

    pub fn not_completed() -> Self {
        SessionError::NotCompleted
    }

    pub fn storage(message: impl Into<String>) -> Self {
        SessionError::Storage(message.into())
    }

    pub fn code(&self) -> ErrorCode {
        match self {
            SessionError::NotFound(_) => ErrorCode::SessionNotFound,
            SessionError::OutOfOrder { .. } => ErrorCode::OutOfOrderAnswer,
            SessionError::InvalidAnswer { .. } => ErrorCode::InvalidAnswerValue,
            SessionError::AlreadyCompleted => ErrorCode::SessionAlreadyCompleted,
            SessionError::NotCompleted => ErrorCode::SessionNotCompleted,
            SessionError::Storage(_) => ErrorCode::StorageError,
        }
    }

    pub fn message(&self) -> String {
        match self {
            SessionError::NotFound(id) => format!("Session not found: {}", id),
            SessionError::OutOfOrder { expected, got } => match expected {
                Some(expected) => format!(
                    "Answer for '{}' rejected: the pending question is '{}'",
                    got, expected
                ),
                None => format!("Answer for '{}' rejected: no question is pending", got),
            },
            SessionError::InvalidAnswer { question, reason } => {
                format!("Invalid answer for '{}': {}", question, reason)
            }
            SessionError::AlreadyCompleted => "Session has already completed".to_string(),
            SessionError::NotCompleted => "Session has not completed yet".to_string(),
            SessionError::Storage(msg) => format!("Storage error: {}", msg),
        }
    }
}

impl std::fmt::Display for SessionError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.message())
    }
}

impl std::error::Error for SessionError {}

impl From<DomainError> for SessionError {
    fn from(err: DomainError) -> Self {
        SessionError::Storage(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn qid(s: &str) -> QuestionId {
        QuestionId::new(s).unwrap()
    }

    #[test]
    fn codes_map_to_taxonomy() {
        assert_eq!(
            SessionError::not_found(SessionId::new()).code(),
            ErrorCode::SessionNotFound
        );
        assert_eq!(
            SessionError::out_of_order(None, qid("q_x")).code(),
            ErrorCode::OutOfOrderAnswer
        );
        assert_eq!(
            SessionError::invalid_answer(qid("q_x"), "bad").code(),
            ErrorCode::InvalidAnswerValue
        );
        assert_eq!(
            SessionError::already_completed().code(),
            ErrorCode::SessionAlreadyCompleted
        );
        assert_eq!(SessionError::not_completed().code(), ErrorCode::SessionNotCompleted);
    }

    #[test]
    fn out_of_order_message_names_pending_question() {
        let err = SessionError::out_of_order(Some(qid("q_age")), qid("q_gender"));
        assert!(err.message().contains("q_age"));
        assert!(err.message().contains("q_gender"));
    }

    #[test]
    fn domain_error_converts_to_storage() {
        let err: SessionError =
            DomainError::storage("connection reset").into();
        assert!(matches!(err, SessionError::Storage(_)));
    }
}
