//! Catalog integrity errors.
//!
//! All of these are fatal at load time: a catalog or decision tree that
//! fails any check is rejected whole, never partially loaded.

use thiserror::Error;

use crate::domain::foundation::QuestionId;

/// Catalog or decision-tree integrity violation detected at load time.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum SchemaError {
    #[error("question with empty identifier")]
    EmptyQuestionId,

    #[error("duplicate question identifier '{0}'")]
    DuplicateQuestion(QuestionId),

    #[error("question '{0}' has an empty prompt")]
    EmptyPrompt(QuestionId),

    #[error("choice question '{0}' declares no options")]
    MissingOptions(QuestionId),

    #[error("non-choice question '{0}' declares options")]
    UnexpectedOptions(QuestionId),

    #[error("base order references unknown question '{0}'")]
    UnknownBaseQuestion(QuestionId),

    #[error("question '{0}' appears more than once in the base order")]
    DuplicateBaseQuestion(QuestionId),

    #[error("designated {role} question '{id}' is not defined in the catalog")]
    UnknownDesignatedQuestion { role: &'static str, id: QuestionId },

    #[error("designated {role} question '{id}' is unsuitable: {reason}")]
    DesignationMismatch {
        role: &'static str,
        id: QuestionId,
        reason: String,
    },

    #[error("condition on question '{question}' references unknown question '{trigger}'")]
    UnknownConditionTrigger {
        question: QuestionId,
        trigger: QuestionId,
    },

    #[error("condition on question '{question}' expects '{value}' which is not an option of '{trigger}'")]
    ConditionValueNotAnOption {
        question: QuestionId,
        trigger: QuestionId,
        value: String,
    },

    #[error("decision tree entry with empty symptom name")]
    EmptySymptomName,

    #[error("duplicate decision tree entry for symptom '{0}'")]
    DuplicateSymptom(String),

    #[error("symptom '{0}' declares no keywords")]
    NoKeywords(String),

    #[error("symptom '{0}' declares an empty keyword")]
    EmptyKeyword(String),

    #[error("keyword '{keyword}' is claimed by both '{first}' and '{second}'")]
    DuplicateKeyword {
        keyword: String,
        first: String,
        second: String,
    },

    #[error("symptom '{symptom}' references unknown follow-up question '{question}'")]
    UnknownFollowUp {
        symptom: String,
        question: QuestionId,
    },
}
