//! Answer values and their validation against question constraints.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::domain::catalog::{AnswerType, Question};
use crate::domain::foundation::QuestionId;

/// A literal answer value supplied for a question.
///
/// The untagged representation accepts JSON numbers, strings, and string
/// arrays directly, matching the shapes clients naturally submit.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum AnswerValue {
    Number(f64),
    Text(String),
    Selections(Vec<String>),
}

impl AnswerValue {
    /// Returns the text content, if this is a text answer.
    pub fn as_text(&self) -> Option<&str> {
        match self {
            AnswerValue::Text(s) => Some(s),
            _ => None,
        }
    }

    /// Validates this value against a question's declared type and options.
    ///
    /// Returns a human-readable reason on mismatch. No normalization is
    /// applied beyond trimming; option comparison is case-insensitive.
    pub fn validate_against(&self, question: &Question) -> Result<(), String> {
        match (question.answer_type(), self) {
            (AnswerType::FreeText, AnswerValue::Text(text)) => {
                if text.trim().is_empty() {
                    Err("expected non-empty text".to_string())
                } else {
                    Ok(())
                }
            }
            (AnswerType::SingleChoice, AnswerValue::Text(text)) => {
                if question.has_option(text) {
                    Ok(())
                } else {
                    Err(format!("'{}' is not one of the options", text.trim()))
                }
            }
            (AnswerType::MultipleChoice, AnswerValue::Selections(values)) => {
                if values.is_empty() {
                    return Err("expected at least one selection".to_string());
                }
                for value in values {
                    if !question.has_option(value) {
                        return Err(format!("'{}' is not one of the options", value.trim()));
                    }
                }
                for (i, value) in values.iter().enumerate() {
                    if values[..i]
                        .iter()
                        .any(|v| v.trim().eq_ignore_ascii_case(value.trim()))
                    {
                        return Err(format!("'{}' selected more than once", value.trim()));
                    }
                }
                Ok(())
            }
            (AnswerType::Numeric, AnswerValue::Number(n)) => {
                if n.is_finite() {
                    Ok(())
                } else {
                    Err("expected a finite number".to_string())
                }
            }
            (expected, _) => Err(format!("expected a {} answer", expected)),
        }
    }
}

impl fmt::Display for AnswerValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AnswerValue::Text(s) => write!(f, "{}", s),
            AnswerValue::Number(n) => {
                if n.fract() == 0.0 && n.abs() < 1e15 {
                    write!(f, "{}", *n as i64)
                } else {
                    write!(f, "{}", n)
                }
            }
            AnswerValue::Selections(values) => write!(f, "{}", values.join(", ")),
        }
    }
}

/// One recorded answer: question identifier plus the literal value.
///
/// Records are append-only; a session's answer list preserves insertion
/// order for report assembly.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnswerRecord {
    question: QuestionId,
    value: AnswerValue,
}

impl AnswerRecord {
    /// Creates a new record.
    pub fn new(question: QuestionId, value: AnswerValue) -> Self {
        Self { question, value }
    }

    /// Returns the answered question identifier.
    pub fn question(&self) -> &QuestionId {
        &self.question
    }

    /// Returns the literal answer value.
    pub fn value(&self) -> &AnswerValue {
        &self.value
    }
}
