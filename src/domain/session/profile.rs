//! Profile hints supplied at session start.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use super::AnswerValue;
use crate::domain::foundation::QuestionId;

/// Answers already known before the conversation starts (e.g. from a stored
/// patient profile). Non-compulsory base questions satisfiable from here are
/// recorded at session creation and never asked; compulsory questions are
/// always asked and cannot be pre-filled.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ProfileHints {
    values: HashMap<QuestionId, AnswerValue>,
}

impl ProfileHints {
    /// Creates an empty set of hints.
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a hint for the given question.
    pub fn with(mut self, question: QuestionId, value: AnswerValue) -> Self {
        self.values.insert(question, value);
        self
    }

    /// Looks up the hint for a question.
    pub fn get(&self, question: &QuestionId) -> Option<&AnswerValue> {
        self.values.get(question)
    }

    /// Iterates over all hints.
    pub fn iter(&self) -> impl Iterator<Item = (&QuestionId, &AnswerValue)> {
        self.values.iter()
    }

    /// Returns the number of hints.
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Returns true if there are no hints.
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn qid(s: &str) -> QuestionId {
        QuestionId::new(s).unwrap()
    }

    #[test]
    fn with_and_get_round_trip() {
        let hints = ProfileHints::new()
            .with(qid("q_allergies"), AnswerValue::Text("none".into()))
            .with(qid("q_height"), AnswerValue::Number(180.0));

        assert_eq!(hints.len(), 2);
        assert_eq!(
            hints.get(&qid("q_allergies")),
            Some(&AnswerValue::Text("none".into()))
        );
        assert!(hints.get(&qid("q_missing")).is_none());
    }

    #[test]
    fn deserializes_from_flat_map() {
        let json = r#"{"q_allergies": "none", "q_height": 180}"#;
        let hints: ProfileHints = serde_json::from_str(json).unwrap();
        assert_eq!(hints.len(), 2);
        assert_eq!(hints.get(&qid("q_height")), Some(&AnswerValue::Number(180.0)));
    }
}
