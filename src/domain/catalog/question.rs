//! Question definitions.
//!
//! Questions are immutable once loaded. The catalog data distinguishes
//! structurally fixed base questions from symptom-driven follow-ups, but the
//! question definition itself is the same for both.

use serde::{Deserialize, Serialize};
use std::fmt;

use super::SchemaError;
use crate::domain::foundation::QuestionId;

/// Kind of answer a question accepts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AnswerType {
    FreeText,
    SingleChoice,
    MultipleChoice,
    Numeric,
}

impl AnswerType {
    /// Returns true for choice types, which require an options list.
    pub fn is_choice(&self) -> bool {
        matches!(self, AnswerType::SingleChoice | AnswerType::MultipleChoice)
    }
}

impl fmt::Display for AnswerType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            AnswerType::FreeText => "free_text",
            AnswerType::SingleChoice => "single_choice",
            AnswerType::MultipleChoice => "multiple_choice",
            AnswerType::Numeric => "numeric",
        };
        write!(f, "{}", s)
    }
}

/// Applicability condition: the question is asked only when the trigger
/// question has already been answered with the expected value.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Applicability {
    question: QuestionId,
    equals: String,
}

impl Applicability {
    /// Creates a condition on the given trigger question and value.
    pub fn new(question: QuestionId, equals: impl Into<String>) -> Self {
        Self {
            question,
            equals: equals.into(),
        }
    }

    /// Returns the trigger question.
    pub fn question(&self) -> &QuestionId {
        &self.question
    }

    /// Returns the expected trigger value.
    pub fn equals(&self) -> &str {
        &self.equals
    }

    /// Checks whether a recorded trigger value satisfies this condition.
    ///
    /// Comparison is case-insensitive, matching the option validation rules.
    pub fn is_satisfied_by(&self, value: &str) -> bool {
        self.equals.eq_ignore_ascii_case(value.trim())
    }
}

/// A single question in the catalog.
///
/// # Invariants
///
/// - `id` is unique within the catalog and non-empty
/// - `options` is non-empty exactly when `answer_type` is a choice type
/// - Immutable once loaded
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Question {
    id: QuestionId,
    prompt: String,
    answer_type: AnswerType,
    #[serde(default)]
    options: Vec<String>,
    #[serde(default)]
    is_compulsory: bool,
    #[serde(default)]
    condition: Option<Applicability>,
    #[serde(default)]
    demographic: bool,
}

impl Question {
    /// Creates a new question with the given identity, prompt, and type.
    pub fn new(id: QuestionId, prompt: impl Into<String>, answer_type: AnswerType) -> Self {
        Self {
            id,
            prompt: prompt.into(),
            answer_type,
            options: Vec::new(),
            is_compulsory: false,
            condition: None,
            demographic: false,
        }
    }

    /// Sets the options for a choice question.
    pub fn with_options(mut self, options: Vec<String>) -> Self {
        self.options = options;
        self
    }

    /// Marks the question as compulsory.
    pub fn compulsory(mut self) -> Self {
        self.is_compulsory = true;
        self
    }

    /// Attaches an applicability condition.
    pub fn with_condition(mut self, condition: Applicability) -> Self {
        self.condition = Some(condition);
        self
    }

    /// Marks the question as demographic (patient-info grouping in reports).
    pub fn demographic(mut self) -> Self {
        self.demographic = true;
        self
    }

    /// Returns the question identifier.
    pub fn id(&self) -> &QuestionId {
        &self.id
    }

    /// Returns the prompt text.
    pub fn prompt(&self) -> &str {
        &self.prompt
    }

    /// Returns the answer type.
    pub fn answer_type(&self) -> AnswerType {
        self.answer_type
    }

    /// Returns the ordered options (empty for non-choice questions).
    pub fn options(&self) -> &[String] {
        &self.options
    }

    /// Returns true if the question must be answered in every session.
    pub fn is_compulsory(&self) -> bool {
        self.is_compulsory
    }

    /// Returns the applicability condition, if any.
    pub fn condition(&self) -> Option<&Applicability> {
        self.condition.as_ref()
    }

    /// Returns true if the question feeds the patient-info section of reports.
    pub fn is_demographic(&self) -> bool {
        self.demographic
    }

    /// Checks whether a value matches one of the declared options.
    ///
    /// Case-insensitive; surrounding whitespace is ignored.
    pub fn has_option(&self, value: &str) -> bool {
        let value = value.trim();
        self.options.iter().any(|o| o.eq_ignore_ascii_case(value))
    }

    /// Validates the structural integrity of the definition.
    ///
    /// # Errors
    ///
    /// - `EmptyQuestionId` / `EmptyPrompt` for blank fields
    /// - `MissingOptions` if a choice type has no options
    /// - `UnexpectedOptions` if a non-choice type declares options
    pub fn validate(&self) -> Result<(), SchemaError> {
        if self.id.is_empty() {
            return Err(SchemaError::EmptyQuestionId);
        }
        if self.prompt.trim().is_empty() {
            return Err(SchemaError::EmptyPrompt(self.id.clone()));
        }
        if self.answer_type.is_choice() && self.options.is_empty() {
            return Err(SchemaError::MissingOptions(self.id.clone()));
        }
        if !self.answer_type.is_choice() && !self.options.is_empty() {
            return Err(SchemaError::UnexpectedOptions(self.id.clone()));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn qid(s: &str) -> QuestionId {
        QuestionId::new(s).unwrap()
    }

    #[test]
    fn builder_sets_all_fields() {
        let q = Question::new(qid("q_gender"), "What is your gender?", AnswerType::SingleChoice)
            .with_options(vec!["female".into(), "male".into(), "other".into()])
            .compulsory()
            .demographic();

        assert_eq!(q.id().as_str(), "q_gender");
        assert_eq!(q.prompt(), "What is your gender?");
        assert_eq!(q.answer_type(), AnswerType::SingleChoice);
        assert_eq!(q.options().len(), 3);
        assert!(q.is_compulsory());
        assert!(q.is_demographic());
        assert!(q.condition().is_none());
    }

    #[test]
    fn has_option_is_case_insensitive() {
        let q = Question::new(qid("q_gender"), "Gender?", AnswerType::SingleChoice)
            .with_options(vec!["Female".into(), "Male".into()]);

        assert!(q.has_option("female"));
        assert!(q.has_option(" FEMALE "));
        assert!(!q.has_option("unknown"));
    }

    #[test]
    fn validate_rejects_choice_without_options() {
        let q = Question::new(qid("q_x"), "Pick one", AnswerType::SingleChoice);
        assert_eq!(q.validate(), Err(SchemaError::MissingOptions(qid("q_x"))));
    }

    #[test]
    fn validate_rejects_free_text_with_options() {
        let q = Question::new(qid("q_x"), "Describe", AnswerType::FreeText)
            .with_options(vec!["yes".into()]);
        assert_eq!(q.validate(), Err(SchemaError::UnexpectedOptions(qid("q_x"))));
    }

    #[test]
    fn validate_rejects_empty_prompt() {
        let q = Question::new(qid("q_x"), "  ", AnswerType::FreeText);
        assert_eq!(q.validate(), Err(SchemaError::EmptyPrompt(qid("q_x"))));
    }

    #[test]
    fn applicability_matches_case_insensitively() {
        let cond = Applicability::new(qid("q_gender"), "female");
        assert!(cond.is_satisfied_by("Female"));
        assert!(cond.is_satisfied_by(" female "));
        assert!(!cond.is_satisfied_by("male"));
    }

    #[test]
    fn question_deserializes_from_catalog_json() {
        let json = r#"{
            "id": "q_pregnant",
            "prompt": "Are you currently pregnant?",
            "answer_type": "single_choice",
            "options": ["yes", "no", "unsure"],
            "condition": { "question": "q_gender", "equals": "female" }
        }"#;

        let q: Question = serde_json::from_str(json).unwrap();
        assert_eq!(q.id().as_str(), "q_pregnant");
        assert!(!q.is_compulsory());
        assert_eq!(q.condition().unwrap().question().as_str(), "q_gender");
    }
}
