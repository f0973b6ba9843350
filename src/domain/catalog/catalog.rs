//! The question catalog: validated, read-only questionnaire definition.
//!
//! Loaded once at startup from the catalog and decision-tree documents and
//! shared as `Arc<QuestionCatalog>`. All reads are lock-free; the catalog is
//! never mutated after load.

use serde::{Deserialize, Serialize};
use std::collections::{HashMap, HashSet};

use super::{
    normalize_term, CatalogDocument, DecisionTreeDocument, DecisionTreeIndex, Question,
    SchemaError, SymptomEntry,
};
use crate::domain::foundation::QuestionId;

fn default_female_value() -> String {
    "female".to_string()
}

/// Catalog-level designations of questions with special engine behavior.
///
/// The primary-symptom question is the one whose free-text answer is scanned
/// against the decision tree; the gender question triggers the
/// gender-conditional insertions. Name and age feed the patient-info section
/// of report requests.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Designations {
    pub primary_symptom: QuestionId,
    pub gender: QuestionId,
    #[serde(default = "default_female_value")]
    pub female_value: String,
    #[serde(default)]
    pub name: Option<QuestionId>,
    #[serde(default)]
    pub age: Option<QuestionId>,
}

/// Validated question catalog plus decision-tree index.
///
/// # Invariants
///
/// - Question identifiers are unique
/// - Every base-order, designation, condition-trigger, and follow-up
///   identifier resolves to a defined question
/// - Read-only after load; safe for unsynchronized concurrent reads
#[derive(Debug, Clone)]
pub struct QuestionCatalog {
    questions: HashMap<QuestionId, Question>,
    // all question ids in document order, for deterministic iteration
    order: Vec<QuestionId>,
    base_order: Vec<QuestionId>,
    designations: Designations,
    emergency_keywords: Vec<String>,
    tree: DecisionTreeIndex,
}

impl QuestionCatalog {
    /// Loads and validates a catalog from its source documents.
    ///
    /// Validation is all-or-nothing: any integrity violation rejects the
    /// whole load.
    ///
    /// # Errors
    ///
    /// Returns the first [`SchemaError`] encountered.
    pub fn load(
        catalog: CatalogDocument,
        tree: DecisionTreeDocument,
    ) -> Result<Self, SchemaError> {
        let mut questions: HashMap<QuestionId, Question> = HashMap::new();
        let mut order = Vec::with_capacity(catalog.questions.len());

        for question in catalog.questions {
            question.validate()?;
            let id = question.id().clone();
            if questions.insert(id.clone(), question).is_some() {
                return Err(SchemaError::DuplicateQuestion(id));
            }
            order.push(id);
        }

        let mut seen_base: HashSet<QuestionId> = HashSet::new();
        for id in &catalog.base_order {
            if !questions.contains_key(id) {
                return Err(SchemaError::UnknownBaseQuestion(id.clone()));
            }
            if !seen_base.insert(id.clone()) {
                return Err(SchemaError::DuplicateBaseQuestion(id.clone()));
            }
        }

        Self::validate_conditions(&questions, &order)?;
        Self::validate_designations(&questions, &catalog.designations)?;

        let tree = DecisionTreeIndex::build(tree.symptoms, |id| questions.contains_key(id))?;

        let mut emergency_keywords: Vec<String> = Vec::new();
        for keyword in catalog.emergency_keywords {
            let normalized = normalize_term(&keyword);
            if !normalized.is_empty() && !emergency_keywords.contains(&normalized) {
                emergency_keywords.push(normalized);
            }
        }

        Ok(Self {
            questions,
            order,
            base_order: catalog.base_order,
            designations: catalog.designations,
            emergency_keywords,
            tree,
        })
    }

    fn validate_conditions(
        questions: &HashMap<QuestionId, Question>,
        order: &[QuestionId],
    ) -> Result<(), SchemaError> {
        for id in order {
            let question = &questions[id];
            let Some(condition) = question.condition() else {
                continue;
            };
            let Some(trigger) = questions.get(condition.question()) else {
                return Err(SchemaError::UnknownConditionTrigger {
                    question: id.clone(),
                    trigger: condition.question().clone(),
                });
            };
            if trigger.answer_type().is_choice() && !trigger.has_option(condition.equals()) {
                return Err(SchemaError::ConditionValueNotAnOption {
                    question: id.clone(),
                    trigger: condition.question().clone(),
                    value: condition.equals().to_string(),
                });
            }
        }
        Ok(())
    }

    fn validate_designations(
        questions: &HashMap<QuestionId, Question>,
        designations: &Designations,
    ) -> Result<(), SchemaError> {
        use super::AnswerType;

        let primary = questions.get(&designations.primary_symptom).ok_or_else(|| {
            SchemaError::UnknownDesignatedQuestion {
                role: "primary symptom",
                id: designations.primary_symptom.clone(),
            }
        })?;
        if primary.answer_type() != AnswerType::FreeText {
            return Err(SchemaError::DesignationMismatch {
                role: "primary symptom",
                id: designations.primary_symptom.clone(),
                reason: "must be a free-text question".to_string(),
            });
        }

        let gender = questions.get(&designations.gender).ok_or_else(|| {
            SchemaError::UnknownDesignatedQuestion {
                role: "gender",
                id: designations.gender.clone(),
            }
        })?;
        if !gender.has_option(&designations.female_value) {
            return Err(SchemaError::DesignationMismatch {
                role: "gender",
                id: designations.gender.clone(),
                reason: format!(
                    "'{}' is not one of its options",
                    designations.female_value
                ),
            });
        }

        for (role, id) in [
            ("name", designations.name.as_ref()),
            ("age", designations.age.as_ref()),
        ] {
            if let Some(id) = id {
                if !questions.contains_key(id) {
                    return Err(SchemaError::UnknownDesignatedQuestion {
                        role,
                        id: id.clone(),
                    });
                }
            }
        }

        Ok(())
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Accessors
    // ─────────────────────────────────────────────────────────────────────────

    /// Returns the base questions in their fixed order.
    pub fn base_questions(&self) -> Vec<&Question> {
        self.base_order.iter().map(|id| &self.questions[id]).collect()
    }

    /// Returns the base question identifiers in order.
    pub fn base_order(&self) -> &[QuestionId] {
        &self.base_order
    }

    /// Looks up a question by identifier.
    pub fn question(&self, id: &QuestionId) -> Option<&Question> {
        self.questions.get(id)
    }

    /// Returns the number of defined questions.
    pub fn question_count(&self) -> usize {
        self.questions.len()
    }

    /// Returns the ordered follow-up questions for a symptom keyword.
    ///
    /// Empty if the keyword is unknown.
    pub fn follow_ups_for(&self, keyword: &str) -> Vec<&Question> {
        self.tree
            .entry_for_keyword(keyword)
            .map(|entry| {
                entry
                    .follow_ups()
                    .iter()
                    .map(|id| &self.questions[id])
                    .collect()
            })
            .unwrap_or_default()
    }

    /// Looks up the symptom entry for a keyword.
    pub fn symptom_for_keyword(&self, keyword: &str) -> Option<&SymptomEntry> {
        self.tree.entry_for_keyword(keyword)
    }

    /// Looks up a symptom entry by name.
    pub fn symptom_by_name(&self, name: &str) -> Option<&SymptomEntry> {
        self.tree.entry_by_name(name)
    }

    /// Returns the decision-tree index.
    pub fn decision_tree(&self) -> &DecisionTreeIndex {
        &self.tree
    }

    /// Returns the catalog-level designations.
    pub fn designations(&self) -> &Designations {
        &self.designations
    }

    /// Returns the normalized emergency keywords.
    pub fn emergency_keywords(&self) -> &[String] {
        &self.emergency_keywords
    }

    /// Returns the questions conditioned on the given trigger answer, in
    /// document order.
    pub fn conditional_questions_for(&self, trigger: &QuestionId, value: &str) -> Vec<&Question> {
        self.order
            .iter()
            .map(|id| &self.questions[id])
            .filter(|q| {
                q.condition()
                    .map(|c| c.question() == trigger && c.is_satisfied_by(value))
                    .unwrap_or(false)
            })
            .collect()
    }
}
