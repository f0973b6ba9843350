//! Source documents for catalog loading.
//!
//! These are the deserialization targets for the two JSON documents the
//! catalog is loaded from. They carry no invariants of their own; all
//! integrity checks happen in [`QuestionCatalog::load`](super::QuestionCatalog::load).

use serde::{Deserialize, Serialize};

use super::{Designations, Question, SymptomEntry};
use crate::domain::foundation::QuestionId;

/// The question catalog document: question definitions, the fixed base
/// order, catalog-level designations, and the emergency keyword list.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CatalogDocument {
    pub questions: Vec<Question>,
    pub base_order: Vec<QuestionId>,
    pub designations: Designations,
    #[serde(default)]
    pub emergency_keywords: Vec<String>,
}

/// The decision tree document: one entry per symptom.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DecisionTreeDocument {
    pub symptoms: Vec<SymptomEntry>,
}
