//! Question catalog & decision tree index.
//!
//! The catalog is the static, ordered definition of the base questionnaire
//! plus the symptom decision tree. It is validated as a whole at load time
//! (no partial loads) and read-only at runtime.

#[allow(clippy::module_inception)]
mod catalog;
mod decision_tree;
mod errors;
mod question;
mod source;

pub use catalog::{Designations, QuestionCatalog};
pub use decision_tree::{normalize_term, DecisionTreeIndex, SymptomEntry};
pub use errors::SchemaError;
pub use question::{AnswerType, Applicability, Question};
pub use source::{CatalogDocument, DecisionTreeDocument};
