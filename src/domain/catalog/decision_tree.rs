//! Decision tree: symptom keyword -> ordered follow-up questions.
//!
//! The tree is a finite, data-driven keyword table. Matching is a
//! case-insensitive substring scan over normalized text; there is no fuzzy
//! matching, stemming, or lemmatization.

use serde::{Deserialize, Serialize};
use std::collections::{HashMap, HashSet};

use super::SchemaError;
use crate::domain::foundation::{QuestionId, UrgencyLevel};

/// Normalizes a term or answer for keyword matching: lowercase, trimmed,
/// interior whitespace collapsed to single spaces.
pub fn normalize_term(text: &str) -> String {
    text.to_lowercase()
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
}

/// A decision-tree entry for one symptom.
///
/// Beyond the follow-up sequence, entries carry the clinical context that is
/// forwarded to the report collaborator: a display label, a default urgency
/// classification, and red flags to watch for.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SymptomEntry {
    name: String,
    #[serde(default)]
    label: Option<String>,
    keywords: Vec<String>,
    follow_ups: Vec<QuestionId>,
    #[serde(default)]
    default_urgency: Option<UrgencyLevel>,
    #[serde(default)]
    red_flags: Vec<String>,
}

impl SymptomEntry {
    /// Creates a new entry with the given name, keywords, and follow-ups.
    pub fn new(
        name: impl Into<String>,
        keywords: Vec<String>,
        follow_ups: Vec<QuestionId>,
    ) -> Self {
        Self {
            name: name.into(),
            label: None,
            keywords,
            follow_ups,
            default_urgency: None,
            red_flags: Vec::new(),
        }
    }

    /// Sets the display label.
    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.label = Some(label.into());
        self
    }

    /// Sets the default urgency classification.
    pub fn with_default_urgency(mut self, urgency: UrgencyLevel) -> Self {
        self.default_urgency = Some(urgency);
        self
    }

    /// Sets the red flags.
    pub fn with_red_flags(mut self, red_flags: Vec<String>) -> Self {
        self.red_flags = red_flags;
        self
    }

    /// Returns the symptom name (stable key, e.g. "fever").
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the display label, falling back to the name.
    pub fn label(&self) -> &str {
        self.label.as_deref().unwrap_or(&self.name)
    }

    /// Returns the keywords that map to this symptom.
    pub fn keywords(&self) -> &[String] {
        &self.keywords
    }

    /// Returns the ordered follow-up question identifiers.
    pub fn follow_ups(&self) -> &[QuestionId] {
        &self.follow_ups
    }

    /// Returns the default urgency classification, if declared.
    pub fn default_urgency(&self) -> Option<UrgencyLevel> {
        self.default_urgency
    }

    /// Returns the red flags associated with this symptom.
    pub fn red_flags(&self) -> &[String] {
        &self.red_flags
    }
}

/// Index over the decision tree: normalized keyword -> symptom entry.
///
/// Built once at load; read-only afterwards. Every follow-up identifier is
/// guaranteed to resolve against the question catalog (checked at build).
#[derive(Debug, Clone)]
pub struct DecisionTreeIndex {
    entries: Vec<SymptomEntry>,
    by_keyword: HashMap<String, usize>,
    // (normalized keyword, entry index) in catalog order, for deterministic scans
    keyword_order: Vec<(String, usize)>,
}

impl DecisionTreeIndex {
    /// Builds the index, validating entry integrity.
    ///
    /// `question_exists` is the resolver against the question catalog.
    ///
    /// # Errors
    ///
    /// - `EmptySymptomName` / `DuplicateSymptom` on bad entry names
    /// - `NoKeywords` / `EmptyKeyword` / `DuplicateKeyword` on bad keywords
    /// - `UnknownFollowUp` if a follow-up does not resolve to a question
    pub fn build(
        entries: Vec<SymptomEntry>,
        question_exists: impl Fn(&QuestionId) -> bool,
    ) -> Result<Self, SchemaError> {
        let mut by_keyword: HashMap<String, usize> = HashMap::new();
        let mut keyword_order = Vec::new();
        let mut names: HashSet<String> = HashSet::new();

        for (idx, entry) in entries.iter().enumerate() {
            if entry.name.trim().is_empty() {
                return Err(SchemaError::EmptySymptomName);
            }
            if !names.insert(entry.name.clone()) {
                return Err(SchemaError::DuplicateSymptom(entry.name.clone()));
            }
            if entry.keywords.is_empty() {
                return Err(SchemaError::NoKeywords(entry.name.clone()));
            }

            for keyword in &entry.keywords {
                let normalized = normalize_term(keyword);
                if normalized.is_empty() {
                    return Err(SchemaError::EmptyKeyword(entry.name.clone()));
                }
                if let Some(&first_idx) = by_keyword.get(&normalized) {
                    return Err(SchemaError::DuplicateKeyword {
                        keyword: normalized,
                        first: entries[first_idx].name.clone(),
                        second: entry.name.clone(),
                    });
                }
                by_keyword.insert(normalized.clone(), idx);
                keyword_order.push((normalized, idx));
            }

            for follow_up in &entry.follow_ups {
                if !question_exists(follow_up) {
                    return Err(SchemaError::UnknownFollowUp {
                        symptom: entry.name.clone(),
                        question: follow_up.clone(),
                    });
                }
            }
        }

        Ok(Self {
            entries,
            by_keyword,
            keyword_order,
        })
    }

    /// Returns all entries in catalog order.
    pub fn entries(&self) -> &[SymptomEntry] {
        &self.entries
    }

    /// Looks up the entry for a keyword (case-insensitive).
    pub fn entry_for_keyword(&self, keyword: &str) -> Option<&SymptomEntry> {
        self.by_keyword
            .get(&normalize_term(keyword))
            .map(|&idx| &self.entries[idx])
    }

    /// Looks up an entry by its symptom name.
    pub fn entry_by_name(&self, name: &str) -> Option<&SymptomEntry> {
        self.entries.iter().find(|e| e.name == name)
    }

    /// Iterates `(normalized keyword, entry index, entry)` in catalog order.
    pub fn keyword_entries(&self) -> impl Iterator<Item = (&str, usize, &SymptomEntry)> {
        self.keyword_order
            .iter()
            .map(move |(kw, idx)| (kw.as_str(), *idx, &self.entries[*idx]))
    }
}
