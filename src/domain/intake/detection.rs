//! Symptom and emergency-keyword detection.
//!
//! Detection is a deterministic scan of a finite keyword table against the
//! normalized answer text: case-insensitive substring matching, no fuzzy
//! matching, no stemming. Matches are ordered by first occurrence in the
//! text so that earlier-reported symptoms queue their follow-ups first;
//! ties fall back to catalog order.

use crate::domain::catalog::{QuestionCatalog, SymptomEntry};

/// Scans normalized answer text against the decision-tree keyword table.
///
/// Returns the matched entries ordered by first keyword occurrence
/// (catalog order on ties), each entry at most once even when several of
/// its keywords hit.
pub fn match_symptoms<'a>(catalog: &'a QuestionCatalog, normalized: &str) -> Vec<&'a SymptomEntry> {
    // (first occurrence, keyword scan order, entry index)
    let mut hits: Vec<(usize, usize, usize)> = Vec::new();

    for (scan_order, (keyword, entry_idx, _)) in catalog.decision_tree().keyword_entries().enumerate()
    {
        let Some(position) = normalized.find(keyword) else {
            continue;
        };
        match hits.iter_mut().find(|(_, _, idx)| *idx == entry_idx) {
            Some(existing) => {
                if (position, scan_order) < (existing.0, existing.1) {
                    existing.0 = position;
                    existing.1 = scan_order;
                }
            }
            None => hits.push((position, scan_order, entry_idx)),
        }
    }

    hits.sort_by_key(|&(position, scan_order, _)| (position, scan_order));
    hits.into_iter()
        .map(|(_, _, idx)| &catalog.decision_tree().entries()[idx])
        .collect()
}

/// Scans normalized answer text for emergency keywords.
///
/// Returns the matched phrases ordered by first occurrence.
pub fn match_emergency(catalog: &QuestionCatalog, normalized: &str) -> Vec<String> {
    let mut hits: Vec<(usize, &String)> = catalog
        .emergency_keywords()
        .iter()
        .filter_map(|keyword| normalized.find(keyword.as_str()).map(|pos| (pos, keyword)))
        .collect();
    hits.sort_by_key(|&(pos, _)| pos);
    hits.into_iter().map(|(_, kw)| kw.clone()).collect()
}
