//! Catalog JSON loader.
//!
//! Loads the question catalog and decision tree from JSON documents, either
//! from configured file paths or from the bundled reference data. Loading is
//! all-or-nothing: parse or schema failures reject the whole catalog.

use once_cell::sync::Lazy;
use std::path::Path;
use std::sync::Arc;
use thiserror::Error;
use tracing::info;

use crate::domain::catalog::{
    CatalogDocument, DecisionTreeDocument, QuestionCatalog, SchemaError,
};

/// Bundled reference catalog (23 base questions + symptom follow-ups).
const BUNDLED_CATALOG: &str = include_str!("../../../data/intake_catalog.json");
/// Bundled reference decision tree.
const BUNDLED_TREE: &str = include_str!("../../../data/decision_tree.json");

static BUILTIN: Lazy<Arc<QuestionCatalog>> = Lazy::new(|| {
    Arc::new(
        load_from_str(BUNDLED_CATALOG, BUNDLED_TREE)
            .expect("bundled catalog data must be valid"),
    )
});

/// Errors raised while loading catalog data.
#[derive(Debug, Error)]
pub enum CatalogLoadError {
    #[error("failed to read catalog file: {0}")]
    Io(#[from] std::io::Error),

    #[error("catalog document is not valid JSON: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("catalog failed integrity validation: {0}")]
    Schema(#[from] SchemaError),
}

/// Loads and validates a catalog from JSON strings.
pub fn load_from_str(
    catalog_json: &str,
    tree_json: &str,
) -> Result<QuestionCatalog, CatalogLoadError> {
    let catalog: CatalogDocument = serde_json::from_str(catalog_json)?;
    let tree: DecisionTreeDocument = serde_json::from_str(tree_json)?;
    Ok(QuestionCatalog::load(catalog, tree)?)
}

/// Loads and validates a catalog from JSON files.
pub fn load_from_files(
    catalog_path: impl AsRef<Path>,
    tree_path: impl AsRef<Path>,
) -> Result<QuestionCatalog, CatalogLoadError> {
    let catalog_json = std::fs::read_to_string(&catalog_path)?;
    let tree_json = std::fs::read_to_string(&tree_path)?;
    let catalog = load_from_str(&catalog_json, &tree_json)?;
    info!(
        catalog = %catalog_path.as_ref().display(),
        tree = %tree_path.as_ref().display(),
        questions = catalog.question_count(),
        "question catalog loaded"
    );
    Ok(catalog)
}

/// Returns the bundled reference catalog.
///
/// Validated once on first access; the bundled data is part of the build,
/// so a failure here is a build defect, not a runtime condition.
pub fn builtin() -> &'static Arc<QuestionCatalog> {
    &BUILTIN
}
