//! Catalog data configuration

use serde::Deserialize;
use std::path::PathBuf;

use super::error::ValidationError;

/// Where the question catalog and decision tree are loaded from.
///
/// Both paths unset means the bundled reference data is used.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct CatalogConfig {
    /// Path to the question catalog JSON document
    pub catalog_path: Option<PathBuf>,

    /// Path to the decision tree JSON document
    pub decision_tree_path: Option<PathBuf>,
}

impl CatalogConfig {
    /// Returns both paths when external data is configured.
    pub fn paths(&self) -> Option<(&PathBuf, &PathBuf)> {
        match (&self.catalog_path, &self.decision_tree_path) {
            (Some(catalog), Some(tree)) => Some((catalog, tree)),
            _ => None,
        }
    }

    /// Validate catalog configuration
    pub fn validate(&self) -> Result<(), ValidationError> {
        match (&self.catalog_path, &self.decision_tree_path) {
            (Some(_), Some(_)) | (None, None) => Ok(()),
            _ => Err(ValidationError::PartialCatalogPaths),
        }
    }
}
