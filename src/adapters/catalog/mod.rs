//! Catalog loading adapters.

pub mod json_loader;

pub use json_loader::{builtin, load_from_files, load_from_str, CatalogLoadError};
