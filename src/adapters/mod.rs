//! Adapters - Implementations of the ports against concrete technology.
//!
//! - `store` - in-memory session table
//! - `generator` - Cerebras chat-completions collaborator + test mock
//! - `catalog` - JSON catalog loading

pub mod catalog;
pub mod generator;
pub mod store;

pub use catalog::CatalogLoadError;
pub use generator::{CerebrasConfig, CerebrasGenerator, MockReportGenerator};
pub use store::InMemorySessionStore;
