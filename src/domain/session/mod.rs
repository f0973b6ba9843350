//! Session state: the per-conversation mutable record.

mod aggregate;
mod answer;
mod errors;
mod profile;

pub use aggregate::Session;
pub use answer::{AnswerRecord, AnswerValue};
pub use errors::SessionError;
pub use profile::ProfileHints;
