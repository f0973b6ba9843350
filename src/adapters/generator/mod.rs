//! Report generator adapters.

mod cerebras_generator;
mod mock_generator;
mod report_prompt;

pub use cerebras_generator::{CerebrasConfig, CerebrasGenerator};
pub use mock_generator::{MockGeneratorError, MockOutcome, MockReportGenerator};
pub use report_prompt::{build_report_prompt, REPORT_SYSTEM_PROMPT};
