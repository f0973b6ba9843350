//! Report validation errors.

use thiserror::Error;

/// The report collaborator returned a structurally invalid payload.
///
/// This is a local-validation failure, deliberately distinct from
/// collaborator-availability errors so the surrounding service can choose a
/// per-kind retry policy.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum MalformedReportResponse {
    #[error("response is not a report object: {0}")]
    Shape(String),

    #[error("response is missing required field '{0}'")]
    MissingField(&'static str),

    #[error("possible_causes must not be empty")]
    EmptyCauses,

    #[error("unknown urgency level '{0}'")]
    InvalidUrgency(String),

    #[error("cause #{index} is missing field '{field}'")]
    MissingCauseField { index: usize, field: &'static str },

    #[error("cause '{cause}' has unknown severity '{value}'")]
    InvalidSeverity { cause: String, value: String },

    #[error("cause '{cause}' probability {value} is outside [0, 1]")]
    ProbabilityOutOfRange { cause: String, value: f64 },
}
