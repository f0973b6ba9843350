//! AssessmentStatus enum for tracking lifecycle of intake sessions.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Lifecycle status of an intake assessment session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum AssessmentStatus {
    #[default]
    InProgress,
    Completed,
}

impl AssessmentStatus {
    /// Returns true if the session can still accept answers.
    pub fn is_mutable(&self) -> bool {
        matches!(self, AssessmentStatus::InProgress)
    }

    /// Validates a transition from this status to another.
    ///
    /// Valid transitions:
    /// - InProgress -> Completed
    pub fn can_transition_to(&self, target: &AssessmentStatus) -> bool {
        use AssessmentStatus::*;
        matches!((self, target), (InProgress, Completed))
    }
}

impl fmt::Display for AssessmentStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            AssessmentStatus::InProgress => "InProgress",
            AssessmentStatus::Completed => "Completed",
        };
        write!(f, "{}", s)
    }
}
