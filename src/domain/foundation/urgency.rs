//! UrgencyLevel - triage urgency classification.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Triage urgency level attached to a generated report and to decision-tree
/// symptom entries as a default classification.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum UrgencyLevel {
    GreenHomeCare,
    YellowDoctorVisit,
    RedEmergency,
}

impl UrgencyLevel {
    /// The canonical wire representation of this level.
    pub fn as_str(&self) -> &'static str {
        match self {
            UrgencyLevel::GreenHomeCare => "green_home_care",
            UrgencyLevel::YellowDoctorVisit => "yellow_doctor_visit",
            UrgencyLevel::RedEmergency => "red_emergency",
        }
    }
}

impl fmt::Display for UrgencyLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for UrgencyLevel {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "green_home_care" => Ok(UrgencyLevel::GreenHomeCare),
            "yellow_doctor_visit" => Ok(UrgencyLevel::YellowDoctorVisit),
            "red_emergency" => Ok(UrgencyLevel::RedEmergency),
            other => Err(format!("unknown urgency level: {}", other)),
        }
    }
}
