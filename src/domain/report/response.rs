//! Validated report structures returned by the generation collaborator.
//!
//! The collaborator returns raw JSON; [`MedicalReport::from_value`] is the
//! single place that turns it into a typed report or rejects it as
//! malformed. Validation is structural only: a non-empty cause list with
//! probabilities in [0, 1] and severities/urgency from the fixed sets.

use serde::{Deserialize, Serialize};

use super::MalformedReportResponse;
use crate::domain::foundation::{Severity, Timestamp, UrgencyLevel};

/// One possible cause in a generated report.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PossibleCause {
    #[serde(default)]
    pub id: Option<String>,
    pub title: String,
    #[serde(default)]
    pub short_description: Option<String>,
    #[serde(default)]
    pub subtitle: Option<String>,
    pub severity: Severity,
    pub probability: f64,
    /// Free-form detail block (about, what-you-can-do-now, warning...).
    /// Passed through untouched; its prose is the collaborator's concern.
    #[serde(default)]
    pub detail: Option<serde_json::Value>,
}

/// A validated assessment report.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MedicalReport {
    #[serde(default)]
    pub assessment_topic: Option<String>,
    #[serde(default)]
    pub summary: Vec<String>,
    pub possible_causes: Vec<PossibleCause>,
    #[serde(default)]
    pub advice: Vec<String>,
    pub urgency_level: UrgencyLevel,
    pub generated_at: Timestamp,
}

#[derive(Debug, Deserialize)]
struct RawReport {
    #[serde(default)]
    assessment_topic: Option<String>,
    #[serde(default)]
    summary: Vec<String>,
    #[serde(default)]
    possible_causes: Vec<RawCause>,
    #[serde(default)]
    advice: Vec<String>,
    #[serde(default)]
    urgency_level: Option<String>,
}

#[derive(Debug, Deserialize)]
struct RawCause {
    #[serde(default)]
    id: Option<String>,
    #[serde(default)]
    title: Option<String>,
    #[serde(default)]
    short_description: Option<String>,
    #[serde(default)]
    subtitle: Option<String>,
    #[serde(default)]
    severity: Option<String>,
    #[serde(default)]
    probability: Option<f64>,
    #[serde(default)]
    detail: Option<serde_json::Value>,
}

impl MedicalReport {
    /// Validates the collaborator's raw payload into a typed report.
    ///
    /// # Errors
    ///
    /// Returns [`MalformedReportResponse`] on any structural violation:
    /// missing or unknown `urgency_level`, an empty `possible_causes`
    /// sequence, or a cause with a missing/unknown severity, a missing
    /// title, or a probability outside [0, 1].
    pub fn from_value(value: serde_json::Value) -> Result<Self, MalformedReportResponse> {
        let raw: RawReport = serde_json::from_value(value)
            .map_err(|e| MalformedReportResponse::Shape(e.to_string()))?;

        let urgency_text = raw
            .urgency_level
            .ok_or(MalformedReportResponse::MissingField("urgency_level"))?;
        let urgency_level = urgency_text
            .parse::<UrgencyLevel>()
            .map_err(|_| MalformedReportResponse::InvalidUrgency(urgency_text.clone()))?;

        if raw.possible_causes.is_empty() {
            return Err(MalformedReportResponse::EmptyCauses);
        }

        let mut possible_causes = Vec::with_capacity(raw.possible_causes.len());
        for (index, cause) in raw.possible_causes.into_iter().enumerate() {
            let title = cause
                .title
                .ok_or(MalformedReportResponse::MissingCauseField {
                    index,
                    field: "title",
                })?;

            let severity_text =
                cause
                    .severity
                    .ok_or(MalformedReportResponse::MissingCauseField {
                        index,
                        field: "severity",
                    })?;
            let severity = severity_text.parse::<Severity>().map_err(|_| {
                MalformedReportResponse::InvalidSeverity {
                    cause: title.clone(),
                    value: severity_text.clone(),
                }
            })?;

            let probability =
                cause
                    .probability
                    .ok_or(MalformedReportResponse::MissingCauseField {
                        index,
                        field: "probability",
                    })?;
            if !(0.0..=1.0).contains(&probability) || probability.is_nan() {
                return Err(MalformedReportResponse::ProbabilityOutOfRange {
                    cause: title,
                    value: probability,
                });
            }

            possible_causes.push(PossibleCause {
                id: cause.id,
                title,
                short_description: cause.short_description,
                subtitle: cause.subtitle,
                severity,
                probability,
                detail: cause.detail,
            });
        }

        Ok(Self {
            assessment_topic: raw.assessment_topic,
            summary: raw.summary,
            possible_causes,
            advice: raw.advice,
            urgency_level,
            generated_at: Timestamp::now(),
        })
    }
}
