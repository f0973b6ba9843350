//! Report request assembly.
//!
//! Translates a completed session's answers into the structured request for
//! the external generation collaborator: flat patient info, the ordered
//! narrative Q&A list, and the clinical context of the matched symptoms.

use serde::{Deserialize, Serialize};

use crate::domain::catalog::QuestionCatalog;
use crate::domain::foundation::{QuestionId, UrgencyLevel};
use crate::domain::session::{Session, SessionError};

/// One question/answer pair rendered for the collaborator.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NarrativeEntry {
    pub question: String,
    pub answer: String,
}

/// Flat patient demographics extracted from the answers.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PatientInfo {
    pub name: Option<String>,
    pub age: Option<String>,
    pub gender: Option<String>,
    /// Remaining demographic answers beyond the designated fields.
    #[serde(default)]
    pub other: Vec<NarrativeEntry>,
}

/// Clinical context of a matched symptom, forwarded from the decision tree.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SymptomContext {
    pub name: String,
    pub label: String,
    #[serde(default)]
    pub default_urgency: Option<UrgencyLevel>,
    #[serde(default)]
    pub red_flags: Vec<String>,
}

/// The structured input handed to the report collaborator.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReportRequest {
    pub patient: PatientInfo,
    /// All non-demographic answers in insertion order.
    pub narrative: Vec<NarrativeEntry>,
    /// Matched symptoms in match order, with their decision-tree context.
    #[serde(default)]
    pub symptoms: Vec<SymptomContext>,
    /// Emergency-keyword phrases the patient reported.
    #[serde(default)]
    pub reported_red_flags: Vec<String>,
}

impl ReportRequest {
    /// Assembles the request from a completed session.
    ///
    /// # Errors
    ///
    /// - `NotCompleted` if the session is still in progress
    pub fn assemble(
        session: &Session,
        catalog: &QuestionCatalog,
    ) -> Result<Self, SessionError> {
        if session.status().is_mutable() {
            return Err(SessionError::not_completed());
        }

        let designations = catalog.designations();
        let mut patient = PatientInfo::default();
        let mut narrative = Vec::new();

        let prompt_for = |id: &QuestionId| {
            catalog
                .question(id)
                .map(|q| q.prompt().to_string())
                .unwrap_or_else(|| id.to_string())
        };

        for record in session.answers() {
            let id = record.question();
            let rendered = record.value().to_string();

            if designations.name.as_ref() == Some(id) {
                patient.name = Some(rendered);
            } else if designations.age.as_ref() == Some(id) {
                patient.age = Some(rendered);
            } else if &designations.gender == id {
                patient.gender = Some(rendered);
            } else if catalog.question(id).map(|q| q.is_demographic()).unwrap_or(false) {
                patient.other.push(NarrativeEntry {
                    question: prompt_for(id),
                    answer: rendered,
                });
            } else {
                narrative.push(NarrativeEntry {
                    question: prompt_for(id),
                    answer: rendered,
                });
            }
        }

        let symptoms = session
            .matched_symptoms()
            .iter()
            .filter_map(|name| catalog.symptom_by_name(name))
            .map(|entry| SymptomContext {
                name: entry.name().to_string(),
                label: entry.label().to_string(),
                default_urgency: entry.default_urgency(),
                red_flags: entry.red_flags().to_vec(),
            })
            .collect();

        Ok(Self {
            patient,
            narrative,
            symptoms,
            reported_red_flags: session.red_flags().to_vec(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::catalog::{
        AnswerType, CatalogDocument, DecisionTreeDocument, Designations, Question, SymptomEntry,
    };
    use crate::domain::intake::IntakeEngine;
    use crate::domain::session::AnswerValue;
    use std::sync::Arc;

    fn qid(s: &str) -> QuestionId {
        QuestionId::new(s).unwrap()
    }

    fn engine() -> IntakeEngine {
        let questions = vec![
            Question::new(qid("q_name"), "What is your name?", AnswerType::FreeText)
                .compulsory()
                .demographic(),
            Question::new(qid("q_age"), "How old are you?", AnswerType::Numeric)
                .compulsory()
                .demographic(),
            Question::new(qid("q_gender"), "What is your gender?", AnswerType::SingleChoice)
                .with_options(vec!["female".into(), "male".into(), "other".into()])
                .compulsory()
                .demographic(),
            Question::new(qid("q_occupation"), "What is your occupation?", AnswerType::FreeText)
                .demographic(),
            Question::new(qid("q_ailment"), "What brings you in?", AnswerType::FreeText)
                .compulsory(),
            Question::new(qid("q_fever_temp"), "Measured temperature?", AnswerType::FreeText),
        ];
        let document = CatalogDocument {
            questions,
            base_order: vec![
                qid("q_name"),
                qid("q_age"),
                qid("q_gender"),
                qid("q_occupation"),
                qid("q_ailment"),
            ],
            designations: Designations {
                primary_symptom: qid("q_ailment"),
                gender: qid("q_gender"),
                female_value: "female".into(),
                name: Some(qid("q_name")),
                age: Some(qid("q_age")),
            },
            emergency_keywords: vec![],
        };
        let tree = DecisionTreeDocument {
            symptoms: vec![SymptomEntry::new(
                "fever",
                vec!["fever".into()],
                vec![qid("q_fever_temp")],
            )
            .with_label("Fever")
            .with_default_urgency(UrgencyLevel::YellowDoctorVisit)
            .with_red_flags(vec!["temperature above 40C".into()])],
        };
        IntakeEngine::new(Arc::new(QuestionCatalog::load(document, tree).unwrap()))
    }

    fn completed_session(engine: &IntakeEngine) -> Session {
        let mut session = engine.start(None);
        engine
            .record_answer(&mut session, &qid("q_name"), AnswerValue::Text("Ada".into()))
            .unwrap();
        engine
            .record_answer(&mut session, &qid("q_age"), AnswerValue::Number(34.0))
            .unwrap();
        engine
            .record_answer(&mut session, &qid("q_gender"), AnswerValue::Text("female".into()))
            .unwrap();
        engine
            .record_answer(
                &mut session,
                &qid("q_occupation"),
                AnswerValue::Text("engineer".into()),
            )
            .unwrap();
        engine
            .record_answer(
                &mut session,
                &qid("q_ailment"),
                AnswerValue::Text("a fever since yesterday".into()),
            )
            .unwrap();
        engine
            .record_answer(
                &mut session,
                &qid("q_fever_temp"),
                AnswerValue::Text("38.9 C".into()),
            )
            .unwrap();
        session
    }

    #[test]
    fn assemble_rejects_in_progress_session() {
        let engine = engine();
        let session = engine.start(None);
        let result = ReportRequest::assemble(&session, engine.catalog());
        assert_eq!(result.unwrap_err(), SessionError::NotCompleted);
    }

    #[test]
    fn assemble_extracts_designated_patient_fields() {
        let engine = engine();
        let session = completed_session(&engine);

        let request = ReportRequest::assemble(&session, engine.catalog()).unwrap();

        assert_eq!(request.patient.name.as_deref(), Some("Ada"));
        assert_eq!(request.patient.age.as_deref(), Some("34"));
        assert_eq!(request.patient.gender.as_deref(), Some("female"));
        assert_eq!(request.patient.other.len(), 1);
        assert_eq!(request.patient.other[0].answer, "engineer");
    }

    #[test]
    fn assemble_preserves_narrative_order() {
        let engine = engine();
        let session = completed_session(&engine);

        let request = ReportRequest::assemble(&session, engine.catalog()).unwrap();

        let answers: Vec<&str> = request.narrative.iter().map(|e| e.answer.as_str()).collect();
        assert_eq!(answers, vec!["a fever since yesterday", "38.9 C"]);
        assert_eq!(request.narrative[0].question, "What brings you in?");
    }

    #[test]
    fn assemble_carries_symptom_context() {
        let engine = engine();
        let session = completed_session(&engine);

        let request = ReportRequest::assemble(&session, engine.catalog()).unwrap();

        assert_eq!(request.symptoms.len(), 1);
        let context = &request.symptoms[0];
        assert_eq!(context.name, "fever");
        assert_eq!(context.label, "Fever");
        assert_eq!(context.default_urgency, Some(UrgencyLevel::YellowDoctorVisit));
        assert_eq!(context.red_flags, vec!["temperature above 40C".to_string()]);
    }
}
