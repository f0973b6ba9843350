//! Questionnaire engine - the core per-session state machine.
//!
//! Given a session and a new answer, the engine decides the next question:
//! it records the answer, runs symptom and gender detection, splices any new
//! questions into the pending queue, and signals completion once the
//! effective sequence is exhausted.
//!
//! Every `record_answer` is transactional: all checks happen before any
//! mutation, so a rejected answer leaves the session untouched and an
//! accepted answer applies fully, insertions included.

use std::sync::Arc;

use tracing::{debug, info};

use super::detection;
use crate::domain::catalog::{normalize_term, Question, QuestionCatalog};
use crate::domain::foundation::QuestionId;
use crate::domain::session::{AnswerRecord, AnswerValue, ProfileHints, Session, SessionError};

/// Outcome of recording an answer.
#[derive(Debug, Clone, PartialEq)]
pub enum Advance {
    /// The next question to ask.
    Next(Question),
    /// The effective sequence is exhausted; the session is completed.
    Completed,
}

/// The questionnaire engine. Holds the shared read-only catalog; all
/// per-conversation state lives in the [`Session`].
#[derive(Debug, Clone)]
pub struct IntakeEngine {
    catalog: Arc<QuestionCatalog>,
}

impl IntakeEngine {
    /// Creates an engine over the given catalog.
    pub fn new(catalog: Arc<QuestionCatalog>) -> Self {
        Self { catalog }
    }

    /// Returns the catalog this engine operates on.
    pub fn catalog(&self) -> &Arc<QuestionCatalog> {
        &self.catalog
    }

    /// Starts a new session, seeding the base sequence from the catalog and
    /// pre-filling what the profile already answers.
    pub fn start(&self, profile: Option<&ProfileHints>) -> Session {
        let session = Session::create(&self.catalog, profile);
        info!(
            session = %session.id(),
            base_questions = session.base_sequence().len(),
            prefilled = session.answers().len(),
            "assessment session started"
        );
        session
    }

    /// Returns the currently pending question of a session.
    pub fn pending_question(&self, session: &Session) -> Option<Question> {
        session
            .next_pending()
            .map(|id| self.resolve(id).clone())
    }

    /// Records an answer for the currently pending question and computes
    /// what comes next.
    ///
    /// # Errors
    ///
    /// - `AlreadyCompleted` if the session no longer accepts answers
    /// - `OutOfOrder` if `question_id` is not the pending question
    /// - `InvalidAnswer` if the value fails the question's constraints
    ///
    /// All failures leave the session unchanged.
    pub fn record_answer(
        &self,
        session: &mut Session,
        question_id: &QuestionId,
        value: AnswerValue,
    ) -> Result<Advance, SessionError> {
        if !session.status().is_mutable() {
            return Err(SessionError::already_completed());
        }

        let pending = session.next_pending().cloned();
        if pending.as_ref() != Some(question_id) {
            return Err(SessionError::out_of_order(pending, question_id.clone()));
        }

        let question = self.resolve(question_id);
        value
            .validate_against(question)
            .map_err(|reason| SessionError::invalid_answer(question_id.clone(), reason))?;

        // All checks passed; compute the insertions before touching state.
        let designations = self.catalog.designations();
        let mut additions: Vec<QuestionId> = Vec::new();
        let mut symptoms: Vec<String> = Vec::new();
        let mut red_flags: Vec<String> = Vec::new();
        let mut conditionals_triggered = false;

        if question_id == &designations.primary_symptom {
            if let Some(text) = value.as_text() {
                let normalized = normalize_term(text);
                for entry in detection::match_symptoms(&self.catalog, &normalized) {
                    symptoms.push(entry.name().to_string());
                    for follow_up in entry.follow_ups() {
                        if !session.contains_question(follow_up)
                            && !additions.contains(follow_up)
                        {
                            additions.push(follow_up.clone());
                        }
                    }
                }
                red_flags = detection::match_emergency(&self.catalog, &normalized);
            }
        }

        if question_id == &designations.gender && !session.conditionals_inserted() {
            if let Some(text) = value.as_text() {
                let conditionals = self
                    .catalog
                    .conditional_questions_for(&designations.gender, text);
                if !conditionals.is_empty() {
                    conditionals_triggered = true;
                    for question in conditionals {
                        if !session.contains_question(question.id())
                            && !additions.contains(question.id())
                        {
                            additions.push(question.id().clone());
                        }
                    }
                }
            }
        }

        // Apply: from here on nothing can fail.
        session.push_answer(AnswerRecord::new(question_id.clone(), value));
        if !symptoms.is_empty() {
            debug!(
                session = %session.id(),
                symptoms = ?symptoms,
                inserted = additions.len(),
                "symptom follow-ups queued"
            );
            session.note_symptoms(symptoms);
        }
        if !red_flags.is_empty() {
            session.note_red_flags(red_flags);
        }
        if conditionals_triggered {
            session.mark_conditionals_inserted();
        }
        if !additions.is_empty() {
            session.extend_queue(additions);
        }

        match session.next_pending() {
            Some(id) => Ok(Advance::Next(self.resolve(id).clone())),
            None => {
                session.complete();
                info!(
                    session = %session.id(),
                    answered = session.answers().len(),
                    "assessment completed"
                );
                Ok(Advance::Completed)
            }
        }
    }

    /// Resolves a sequence identifier against the catalog.
    ///
    /// Sequence entries only ever come from the validated catalog, so the
    /// lookup cannot fail.
    fn resolve(&self, id: &QuestionId) -> &Question {
        self.catalog
            .question(id)
            .expect("sequence entries must resolve against the catalog")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::catalog::{
        AnswerType, Applicability, CatalogDocument, DecisionTreeDocument, Designations,
        SymptomEntry,
    };
    use crate::domain::foundation::AssessmentStatus;

    fn qid(s: &str) -> QuestionId {
        QuestionId::new(s).unwrap()
    }

    /// Base: name, gender, ailment. Follow-ups for fever/chills/headache,
    /// with one question shared between fever and chills. Two conditionals
    /// on gender=female.
    fn engine() -> IntakeEngine {
        build_engine(vec![
            qid("q_name"),
            qid("q_gender"),
            qid("q_ailment"),
            qid("q_pregnant"),
            qid("q_menstrual"),
        ])
    }

    fn engine_with_symptom_before_gender() -> IntakeEngine {
        build_engine(vec![
            qid("q_name"),
            qid("q_ailment"),
            qid("q_gender"),
            qid("q_pregnant"),
            qid("q_menstrual"),
        ])
    }

    fn build_engine(base_order: Vec<QuestionId>) -> IntakeEngine {
        let questions = vec![
            Question::new(qid("q_name"), "What is your name?", AnswerType::FreeText)
                .compulsory()
                .demographic(),
            Question::new(qid("q_gender"), "What is your gender?", AnswerType::SingleChoice)
                .with_options(vec!["female".into(), "male".into(), "other".into()])
                .compulsory()
                .demographic(),
            Question::new(qid("q_ailment"), "What brings you in?", AnswerType::FreeText)
                .compulsory(),
            Question::new(qid("q_fever_temp"), "Measured temperature?", AnswerType::FreeText),
            Question::new(qid("q_fever_pattern"), "Fever pattern?", AnswerType::FreeText),
            Question::new(qid("q_chills_sweats"), "Night sweats?", AnswerType::FreeText),
            Question::new(qid("q_head_onset"), "Headache onset?", AnswerType::FreeText),
            Question::new(qid("q_pregnant"), "Are you pregnant?", AnswerType::SingleChoice)
                .with_options(vec!["yes".into(), "no".into(), "unsure".into()])
                .with_condition(Applicability::new(qid("q_gender"), "female")),
            Question::new(qid("q_menstrual"), "Last menstrual period?", AnswerType::FreeText)
                .with_condition(Applicability::new(qid("q_gender"), "female")),
        ];
        let document = CatalogDocument {
            questions,
            base_order,
            designations: Designations {
                primary_symptom: qid("q_ailment"),
                gender: qid("q_gender"),
                female_value: "female".into(),
                name: Some(qid("q_name")),
                age: None,
            },
            emergency_keywords: vec!["severe bleeding".into()],
        };
        let tree = DecisionTreeDocument {
            symptoms: vec![
                SymptomEntry::new(
                    "fever",
                    vec!["fever".into()],
                    vec![qid("q_fever_temp"), qid("q_fever_pattern")],
                ),
                SymptomEntry::new(
                    "chills",
                    // shares q_fever_temp with fever
                    vec!["chills".into()],
                    vec![qid("q_fever_temp"), qid("q_chills_sweats")],
                ),
                SymptomEntry::new("headache", vec!["headache".into()], vec![qid("q_head_onset")]),
            ],
        };
        let catalog = QuestionCatalog::load(document, tree).unwrap();
        IntakeEngine::new(Arc::new(catalog))
    }

    fn answer_text(
        engine: &IntakeEngine,
        session: &mut Session,
        id: &str,
        text: &str,
    ) -> Advance {
        engine
            .record_answer(session, &qid(id), AnswerValue::Text(text.into()))
            .unwrap()
    }

    #[test]
    fn walks_base_sequence_in_order() {
        let engine = engine();
        let mut session = engine.start(None);

        assert_eq!(session.next_pending(), Some(&qid("q_name")));
        let next = answer_text(&engine, &mut session, "q_name", "Ada");
        assert_eq!(next, Advance::Next(engine.catalog().question(&qid("q_gender")).unwrap().clone()));
    }

    #[test]
    fn primary_symptom_answer_queues_follow_ups_in_match_order() {
        let engine = engine();
        let mut session = engine.start(None);

        answer_text(&engine, &mut session, "q_name", "Ada");
        answer_text(&engine, &mut session, "q_gender", "male");
        answer_text(&engine, &mut session, "q_ailment", "fever and chills all night");

        // fever first: its two follow-ups, then chills-only (shared one suppressed)
        assert_eq!(
            session.insertion_queue(),
            &[qid("q_fever_temp"), qid("q_fever_pattern"), qid("q_chills_sweats")]
        );
        assert_eq!(session.matched_symptoms(), &["fever", "chills"]);

        // no duplicates anywhere in the effective sequence
        let mut seen = std::collections::HashSet::new();
        assert!(session.effective_sequence().all(|id| seen.insert(id.clone())));
    }

    #[test]
    fn later_keyword_loses_shared_follow_up_to_earlier_keyword() {
        let engine = engine();
        let mut session = engine.start(None);

        answer_text(&engine, &mut session, "q_name", "Ada");
        answer_text(&engine, &mut session, "q_gender", "male");
        answer_text(&engine, &mut session, "q_ailment", "chills then fever");

        // chills matched first: its ordering wins the shared question
        assert_eq!(
            session.insertion_queue(),
            &[qid("q_fever_temp"), qid("q_chills_sweats"), qid("q_fever_pattern")]
        );
    }

    #[test]
    fn male_gender_answer_never_inserts_conditionals() {
        let engine = engine();
        let mut session = engine.start(None);

        answer_text(&engine, &mut session, "q_name", "Ada");
        answer_text(&engine, &mut session, "q_gender", "male");
        answer_text(&engine, &mut session, "q_ailment", "fever and headache");

        // conditionals were filtered from base (gender unknown at creation);
        // the male answer did not insert them either
        assert!(!session.contains_question(&qid("q_pregnant")));
        assert_eq!(session.insertion_queue().len(), 3); // fever x2 + headache

        while let Some(id) = session.next_pending().cloned() {
            answer_text(&engine, &mut session, id.as_str(), "some detail");
        }
        assert_eq!(session.status(), AssessmentStatus::Completed);
        assert!(!session.contains_question(&qid("q_pregnant")));
    }

    #[test]
    fn gender_female_inserts_conditionals_exactly_once() {
        let engine = engine();
        let mut session = engine.start(None);

        answer_text(&engine, &mut session, "q_name", "Ada");
        answer_text(&engine, &mut session, "q_gender", "Female");

        assert!(session.conditionals_inserted());
        assert_eq!(
            session.insertion_queue(),
            &[qid("q_pregnant"), qid("q_menstrual")]
        );

        answer_text(&engine, &mut session, "q_ailment", "fever");
        // symptom follow-ups land after the already-queued conditionals
        assert_eq!(
            session.insertion_queue(),
            &[
                qid("q_pregnant"),
                qid("q_menstrual"),
                qid("q_fever_temp"),
                qid("q_fever_pattern")
            ]
        );
    }

    #[test]
    fn gender_after_symptom_matches_places_conditionals_last() {
        // catalog variant with the primary-symptom question ahead of gender,
        // so symptom follow-ups are already queued when gender arrives
        let engine = engine_with_symptom_before_gender();
        let mut session = engine.start(None);

        answer_text(&engine, &mut session, "q_name", "Ada");
        answer_text(&engine, &mut session, "q_ailment", "fever and chills");
        answer_text(&engine, &mut session, "q_gender", "female");

        assert_eq!(
            session.insertion_queue(),
            &[
                qid("q_fever_temp"),
                qid("q_fever_pattern"),
                qid("q_chills_sweats"),
                qid("q_pregnant"),
                qid("q_menstrual")
            ]
        );
        assert!(session.conditionals_inserted());
    }

    #[test]
    fn out_of_order_answer_rejected_without_mutation() {
        let engine = engine();
        let mut session = engine.start(None);

        let result = engine.record_answer(
            &mut session,
            &qid("q_gender"),
            AnswerValue::Text("female".into()),
        );

        assert!(matches!(
            result,
            Err(SessionError::OutOfOrder { ref expected, .. }) if expected == &Some(qid("q_name"))
        ));
        assert!(session.answers().is_empty());
        assert_eq!(session.next_pending(), Some(&qid("q_name")));
    }

    #[test]
    fn invalid_answer_value_rejected_without_mutation() {
        let engine = engine();
        let mut session = engine.start(None);

        answer_text(&engine, &mut session, "q_name", "Ada");
        let result = engine.record_answer(
            &mut session,
            &qid("q_gender"),
            AnswerValue::Text("robot".into()),
        );

        assert!(matches!(result, Err(SessionError::InvalidAnswer { .. })));
        assert_eq!(session.answers().len(), 1);
        assert_eq!(session.next_pending(), Some(&qid("q_gender")));
        assert!(session.insertion_queue().is_empty());
    }

    #[test]
    fn completed_session_rejects_further_answers() {
        let engine = engine();
        let mut session = engine.start(None);

        answer_text(&engine, &mut session, "q_name", "Ada");
        answer_text(&engine, &mut session, "q_gender", "male");
        let advance = answer_text(&engine, &mut session, "q_ailment", "stubbed toe");
        assert_eq!(advance, Advance::Completed);
        assert_eq!(session.status(), AssessmentStatus::Completed);

        let result = engine.record_answer(
            &mut session,
            &qid("q_ailment"),
            AnswerValue::Text("again".into()),
        );
        assert_eq!(result, Err(SessionError::AlreadyCompleted));
    }

    #[test]
    fn emergency_keywords_recorded_as_red_flags() {
        let engine = engine();
        let mut session = engine.start(None);

        answer_text(&engine, &mut session, "q_name", "Ada");
        answer_text(&engine, &mut session, "q_gender", "male");
        answer_text(
            &engine,
            &mut session,
            "q_ailment",
            "headache with severe bleeding from the nose",
        );

        assert_eq!(session.red_flags(), &["severe bleeding".to_string()]);
    }

    #[test]
    fn non_primary_free_text_answers_are_not_scanned() {
        let engine = engine();
        let mut session = engine.start(None);

        // "fever" in the name must not queue follow-ups
        answer_text(&engine, &mut session, "q_name", "Mr Fever");
        assert!(session.insertion_queue().is_empty());
        assert!(session.matched_symptoms().is_empty());
    }

    #[test]
    fn completes_only_after_inserted_questions_are_answered() {
        let engine = engine();
        let mut session = engine.start(None);

        answer_text(&engine, &mut session, "q_name", "Ada");
        answer_text(&engine, &mut session, "q_gender", "male");
        let advance = answer_text(&engine, &mut session, "q_ailment", "fever");
        assert!(matches!(advance, Advance::Next(_)));

        answer_text(&engine, &mut session, "q_fever_temp", "38.5 this morning");
        let advance = answer_text(&engine, &mut session, "q_fever_pattern", "worse at night");
        assert_eq!(advance, Advance::Completed);
    }
}
