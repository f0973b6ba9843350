//! Session aggregate entity.
//!
//! A session is the per-conversation mutable record: the fixed base
//! sequence, the dynamic insertion queue, the append-only answer list, and
//! the completion status.
//!
//! # Invariants
//!
//! - A question identifier appears at most once across base sequence,
//!   insertion queue, and answer list
//! - The insertion queue is append-only and never reordered
//! - Answers are never retracted or edited
//! - Conditional questions enter the sequence only after their trigger
//!   answer is recorded
//! - A completed session accepts no further answers; only the one-time
//!   report slot may still be filled

use serde::{Deserialize, Serialize};
use tracing::warn;

use super::{AnswerRecord, AnswerValue, ProfileHints};
use crate::domain::catalog::QuestionCatalog;
use crate::domain::foundation::{AssessmentStatus, QuestionId, SessionId, Timestamp};
use crate::domain::report::MedicalReport;

/// Per-conversation assessment session.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Session {
    /// Unique identifier for this session.
    id: SessionId,

    /// Base question identifiers fixed at creation.
    base_sequence: Vec<QuestionId>,

    /// Follow-up/conditional questions inserted during the conversation.
    /// First detected, first asked; never reordered.
    insertion_queue: Vec<QuestionId>,

    /// Recorded answers in insertion order.
    answers: Vec<AnswerRecord>,

    /// Symptom names matched against the primary-symptom answer, in match order.
    matched_symptoms: Vec<String>,

    /// Emergency-keyword phrases reported by the patient.
    red_flags: Vec<String>,

    /// Gender-conditional questions are inserted at most once per session.
    conditionals_inserted: bool,

    /// Current status.
    status: AssessmentStatus,

    /// One-time report slot, filled after completion.
    report: Option<MedicalReport>,

    /// When the session was created.
    created_at: Timestamp,

    /// When the session was last updated.
    updated_at: Timestamp,
}

impl Session {
    /// Creates a new session, seeding the effective base sequence.
    ///
    /// Conditional questions whose trigger is not yet decidable are left
    /// out (the engine inserts them once the trigger answer arrives).
    /// Non-compulsory base questions satisfiable from `profile` are recorded
    /// as answered without being asked; a profile value that fails
    /// validation is ignored with a warning rather than failing the start.
    pub fn create(catalog: &QuestionCatalog, profile: Option<&ProfileHints>) -> Self {
        let now = Timestamp::now();
        let mut session = Self {
            id: SessionId::new(),
            base_sequence: Vec::new(),
            insertion_queue: Vec::new(),
            answers: Vec::new(),
            matched_symptoms: Vec::new(),
            red_flags: Vec::new(),
            conditionals_inserted: false,
            status: AssessmentStatus::InProgress,
            report: None,
            created_at: now,
            updated_at: now,
        };

        for question in catalog.base_questions() {
            if let Some(condition) = question.condition() {
                let satisfied = session
                    .answer_for(condition.question())
                    .and_then(|v| v.as_text())
                    .map(|text| condition.is_satisfied_by(text))
                    .unwrap_or(false);
                if !satisfied {
                    continue;
                }
            }

            if !question.is_compulsory() {
                if let Some(value) = profile.and_then(|p| p.get(question.id())) {
                    match value.validate_against(question) {
                        Ok(()) => {
                            session
                                .answers
                                .push(AnswerRecord::new(question.id().clone(), value.clone()));
                            continue;
                        }
                        Err(reason) => {
                            warn!(
                                question = %question.id(),
                                %reason,
                                "ignoring invalid profile value"
                            );
                        }
                    }
                }
            }

            session.base_sequence.push(question.id().clone());
        }

        if let Some(profile) = profile {
            for (id, _) in profile.iter() {
                match catalog.question(id) {
                    None => warn!(question = %id, "profile hint for unknown question ignored"),
                    Some(q) if q.is_compulsory() => {
                        warn!(question = %id, "compulsory question cannot be pre-filled")
                    }
                    Some(_) => {}
                }
            }
        }

        session
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Accessors
    // ─────────────────────────────────────────────────────────────────────────

    /// Returns the session identifier.
    pub fn id(&self) -> &SessionId {
        &self.id
    }

    /// Returns the current status.
    pub fn status(&self) -> AssessmentStatus {
        self.status
    }

    /// Returns the base sequence fixed at creation.
    pub fn base_sequence(&self) -> &[QuestionId] {
        &self.base_sequence
    }

    /// Returns the dynamic insertion queue in arrival order.
    pub fn insertion_queue(&self) -> &[QuestionId] {
        &self.insertion_queue
    }

    /// Iterates the effective sequence: base questions first, then the
    /// insertion queue in arrival order.
    pub fn effective_sequence(&self) -> impl Iterator<Item = &QuestionId> {
        self.base_sequence.iter().chain(self.insertion_queue.iter())
    }

    /// Returns the length of the effective sequence.
    pub fn effective_len(&self) -> usize {
        self.base_sequence.len() + self.insertion_queue.len()
    }

    /// Returns the recorded answers in insertion order.
    pub fn answers(&self) -> &[AnswerRecord] {
        &self.answers
    }

    /// Looks up the recorded answer for a question.
    pub fn answer_for(&self, id: &QuestionId) -> Option<&AnswerValue> {
        self.answers
            .iter()
            .find(|r| r.question() == id)
            .map(|r| r.value())
    }

    /// Returns true if the question has a recorded answer.
    pub fn is_answered(&self, id: &QuestionId) -> bool {
        self.answer_for(id).is_some()
    }

    /// Returns true if the question is anywhere in the session: effective
    /// sequence or answer list. Used to suppress duplicate insertions.
    pub fn contains_question(&self, id: &QuestionId) -> bool {
        self.effective_sequence().any(|q| q == id) || self.is_answered(id)
    }

    /// Returns the first unanswered question of the effective sequence, or
    /// `None` if everything is answered.
    pub fn next_pending(&self) -> Option<&QuestionId> {
        self.effective_sequence().find(|id| !self.is_answered(id))
    }

    /// Returns the symptom names matched so far, in match order.
    pub fn matched_symptoms(&self) -> &[String] {
        &self.matched_symptoms
    }

    /// Returns the emergency-keyword phrases reported by the patient.
    pub fn red_flags(&self) -> &[String] {
        &self.red_flags
    }

    /// Returns true once the gender-conditional questions were inserted.
    pub fn conditionals_inserted(&self) -> bool {
        self.conditionals_inserted
    }

    /// Returns the generated report, if the one-time report step has run.
    pub fn report(&self) -> Option<&MedicalReport> {
        self.report.as_ref()
    }

    /// Returns when the session was created.
    pub fn created_at(&self) -> &Timestamp {
        &self.created_at
    }

    /// Returns when the session was last updated.
    pub fn updated_at(&self) -> &Timestamp {
        &self.updated_at
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Mutations (crate-internal; driven by the questionnaire engine)
    // ─────────────────────────────────────────────────────────────────────────

    /// Appends an answer record. Caller must have validated the value and
    /// the pending-question discipline.
    pub(crate) fn push_answer(&mut self, record: AnswerRecord) {
        self.answers.push(record);
        self.updated_at = Timestamp::now();
    }

    /// Appends question identifiers to the insertion queue.
    pub(crate) fn extend_queue(&mut self, ids: impl IntoIterator<Item = QuestionId>) {
        self.insertion_queue.extend(ids);
        self.updated_at = Timestamp::now();
    }

    /// Records matched symptom names, preserving match order across calls.
    pub(crate) fn note_symptoms(&mut self, names: impl IntoIterator<Item = String>) {
        for name in names {
            if !self.matched_symptoms.contains(&name) {
                self.matched_symptoms.push(name);
            }
        }
    }

    /// Records reported red-flag phrases, de-duplicated.
    pub(crate) fn note_red_flags(&mut self, flags: impl IntoIterator<Item = String>) {
        for flag in flags {
            if !self.red_flags.contains(&flag) {
                self.red_flags.push(flag);
            }
        }
    }

    /// Marks the gender-conditional questions as inserted.
    pub(crate) fn mark_conditionals_inserted(&mut self) {
        self.conditionals_inserted = true;
    }

    /// Transitions the session to Completed.
    pub(crate) fn complete(&mut self) {
        self.status = AssessmentStatus::Completed;
        self.updated_at = Timestamp::now();
    }

    /// Fills the one-time report slot.
    pub(crate) fn set_report(&mut self, report: MedicalReport) {
        self.report = Some(report);
        self.updated_at = Timestamp::now();
    }
}
