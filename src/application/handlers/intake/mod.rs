//! Intake command handlers: the boundary operations the core exposes to the
//! surrounding service layer (start, answer, report, end).

mod end_assessment;
mod generate_report;
mod start_assessment;
mod submit_answer;

pub use end_assessment::{EndAssessmentCommand, EndAssessmentHandler};
pub use generate_report::{GenerateReportCommand, GenerateReportError, GenerateReportHandler};
pub use start_assessment::{StartAssessmentCommand, StartAssessmentHandler, StartAssessmentResult};
pub use submit_answer::{SubmitAnswerCommand, SubmitAnswerHandler, SubmitAnswerResult};

#[cfg(test)]
pub(crate) mod testing {
    //! Shared catalog fixture for handler tests.

    use std::sync::Arc;

    use crate::domain::catalog::{
        AnswerType, Applicability, CatalogDocument, DecisionTreeDocument, Designations, Question,
        QuestionCatalog, SymptomEntry,
    };
    use crate::domain::foundation::QuestionId;

    fn qid(s: &str) -> QuestionId {
        QuestionId::new(s).unwrap()
    }

    /// Small catalog: three compulsory and two optional base questions, two
    /// gender conditionals, and fever/headache follow-ups.
    pub(crate) fn test_catalog() -> Arc<QuestionCatalog> {
        let questions = vec![
            Question::new(qid("q_name"), "What is your name?", AnswerType::FreeText)
                .compulsory()
                .demographic(),
            Question::new(qid("q_gender"), "What is your gender?", AnswerType::SingleChoice)
                .with_options(vec!["female".into(), "male".into(), "other".into()])
                .compulsory()
                .demographic(),
            Question::new(qid("q_allergies"), "Any allergies?", AnswerType::FreeText),
            Question::new(qid("q_smoking"), "Do you smoke?", AnswerType::SingleChoice)
                .with_options(vec!["never".into(), "former".into(), "current".into()]),
            Question::new(qid("q_ailment"), "What brings you in?", AnswerType::FreeText)
                .compulsory(),
            Question::new(qid("q_pregnant"), "Are you pregnant?", AnswerType::SingleChoice)
                .with_options(vec!["yes".into(), "no".into(), "unsure".into()])
                .with_condition(Applicability::new(qid("q_gender"), "female")),
            Question::new(qid("q_menstrual"), "Last menstrual period?", AnswerType::FreeText)
                .with_condition(Applicability::new(qid("q_gender"), "female")),
            Question::new(qid("q_fever_temp"), "Measured temperature?", AnswerType::FreeText),
            Question::new(qid("q_fever_pattern"), "Fever pattern?", AnswerType::FreeText),
            Question::new(qid("q_head_onset"), "Headache onset?", AnswerType::FreeText),
        ];
        let document = CatalogDocument {
            questions,
            base_order: vec![
                qid("q_name"),
                qid("q_gender"),
                qid("q_allergies"),
                qid("q_smoking"),
                qid("q_ailment"),
                qid("q_pregnant"),
                qid("q_menstrual"),
            ],
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
                SymptomEntry::new("headache", vec!["headache".into()], vec![qid("q_head_onset")]),
            ],
        };
        Arc::new(QuestionCatalog::load(document, tree).unwrap())
    }
}
