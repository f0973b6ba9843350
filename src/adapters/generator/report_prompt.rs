//! Prompt assembly for the report-generation collaborator.
//!
//! The collaborator is a chat-completion model instructed to return strict
//! JSON. The prompt carries the full assessment data: patient context, the
//! ordered Q&A narrative, and the clinical context of matched symptoms.

use std::fmt::Write;

use crate::domain::report::ReportRequest;

/// System prompt establishing the collaborator's role and output discipline.
pub const REPORT_SYSTEM_PROMPT: &str = "You are a medical AI assistant that generates structured \
medical assessment reports. You are NOT a doctor and do NOT diagnose definitively. Always \
respond in valid JSON format.";

/// The JSON contract the collaborator must honor. Validation of the reply
/// against this contract happens locally after the call.
const OUTPUT_FORMAT: &str = r#"REQUIRED JSON OUTPUT FORMAT:
{
  "assessment_topic": "short topic string",
  "summary": ["Brief clinical point 1", "Brief clinical point 2"],
  "possible_causes": [
    {
      "id": "condition_name_lowercase",
      "title": "Condition Name",
      "short_description": "Brief one-line description",
      "subtitle": "Optional context or common association",
      "severity": "mild|moderate|severe",
      "probability": 0.0,
      "detail": {
        "about_this": ["Explanation point"],
        "what_you_can_do_now": ["Actionable step"],
        "warning": "Optional warning text"
      }
    }
  ],
  "advice": ["Specific actionable recommendation"],
  "urgency_level": "red_emergency|yellow_doctor_visit|green_home_care"
}

IMPORTANT GUIDELINES:
- Be specific and actionable in advice
- Consider patient age and gender in the assessment
- probability values should sum to roughly 1.0 across all causes
- urgency_level must match the clinical urgency context provided
- Keep language clear and patient-friendly
- Do NOT include treatment recommendations requiring diagnosis

Generate the JSON report now:"#;

/// Builds the user prompt for one report request.
pub fn build_report_prompt(request: &ReportRequest) -> String {
    let mut prompt = String::from("=== PATIENT ASSESSMENT DATA ===\n\n");

    if let Some(name) = &request.patient.name {
        let _ = writeln!(prompt, "Patient name: {}", name);
    }
    if let Some(age) = &request.patient.age {
        let _ = writeln!(prompt, "Age: {}", age);
    }
    if let Some(gender) = &request.patient.gender {
        let _ = writeln!(prompt, "Gender: {}", gender);
    }
    for entry in &request.patient.other {
        let _ = writeln!(prompt, "{} {}", entry.question, entry.answer);
    }
    prompt.push('\n');

    for entry in &request.narrative {
        let _ = writeln!(prompt, "Q: {}\nA: {}\n", entry.question, entry.answer);
    }

    if !request.symptoms.is_empty() {
        prompt.push_str("=== SYMPTOM-SPECIFIC MEDICAL CONTEXT ===\n\n");
        for symptom in &request.symptoms {
            let _ = writeln!(prompt, "Symptom: {}", symptom.label);
            if let Some(urgency) = symptom.default_urgency {
                let _ = writeln!(prompt, "Default Urgency: {}", urgency);
            }
            if !symptom.red_flags.is_empty() {
                prompt.push_str("RED FLAGS to watch for:\n");
                for flag in &symptom.red_flags {
                    let _ = writeln!(prompt, "- {}", flag);
                }
            }
            prompt.push('\n');
        }
    }

    if !request.reported_red_flags.is_empty() {
        prompt.push_str("EMERGENCY INDICATORS REPORTED BY THE PATIENT:\n");
        for flag in &request.reported_red_flags {
            let _ = writeln!(prompt, "- {}", flag);
        }
        prompt.push('\n');
    }

    prompt.push_str("=== TASK ===\n");
    prompt.push_str(
        "Based on the patient assessment data above, generate a comprehensive medical report \
in STRICT JSON format.\n\n",
    );
    prompt.push_str(OUTPUT_FORMAT);
    prompt
}
