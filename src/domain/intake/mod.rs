//! Questionnaire engine: symptom detection and conditional insertion.

pub mod detection;
mod engine;

pub use engine::{Advance, IntakeEngine};
