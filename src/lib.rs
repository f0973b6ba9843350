//! Intake Engine - Medical Intake Assessment Core
//!
//! This crate implements a deterministic, per-session questionnaire state
//! machine for multi-turn medical intake conversations: a static question
//! catalog with a symptom decision tree, symptom detection against free-text
//! answers, conditional question insertion, and assembly of the structured
//! report request handed to an external generation collaborator.

pub mod adapters;
pub mod application;
pub mod config;
pub mod domain;
pub mod ports;
pub mod telemetry;
