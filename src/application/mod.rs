//! Application layer - Use case orchestration.
//!
//! Command handlers wire the domain to the ports: they load sessions from
//! the store, drive the questionnaire engine, and invoke the report
//! collaborator.

pub mod handlers;
