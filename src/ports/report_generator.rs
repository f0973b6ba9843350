//! Report generator port - interface to the external generation collaborator.
//!
//! The collaborator accepts the assembled [`ReportRequest`] and returns a
//! structured causes/advice/urgency payload. The port returns the raw JSON
//! payload; validating its shape is the report assembler's job. This keeps
//! the two failure kinds apart: a [`GeneratorError`] means the collaborator
//! was unavailable or misbehaved at the transport level, while a payload
//! that parses but violates the report contract surfaces later as
//! `MalformedReportResponse`.
//!
//! There is no internal retry loop beyond an adapter's transient-failure
//! budget: the call is made at most once per completed session and a
//! failure is surfaced to the caller.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::domain::report::ReportRequest;

/// Port for the external report-generation collaborator.
#[async_trait]
pub trait ReportGenerator: Send + Sync {
    /// Generates a report payload for the given request.
    async fn generate(&self, request: &ReportRequest) -> Result<serde_json::Value, GeneratorError>;

    /// Returns information about the backing generator.
    fn generator_info(&self) -> GeneratorInfo;
}

/// Generator identification for logging and health reporting.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GeneratorInfo {
    /// Generator name (e.g. "cerebras", "mock").
    pub name: String,
    /// Model identifier (e.g. "llama3.1-8b").
    pub model: String,
}

impl GeneratorInfo {
    /// Creates new generator info.
    pub fn new(name: impl Into<String>, model: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            model: model.into(),
        }
    }
}

/// Collaborator availability/transport errors.
#[derive(Debug, thiserror::Error)]
pub enum GeneratorError {
    /// Rate limited by the collaborator.
    #[error("rate limited: retry after {retry_after_secs}s")]
    RateLimited {
        /// Seconds until retry is allowed.
        retry_after_secs: u32,
    },

    /// Collaborator is unavailable.
    #[error("generator unavailable: {message}")]
    Unavailable {
        /// Error details.
        message: String,
    },

    /// API key or authentication failed.
    #[error("authentication failed")]
    AuthenticationFailed,

    /// Network error during the request.
    #[error("network error: {0}")]
    Network(String),

    /// The collaborator's reply was not parseable JSON at all.
    #[error("parse error: {0}")]
    Parse(String),

    /// Invalid request configuration.
    #[error("invalid request: {0}")]
    InvalidRequest(String),

    /// Request timed out.
    #[error("request timed out after {timeout_secs}s")]
    Timeout {
        /// Configured timeout.
        timeout_secs: u32,
    },
}

impl GeneratorError {
    /// Creates a rate limited error.
    pub fn rate_limited(retry_after_secs: u32) -> Self {
        Self::RateLimited { retry_after_secs }
    }

    /// Creates an unavailable error.
    pub fn unavailable(message: impl Into<String>) -> Self {
        Self::Unavailable {
            message: message.into(),
        }
    }

    /// Creates a network error.
    pub fn network(message: impl Into<String>) -> Self {
        Self::Network(message.into())
    }

    /// Creates a parse error.
    pub fn parse(message: impl Into<String>) -> Self {
        Self::Parse(message.into())
    }

    /// Returns true if a retry may succeed (transient failure).
    pub fn is_transient(&self) -> bool {
        matches!(
            self,
            GeneratorError::Unavailable { .. }
                | GeneratorError::Network(_)
                | GeneratorError::Timeout { .. }
        )
    }
}
