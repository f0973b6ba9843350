//! Mock Report Generator for testing.
//!
//! Configurable mock implementation of the ReportGenerator port, allowing
//! tests to run without calling the real collaborator.
//!
//! # Features
//!
//! - Pre-configured payloads (consumed in order)
//! - Error injection for resilience testing
//! - Call tracking for verification

use async_trait::async_trait;
use serde_json::json;
use std::collections::VecDeque;
use std::sync::{Arc, Mutex};
use std::time::Duration;
use tokio::time::sleep;

use crate::domain::report::ReportRequest;
use crate::ports::{GeneratorError, GeneratorInfo, ReportGenerator};

/// A configured mock outcome.
#[derive(Debug, Clone)]
pub enum MockOutcome {
    /// Return this payload.
    Payload(serde_json::Value),
    /// Return an error.
    Error(MockGeneratorError),
}

/// Cloneable error shapes for injection.
#[derive(Debug, Clone)]
pub enum MockGeneratorError {
    RateLimited { retry_after_secs: u32 },
    Unavailable { message: String },
    AuthenticationFailed,
    Network { message: String },
    Parse { message: String },
    Timeout { timeout_secs: u32 },
}

impl From<MockGeneratorError> for GeneratorError {
    fn from(err: MockGeneratorError) -> Self {
        match err {
            MockGeneratorError::RateLimited { retry_after_secs } => {
                GeneratorError::rate_limited(retry_after_secs)
            }
            MockGeneratorError::Unavailable { message } => GeneratorError::unavailable(message),
            MockGeneratorError::AuthenticationFailed => GeneratorError::AuthenticationFailed,
            MockGeneratorError::Network { message } => GeneratorError::network(message),
            MockGeneratorError::Parse { message } => GeneratorError::parse(message),
            MockGeneratorError::Timeout { timeout_secs } => {
                GeneratorError::Timeout { timeout_secs }
            }
        }
    }
}

/// Mock report generator.
///
/// Returns queued outcomes in order; once the queue is exhausted it falls
/// back to a minimal valid report payload.
#[derive(Debug, Clone)]
pub struct MockReportGenerator {
    outcomes: Arc<Mutex<VecDeque<MockOutcome>>>,
    calls: Arc<Mutex<Vec<ReportRequest>>>,
    delay: Duration,
}

impl Default for MockReportGenerator {
    fn default() -> Self {
        Self::new()
    }
}

impl MockReportGenerator {
    /// Creates a new mock generator with no queued outcomes.
    pub fn new() -> Self {
        Self {
            outcomes: Arc::new(Mutex::new(VecDeque::new())),
            calls: Arc::new(Mutex::new(Vec::new())),
            delay: Duration::ZERO,
        }
    }

    /// Queues a payload to return.
    pub fn with_payload(self, payload: serde_json::Value) -> Self {
        self.outcomes
            .lock()
            .unwrap()
            .push_back(MockOutcome::Payload(payload));
        self
    }

    /// Queues an error to return.
    pub fn with_error(self, error: MockGeneratorError) -> Self {
        self.outcomes
            .lock()
            .unwrap()
            .push_back(MockOutcome::Error(error));
        self
    }

    /// Sets a simulated latency per call.
    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = delay;
        self
    }

    /// Returns the captured requests.
    pub fn calls(&self) -> Vec<ReportRequest> {
        self.calls.lock().unwrap().clone()
    }

    /// Returns how many times the generator was invoked.
    pub fn call_count(&self) -> usize {
        self.calls.lock().unwrap().len()
    }

    /// A minimal payload that passes report validation.
    pub fn default_payload() -> serde_json::Value {
        json!({
            "assessment_topic": "general_health",
            "summary": ["Assessment completed"],
            "possible_causes": [
                {
                    "id": "generic_condition",
                    "title": "Generic condition",
                    "short_description": "Placeholder cause for tests",
                    "severity": "mild",
                    "probability": 1.0
                }
            ],
            "advice": ["Rest and monitor your symptoms"],
            "urgency_level": "green_home_care"
        })
    }
}

#[async_trait]
impl ReportGenerator for MockReportGenerator {
    async fn generate(&self, request: &ReportRequest) -> Result<serde_json::Value, GeneratorError> {
        if self.delay > Duration::ZERO {
            sleep(self.delay).await;
        }

        self.calls.lock().unwrap().push(request.clone());

        let outcome = self.outcomes.lock().unwrap().pop_front();
        match outcome {
            Some(MockOutcome::Payload(payload)) => Ok(payload),
            Some(MockOutcome::Error(error)) => Err(error.into()),
            None => Ok(Self::default_payload()),
        }
    }

    fn generator_info(&self) -> GeneratorInfo {
        GeneratorInfo::new("mock", "mock-model-1")
    }
}
