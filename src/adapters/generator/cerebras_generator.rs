//! Cerebras Generator - ReportGenerator backed by the Cerebras chat API.
//!
//! Talks to an OpenAI-compatible chat-completions endpoint with JSON
//! response format forced, so the reply body is a single JSON document.
//!
//! # Configuration
//!
//! ```ignore
//! let config = CerebrasConfig::new(api_key)
//!     .with_model("llama3.1-8b")
//!     .with_base_url("https://api.cerebras.ai/v1");
//!
//! let generator = CerebrasGenerator::new(config);
//! ```

use async_trait::async_trait;
use reqwest::{Client, Response};
use secrecy::{ExposeSecret, Secret};
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tokio::time::sleep;
use tracing::{debug, warn};

use super::report_prompt::{build_report_prompt, REPORT_SYSTEM_PROMPT};
use crate::domain::report::ReportRequest;
use crate::ports::{GeneratorError, GeneratorInfo, ReportGenerator};

/// Configuration for the Cerebras generator.
#[derive(Debug, Clone)]
pub struct CerebrasConfig {
    /// API key for authentication.
    api_key: Secret<String>,
    /// Model to use (e.g. "llama3.1-8b").
    pub model: String,
    /// Base URL for the API (default: https://api.cerebras.ai/v1).
    pub base_url: String,
    /// Request timeout.
    pub timeout: Duration,
    /// Maximum retries on transient failures.
    pub max_retries: u32,
    /// Completion token budget.
    pub max_tokens: u32,
    /// Sampling temperature. Kept low for consistent clinical output.
    pub temperature: f32,
}

impl CerebrasConfig {
    /// Creates a new configuration with the given API key.
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: Secret::new(api_key.into()),
            model: "llama3.1-8b".to_string(),
            base_url: "https://api.cerebras.ai/v1".to_string(),
            timeout: Duration::from_secs(15),
            max_retries: 2,
            max_tokens: 1500,
            temperature: 0.3,
        }
    }

    /// Sets the model to use.
    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = model.into();
        self
    }

    /// Sets the base URL.
    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = url.into();
        self
    }

    /// Sets the request timeout.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Sets the maximum retry count.
    pub fn with_max_retries(mut self, max_retries: u32) -> Self {
        self.max_retries = max_retries;
        self
    }

    /// Exposes the API key (for making requests).
    fn api_key(&self) -> &str {
        self.api_key.expose_secret()
    }
}

/// Cerebras chat-completions generator.
pub struct CerebrasGenerator {
    config: CerebrasConfig,
    client: Client,
}

impl CerebrasGenerator {
    /// Creates a new generator with the given configuration.
    pub fn new(config: CerebrasConfig) -> Self {
        let client = Client::builder()
            .timeout(config.timeout)
            .build()
            .expect("Failed to create HTTP client");

        Self { config, client }
    }

    /// Builds the chat-completions endpoint URL.
    fn completions_url(&self) -> String {
        format!("{}/chat/completions", self.config.base_url)
    }

    /// Builds the wire request for one report prompt.
    fn to_chat_request(&self, prompt: &str) -> ChatRequest {
        ChatRequest {
            model: self.config.model.clone(),
            messages: vec![
                ChatMessage {
                    role: "system".to_string(),
                    content: REPORT_SYSTEM_PROMPT.to_string(),
                },
                ChatMessage {
                    role: "user".to_string(),
                    content: prompt.to_string(),
                },
            ],
            temperature: self.config.temperature,
            max_tokens: self.config.max_tokens,
            response_format: ResponseFormat {
                format_type: "json_object".to_string(),
            },
        }
    }

    /// Sends a request and maps transport failures.
    async fn send_request(&self, prompt: &str) -> Result<Response, GeneratorError> {
        let chat_request = self.to_chat_request(prompt);

        self.client
            .post(self.completions_url())
            .bearer_auth(self.config.api_key())
            .header("Content-Type", "application/json")
            .json(&chat_request)
            .send()
            .await
            .map_err(|e| {
                if e.is_timeout() {
                    GeneratorError::Timeout {
                        timeout_secs: self.config.timeout.as_secs() as u32,
                    }
                } else if e.is_connect() {
                    GeneratorError::network(format!("Connection failed: {}", e))
                } else {
                    GeneratorError::network(e.to_string())
                }
            })
    }

    /// Maps the response status to the error taxonomy.
    async fn handle_response_status(&self, response: Response) -> Result<Response, GeneratorError> {
        let status = response.status();

        if status.is_success() {
            return Ok(response);
        }

        let error_body = response.text().await.unwrap_or_default();

        match status.as_u16() {
            401 | 403 => Err(GeneratorError::AuthenticationFailed),
            429 => Err(GeneratorError::rate_limited(30)),
            400 => Err(GeneratorError::InvalidRequest(error_body)),
            500..=599 => Err(GeneratorError::unavailable(format!(
                "Server error {}: {}",
                status, error_body
            ))),
            _ => Err(GeneratorError::network(format!(
                "Unexpected status {}: {}",
                status, error_body
            ))),
        }
    }

    /// Parses the completion body into the raw report payload.
    async fn parse_response(&self, response: Response) -> Result<serde_json::Value, GeneratorError> {
        let response = self.handle_response_status(response).await?;

        let chat_response: ChatResponse = response
            .json()
            .await
            .map_err(|e| GeneratorError::parse(format!("Failed to parse response: {}", e)))?;

        let content = chat_response
            .choices
            .into_iter()
            .next()
            .map(|choice| choice.message.content)
            .ok_or_else(|| GeneratorError::parse("response contained no choices"))?;

        parse_payload(&content)
    }

    async fn try_generate(&self, prompt: &str) -> Result<serde_json::Value, GeneratorError> {
        let response = self.send_request(prompt).await?;
        self.parse_response(response).await
    }
}

/// Parses the model's message content as a JSON payload.
fn parse_payload(content: &str) -> Result<serde_json::Value, GeneratorError> {
    serde_json::from_str(content.trim())
        .map_err(|e| GeneratorError::parse(format!("reply is not valid JSON: {}", e)))
}

#[async_trait]
impl ReportGenerator for CerebrasGenerator {
    async fn generate(&self, request: &ReportRequest) -> Result<serde_json::Value, GeneratorError> {
        let prompt = build_report_prompt(request);
        debug!(
            model = %self.config.model,
            prompt_chars = prompt.len(),
            "requesting report generation"
        );

        let mut attempt = 0;
        loop {
            match self.try_generate(&prompt).await {
                Ok(payload) => return Ok(payload),
                Err(err) if err.is_transient() && attempt < self.config.max_retries => {
                    attempt += 1;
                    let backoff = Duration::from_millis(500 * 2u64.pow(attempt));
                    warn!(
                        error = %err,
                        attempt,
                        backoff_ms = backoff.as_millis() as u64,
                        "report generation failed; retrying"
                    );
                    sleep(backoff).await;
                }
                Err(err) => return Err(err),
            }
        }
    }

    fn generator_info(&self) -> GeneratorInfo {
        GeneratorInfo::new("cerebras", self.config.model.clone())
    }
}

// ─────────────────────────────────────────────────────────────────────────
// Wire types (OpenAI-compatible chat completions)
// ─────────────────────────────────────────────────────────────────────────

#[derive(Debug, Serialize)]
struct ChatRequest {
    model: String,
    messages: Vec<ChatMessage>,
    temperature: f32,
    max_tokens: u32,
    response_format: ResponseFormat,
}

#[derive(Debug, Serialize)]
struct ChatMessage {
    role: String,
    content: String,
}

#[derive(Debug, Serialize)]
struct ResponseFormat {
    #[serde(rename = "type")]
    format_type: String,
}

#[derive(Debug, Deserialize)]
struct ChatResponse {
    choices: Vec<ChatChoice>,
}

#[derive(Debug, Deserialize)]
struct ChatChoice {
    message: ChatResponseMessage,
}

#[derive(Debug, Deserialize)]
struct ChatResponseMessage {
    content: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn config_defaults_match_collaborator() {
        let config = CerebrasConfig::new("test-key");
        assert_eq!(config.model, "llama3.1-8b");
        assert_eq!(config.base_url, "https://api.cerebras.ai/v1");
        assert_eq!(config.timeout, Duration::from_secs(15));
        assert_eq!(config.max_retries, 2);
    }

    #[test]
    fn completions_url_appends_path() {
        let generator = CerebrasGenerator::new(
            CerebrasConfig::new("test-key").with_base_url("http://localhost:9999/v1"),
        );
        assert_eq!(
            generator.completions_url(),
            "http://localhost:9999/v1/chat/completions"
        );
    }

    #[test]
    fn chat_request_serializes_with_json_response_format() {
        let generator = CerebrasGenerator::new(CerebrasConfig::new("test-key"));
        let request = generator.to_chat_request("describe the patient");
        let json = serde_json::to_value(&request).unwrap();

        assert_eq!(json["model"], "llama3.1-8b");
        assert_eq!(json["response_format"]["type"], "json_object");
        assert_eq!(json["messages"][0]["role"], "system");
        assert_eq!(json["messages"][1]["content"], "describe the patient");
    }

    #[test]
    fn parse_payload_accepts_trimmed_json() {
        let payload = parse_payload("  {\"urgency_level\": \"green_home_care\"} \n").unwrap();
        assert_eq!(payload["urgency_level"], "green_home_care");
    }

    #[test]
    fn parse_payload_rejects_prose() {
        let err = parse_payload("The patient is probably fine.").unwrap_err();
        assert!(matches!(err, GeneratorError::Parse(_)));
    }

    #[test]
    fn generator_info_names_backend() {
        let generator = CerebrasGenerator::new(CerebrasConfig::new("test-key"));
        let info = generator.generator_info();
        assert_eq!(info.name, "cerebras");
        assert_eq!(info.model, "llama3.1-8b");
    }
}
