//! Reqwest-backed document generation adapter.
//!
//! This adapter owns transport details only: request serialisation, timeout
//! and HTTP error mapping, and extraction of the generated text. Prompt
//! assembly and output cleanup stay in the domain.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, StatusCode};

use super::dto::{MessageDto, MessagesRequestDto, MessagesResponseDto};
use crate::domain::ports::{CodeGenerator, CodeGeneratorError, GenerationRequest};

const ANTHROPIC_VERSION: &str = "2023-06-01";
const DEFAULT_BASE_URL: &str = "https://api.anthropic.com";
const DEFAULT_MODEL: &str = "claude-sonnet-4-20250514";
const DEFAULT_TIMEOUT_SECONDS: u64 = 120;

/// Connection settings for the generation collaborator.
#[derive(Debug, Clone)]
pub struct AnthropicSettings {
    /// API origin, without a trailing slash.
    pub base_url: String,
    /// Secret sent in the `x-api-key` header.
    pub api_key: String,
    /// Model identifier submitted with every request.
    pub model: String,
    /// End-to-end request timeout.
    pub timeout: Duration,
}

impl AnthropicSettings {
    /// Settings for the hosted API with the given key and the default model.
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_owned(),
            api_key: api_key.into(),
            model: DEFAULT_MODEL.to_owned(),
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECONDS),
        }
    }

    /// Override the API origin, trimming any trailing slash.
    #[must_use]
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        let base_url = base_url.into();
        self.base_url = base_url.trim_end_matches('/').to_owned();
        self
    }

    /// Override the model identifier.
    #[must_use]
    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = model.into();
        self
    }

    /// Override the request timeout.
    #[must_use]
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }
}

/// Generation adapter that performs HTTP POST requests against one endpoint.
pub struct AnthropicHttpGenerator {
    client: Client,
    settings: AnthropicSettings,
}

impl AnthropicHttpGenerator {
    /// Build an adapter using a reqwest client with an explicit request timeout.
    ///
    /// # Errors
    ///
    /// Returns an error when the reqwest client cannot be constructed.
    pub fn new(settings: AnthropicSettings) -> Result<Self, reqwest::Error> {
        let client = Client::builder().timeout(settings.timeout).build()?;
        Ok(Self { client, settings })
    }
}

#[async_trait]
impl CodeGenerator for AnthropicHttpGenerator {
    async fn complete(&self, request: GenerationRequest) -> Result<String, CodeGeneratorError> {
        let payload = MessagesRequestDto {
            model: &self.settings.model,
            max_tokens: request.max_tokens,
            system: request.system.as_deref(),
            messages: vec![MessageDto {
                role: "user",
                content: &request.user,
            }],
        };

        let response = self
            .client
            .post(format!("{}/v1/messages", self.settings.base_url))
            .header("x-api-key", self.settings.api_key.as_str())
            .header("anthropic-version", ANTHROPIC_VERSION)
            .json(&payload)
            .send()
            .await
            .map_err(map_transport_error)?;

        let status = response.status();
        let body = response.bytes().await.map_err(map_transport_error)?;
        if !status.is_success() {
            return Err(map_status_error(status, body.as_ref()));
        }

        parse_generated_text(body.as_ref())
    }
}

fn parse_generated_text(body: &[u8]) -> Result<String, CodeGeneratorError> {
    let decoded: MessagesResponseDto = serde_json::from_slice(body).map_err(|error| {
        CodeGeneratorError::transport(format!("generator response was not valid JSON: {error}"))
    })?;
    decoded.into_text().ok_or_else(CodeGeneratorError::no_content)
}

fn map_transport_error(error: reqwest::Error) -> CodeGeneratorError {
    if error.is_timeout() {
        CodeGeneratorError::timeout(error.to_string())
    } else {
        CodeGeneratorError::transport(error.to_string())
    }
}

fn map_status_error(status: StatusCode, body: &[u8]) -> CodeGeneratorError {
    match status {
        StatusCode::REQUEST_TIMEOUT | StatusCode::GATEWAY_TIMEOUT => {
            CodeGeneratorError::timeout(format!("status {}", status.as_u16()))
        }
        _ => CodeGeneratorError::status(status.as_u16(), body_preview(body)),
    }
}

fn body_preview(body: &[u8]) -> String {
    const PREVIEW_CHAR_LIMIT: usize = 160;

    let compact = String::from_utf8_lossy(body)
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ");
    let preview = compact.chars().take(PREVIEW_CHAR_LIMIT).collect::<String>();
    if compact.chars().count() > PREVIEW_CHAR_LIMIT {
        format!("{preview}...")
    } else {
        preview
    }
}
