//! Shared OpenAI transport client.
//!
//! Owns the reqwest plumbing for both adapters: request dispatch, bearer
//! authentication, status mapping, and response decoding. The adapters map
//! [`OpenAiCallError`] into their own port errors.

use std::time::Duration;

use reqwest::multipart::{Form, Part};
use reqwest::{Client, StatusCode};

use super::dto::{ChatCompletionRequestDto, ChatCompletionResponseDto, TranscriptionResponseDto};
use crate::domain::ports::AudioUpload;

const DEFAULT_BASE_URL: &str = "https://api.openai.com";
const DEFAULT_TIMEOUT_SECONDS: u64 = 60;

/// Connection settings shared by the OpenAI-backed adapters.
#[derive(Debug, Clone)]
pub struct OpenAiSettings {
    /// API origin, without a trailing slash.
    pub base_url: String,
    /// Secret sent as a bearer token.
    pub api_key: String,
    /// End-to-end request timeout.
    pub timeout: Duration,
}

impl OpenAiSettings {
    /// Settings for the hosted API with the given key.
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_owned(),
            api_key: api_key.into(),
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

    /// Override the request timeout.
    #[must_use]
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }
}

/// Failure of one API call, before adapters translate it to a port error.
#[derive(Debug)]
pub(super) enum OpenAiCallError {
    Transport { message: String },
    Status { status: u16, message: String },
    Decode { message: String },
}

/// Transport client performing HTTP POST requests against one API origin.
pub(super) struct OpenAiClient {
    client: Client,
    settings: OpenAiSettings,
}

impl OpenAiClient {
    /// Build a client with an explicit request timeout.
    ///
    /// # Errors
    ///
    /// Returns an error when the reqwest client cannot be constructed.
    pub(super) fn new(settings: OpenAiSettings) -> Result<Self, reqwest::Error> {
        let client = Client::builder().timeout(settings.timeout).build()?;
        Ok(Self { client, settings })
    }

    /// Run one chat completion and return the first choice's content.
    pub(super) async fn chat_completion(
        &self,
        request: &ChatCompletionRequestDto<'_>,
    ) -> Result<String, OpenAiCallError> {
        let response = self
            .client
            .post(format!("{}/v1/chat/completions", self.settings.base_url))
            .bearer_auth(self.settings.api_key.as_str())
            .json(request)
            .send()
            .await
            .map_err(map_transport_error)?;

        let status = response.status();
        let body = response.bytes().await.map_err(map_transport_error)?;
        if !status.is_success() {
            return Err(map_status_error(status, body.as_ref()));
        }

        parse_chat_text(body.as_ref())
    }

    /// Transcribe one audio clip with the named model.
    pub(super) async fn transcription(
        &self,
        audio: AudioUpload,
        model: &str,
    ) -> Result<String, OpenAiCallError> {
        let part = Part::bytes(audio.bytes)
            .file_name(audio.filename)
            .mime_str(&audio.content_type)
            .map_err(|error| OpenAiCallError::Transport {
                message: format!("audio content type was rejected: {error}"),
            })?;
        let form = Form::new().text("model", model.to_owned()).part("file", part);

        let response = self
            .client
            .post(format!("{}/v1/audio/transcriptions", self.settings.base_url))
            .bearer_auth(self.settings.api_key.as_str())
            .multipart(form)
            .send()
            .await
            .map_err(map_transport_error)?;

        let status = response.status();
        let body = response.bytes().await.map_err(map_transport_error)?;
        if !status.is_success() {
            return Err(map_status_error(status, body.as_ref()));
        }

        parse_transcription_text(body.as_ref())
    }
}

fn parse_chat_text(body: &[u8]) -> Result<String, OpenAiCallError> {
    let decoded: ChatCompletionResponseDto =
        serde_json::from_slice(body).map_err(|error| OpenAiCallError::Decode {
            message: error.to_string(),
        })?;
    decoded.into_text().ok_or_else(|| OpenAiCallError::Decode {
        message: "chat completion carried no message content".to_owned(),
    })
}

fn parse_transcription_text(body: &[u8]) -> Result<String, OpenAiCallError> {
    let decoded: TranscriptionResponseDto =
        serde_json::from_slice(body).map_err(|error| OpenAiCallError::Decode {
            message: error.to_string(),
        })?;
    Ok(decoded.text)
}

fn map_transport_error(error: reqwest::Error) -> OpenAiCallError {
    OpenAiCallError::Transport {
        message: error.to_string(),
    }
}

fn map_status_error(status: StatusCode, body: &[u8]) -> OpenAiCallError {
    OpenAiCallError::Status {
        status: status.as_u16(),
        message: body_preview(body),
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
