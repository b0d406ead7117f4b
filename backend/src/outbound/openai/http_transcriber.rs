//! Whisper-backed speech transcription adapter.

use async_trait::async_trait;

use super::client::{OpenAiCallError, OpenAiClient, OpenAiSettings};
use crate::domain::ports::{AudioUpload, Transcriber, TranscriberError};

const TRANSCRIPTION_MODEL: &str = "whisper-1";

/// Transcription adapter posting audio clips to the OpenAI audio endpoint.
///
/// The language is left for the model to detect, so spoken instructions in
/// any language come back as text in that language.
pub struct OpenAiHttpTranscriber {
    client: OpenAiClient,
}

impl OpenAiHttpTranscriber {
    /// Build an adapter using a reqwest client with an explicit request timeout.
    ///
    /// # Errors
    ///
    /// Returns an error when the reqwest client cannot be constructed.
    pub fn new(settings: OpenAiSettings) -> Result<Self, reqwest::Error> {
        Ok(Self {
            client: OpenAiClient::new(settings)?,
        })
    }
}

#[async_trait]
impl Transcriber for OpenAiHttpTranscriber {
    async fn transcribe(&self, audio: AudioUpload) -> Result<String, TranscriberError> {
        self.client
            .transcription(audio, TRANSCRIPTION_MODEL)
            .await
            .map_err(map_call_error)
    }
}

fn map_call_error(error: OpenAiCallError) -> TranscriberError {
    match error {
        OpenAiCallError::Transport { message } => TranscriberError::transport(message),
        OpenAiCallError::Status { status, message } => TranscriberError::status(status, message),
        OpenAiCallError::Decode { message } => TranscriberError::decode(message),
    }
}
