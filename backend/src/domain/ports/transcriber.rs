//! Port for the speech transcription collaborator.

use async_trait::async_trait;

use super::define_port_error;

define_port_error! {
    /// Errors raised by transcription adapters.
    pub enum TranscriberError {
        /// The collaborator could not be reached.
        Transport { message: String } =>
            "transcriber transport failed: {message}",
        /// The collaborator answered with a non-success status.
        Status { status: u16, message: String } =>
            "transcriber returned status {status}: {message}",
        /// The response body could not be decoded.
        Decode { message: String } =>
            "transcriber response could not be decoded: {message}",
    }
}

/// A recorded audio clip as it arrived at the edge.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AudioUpload {
    pub bytes: Vec<u8>,
    pub filename: String,
    pub content_type: String,
}

/// Port for turning recorded speech into instruction text.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait Transcriber: Send + Sync {
    /// Transcribe one audio clip.
    async fn transcribe(&self, audio: AudioUpload) -> Result<String, TranscriberError>;
}

/// Fixture transcriber returning empty text.
#[derive(Debug, Default, Clone, Copy)]
pub struct FixtureTranscriber;

#[async_trait]
impl Transcriber for FixtureTranscriber {
    async fn transcribe(&self, _audio: AudioUpload) -> Result<String, TranscriberError> {
        Ok(String::new())
    }
}
