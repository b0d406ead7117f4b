//! OpenAI outbound adapters.
//!
//! This module implements the `Translator` and `Transcriber` ports against
//! the OpenAI API: chat completions for language detection and translation,
//! and the audio endpoint for speech transcription. Both adapters share the
//! transport client in [`client`].

mod client;
mod dto;
mod http_transcriber;
mod http_translator;

pub use client::OpenAiSettings;
pub use http_transcriber::OpenAiHttpTranscriber;
pub use http_translator::OpenAiHttpTranslator;
