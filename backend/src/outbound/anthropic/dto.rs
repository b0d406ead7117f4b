//! DTOs for the Anthropic messages API.
//!
//! The adapter serialises requests from and decodes responses into these
//! transport DTOs; the domain only ever sees plain text.

use serde::{Deserialize, Serialize};

#[derive(Debug, Serialize)]
pub(super) struct MessagesRequestDto<'a> {
    pub(super) model: &'a str,
    pub(super) max_tokens: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub(super) system: Option<&'a str>,
    pub(super) messages: Vec<MessageDto<'a>>,
}

#[derive(Debug, Serialize)]
pub(super) struct MessageDto<'a> {
    pub(super) role: &'a str,
    pub(super) content: &'a str,
}

#[derive(Debug, Deserialize)]
pub(super) struct MessagesResponseDto {
    #[serde(default)]
    pub(super) content: Vec<ContentBlockDto>,
}

/// One response content block; only `text` blocks carry usable output.
#[derive(Debug, Deserialize)]
pub(super) struct ContentBlockDto {
    #[serde(rename = "type")]
    pub(super) block_type: String,
    #[serde(default)]
    pub(super) text: Option<String>,
}

impl MessagesResponseDto {
    /// Extract the first text block, if the response carries one.
    pub(super) fn into_text(self) -> Option<String> {
        self.content
            .into_iter()
            .find(|block| block.block_type == "text")
            .and_then(|block| block.text)
    }
}
