//! Port for the document generation collaborator.

use async_trait::async_trait;

use super::define_port_error;

define_port_error! {
    /// Errors raised by generation adapters.
    pub enum CodeGeneratorError {
        /// The collaborator could not be reached.
        Transport { message: String } =>
            "generator transport failed: {message}",
        /// The collaborator took too long to answer.
        Timeout { message: String } =>
            "generator timed out: {message}",
        /// The collaborator answered with a non-success status.
        Status { status: u16, message: String } =>
            "generator returned status {status}: {message}",
        /// The response decoded but carried no usable text.
        NoContent =>
            "generator returned no usable content",
    }
}

/// One completion call: instructions in, raw text out.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GenerationRequest {
    /// System instructions, when the call wants any.
    pub system: Option<String>,
    /// The user-role message.
    pub user: String,
    /// Upper bound on generated tokens.
    pub max_tokens: u32,
}

/// Port for text generation.
///
/// Adapters move text and map failures; prompt assembly and output
/// cleanup belong to the orchestrator.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait CodeGenerator: Send + Sync {
    /// Run one completion and return the raw generated text.
    async fn complete(&self, request: GenerationRequest) -> Result<String, CodeGeneratorError>;
}

/// Fixture generator producing a small deterministic document.
///
/// Used when no generation credentials are configured, so the rest of the
/// system stays explorable.
#[derive(Debug, Default, Clone, Copy)]
pub struct FixtureCodeGenerator;

#[async_trait]
impl CodeGenerator for FixtureCodeGenerator {
    async fn complete(&self, request: GenerationRequest) -> Result<String, CodeGeneratorError> {
        Ok(format!(
            "<!DOCTYPE html>\n<html>\n<head><title>Fixture Creation</title></head>\n\
             <body><p>{}</p></body>\n</html>",
            request.user
        ))
    }
}
