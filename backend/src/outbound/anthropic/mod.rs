//! Anthropic outbound adapters.
//!
//! This module provides a thin HTTP implementation of the `CodeGenerator`
//! port against the Anthropic messages API.

mod dto;
mod http_generator;

pub use http_generator::{AnthropicHttpGenerator, AnthropicSettings};
