//! Outbound adapters implementing domain ports for external infrastructure.
//!
//! This module follows the hexagonal architecture pattern, providing concrete
//! implementations of domain port traits for various infrastructure concerns:
//!
//! - **persistence**: PostgreSQL-backed repositories using Diesel ORM
//! - **anthropic**: document generation over the Anthropic messages API
//! - **openai**: language detection, translation, and speech transcription
//!   over the OpenAI API
//!
//! Adapters are thin translators that convert between domain types and
//! infrastructure-specific representations. They contain no business logic.

pub mod anthropic;
pub mod openai;
pub mod persistence;
