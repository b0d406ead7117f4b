//! Port for the instruction translation collaborator.

use async_trait::async_trait;

use super::define_port_error;

define_port_error! {
    /// Errors raised by translation adapters.
    pub enum TranslatorError {
        /// The collaborator could not be reached.
        Transport { message: String } =>
            "translator transport failed: {message}",
        /// The collaborator answered with a non-success status.
        Status { status: u16, message: String } =>
            "translator returned status {status}: {message}",
        /// The response body could not be decoded.
        Decode { message: String } =>
            "translator response could not be decoded: {message}",
    }
}

/// What came back from the language gate.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TranslationOutcome {
    /// The instruction to hand to the generator: translated when the
    /// detected language is outside the generator's strong set, otherwise
    /// the original text.
    pub text: String,
    /// Lowercase English name of the detected language.
    pub detected_language: String,
    /// Whether `text` differs from the submitted instruction.
    pub was_translated: bool,
}

/// Port for making instructions legible to the generator.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait Translator: Send + Sync {
    /// Detect the instruction's language and translate it when the
    /// generator would struggle with it.
    async fn ensure_working_language(
        &self,
        text: &str,
    ) -> Result<TranslationOutcome, TranslatorError>;
}

/// Fixture translator that passes instructions through untouched.
#[derive(Debug, Default, Clone, Copy)]
pub struct FixtureTranslator;

#[async_trait]
impl Translator for FixtureTranslator {
    async fn ensure_working_language(
        &self,
        text: &str,
    ) -> Result<TranslationOutcome, TranslatorError> {
        Ok(TranslationOutcome {
            text: text.to_owned(),
            detected_language: "english".to_owned(),
            was_translated: false,
        })
    }
}

#[cfg(test)]
mod tests {
    //! Regression coverage for this module.

    use rstest::rstest;

    use super::*;

    #[rstest]
    #[tokio::test]
    async fn fixture_passes_text_through() {
        let translator = FixtureTranslator;
        let outcome = translator
            .ensure_working_language("make a bouncing ball game")
            .await
            .expect("fixture translation succeeds");
        assert_eq!(outcome.text, "make a bouncing ball game");
        assert_eq!(outcome.detected_language, "english");
        assert!(!outcome.was_translated);
    }

    #[rstest]
    fn status_error_formats_status() {
        let err = TranslatorError::status(500_u16, "upstream exploded");
        assert!(err.to_string().contains("500"));
    }
}
