//! Chat-completion-backed language gate.
//!
//! Detects the instruction's language and translates it to English when the
//! generator handles the detected language poorly. Detection failures fall
//! back to "english" and translation failures fall back to the original
//! text, so an unreachable language service degrades to passing instructions
//! through rather than blocking generation.

use async_trait::async_trait;
use tracing::{debug, warn};

use super::client::{OpenAiClient, OpenAiSettings};
use super::dto::{ChatCompletionRequestDto, ChatMessageDto};
use crate::domain::ports::{TranslationOutcome, Translator, TranslatorError};

const CHAT_MODEL: &str = "gpt-4o-mini";
const DETECTION_MAX_TOKENS: u32 = 20;
const TRANSLATION_MAX_TOKENS: u32 = 500;
const FALLBACK_LANGUAGE: &str = "english";

const DETECTION_SYSTEM_PROMPT: &str =
    "You are a language detection assistant. Identify the language of the given text.\n\
     Reply with ONLY the language name in lowercase English (e.g., \"english\", \"spanish\", \
     \"arabic\", \"chinese\", \"japanese\").\n\
     Do not include any other text, punctuation, or explanation.";

/// Languages the generator handles well enough to skip translation.
const STRONG_LANGUAGES: &[&str] = &[
    "english",
    "spanish",
    "portuguese",
    "french",
    "german",
    "italian",
    "dutch",
    "russian",
    "chinese",
    "japanese",
    "korean",
    "arabic",
    "hindi",
    "bengali",
    "indonesian",
    "turkish",
    "vietnamese",
    "thai",
    "polish",
    "ukrainian",
    "swedish",
    "norwegian",
    "danish",
    "finnish",
    "czech",
    "greek",
    "hebrew",
    "romanian",
    "hungarian",
    "swahili",
];

/// Language gate backed by OpenAI chat completions.
pub struct OpenAiHttpTranslator {
    client: OpenAiClient,
}

impl OpenAiHttpTranslator {
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

    async fn detect_language(&self, text: &str) -> String {
        let request = ChatCompletionRequestDto {
            model: CHAT_MODEL,
            messages: vec![
                ChatMessageDto {
                    role: "system",
                    content: DETECTION_SYSTEM_PROMPT,
                },
                ChatMessageDto {
                    role: "user",
                    content: text,
                },
            ],
            max_tokens: DETECTION_MAX_TOKENS,
            temperature: 0.0,
        };

        match self.client.chat_completion(&request).await {
            Ok(raw) => {
                let detected = raw.trim().to_lowercase();
                if detected.is_empty() {
                    FALLBACK_LANGUAGE.to_owned()
                } else {
                    detected
                }
            }
            Err(error) => {
                warn!(error = ?error, "language detection failed, assuming english");
                FALLBACK_LANGUAGE.to_owned()
            }
        }
    }

    async fn translate_to_english(&self, text: &str, source_language: &str) -> String {
        let system = translation_system_prompt(source_language);
        let request = ChatCompletionRequestDto {
            model: CHAT_MODEL,
            messages: vec![
                ChatMessageDto {
                    role: "system",
                    content: &system,
                },
                ChatMessageDto {
                    role: "user",
                    content: text,
                },
            ],
            max_tokens: TRANSLATION_MAX_TOKENS,
            temperature: 0.3,
        };

        match self.client.chat_completion(&request).await {
            Ok(raw) => {
                let translated = raw.trim().to_owned();
                if translated.is_empty() {
                    text.to_owned()
                } else {
                    translated
                }
            }
            Err(error) => {
                warn!(
                    error = ?error,
                    source_language,
                    "translation failed, keeping the original text"
                );
                text.to_owned()
            }
        }
    }
}

#[async_trait]
impl Translator for OpenAiHttpTranslator {
    async fn ensure_working_language(
        &self,
        text: &str,
    ) -> Result<TranslationOutcome, TranslatorError> {
        let detected_language = self.detect_language(text).await;
        if is_strong_language(&detected_language) {
            return Ok(TranslationOutcome {
                text: text.to_owned(),
                detected_language,
                was_translated: false,
            });
        }

        debug!(
            detected_language = %detected_language,
            "translating the instruction for the generator"
        );
        let translated = self.translate_to_english(text, &detected_language).await;
        let was_translated = translated != text;
        Ok(TranslationOutcome {
            text: translated,
            detected_language,
            was_translated,
        })
    }
}

/// Whether the detected language is on the strong list.
///
/// Matches substrings in both directions so regional answers such as
/// "brazilian portuguese" and truncated answers still hit their entry.
fn is_strong_language(language: &str) -> bool {
    let normalized = language.trim().to_lowercase();
    STRONG_LANGUAGES
        .iter()
        .any(|strong| normalized.contains(strong) || strong.contains(normalized.as_str()))
}

fn translation_system_prompt(source_language: &str) -> String {
    format!(
        "You are a translator. Translate the following {source_language} text to English.\n\
         This is a child's request to create a game or interactive web page.\n\
         Translate accurately but keep it simple and clear.\n\
         Reply with ONLY the English translation, no explanations or notes."
    )
}

#[cfg(test)]
mod tests {
    //! Regression coverage for the language gate helpers.

    use rstest::rstest;

    use super::*;

    #[rstest]
    #[case::exact("spanish", true)]
    #[case::shouting("  ENGLISH ", true)]
    #[case::regional_variant("brazilian portuguese", true)]
    #[case::qualified("mandarin chinese", true)]
    #[case::truncated_reply("portugu", true)]
    #[case::unsupported("klingon", false)]
    #[case::unsupported_phrase("ancient sumerian", false)]
    fn strong_language_matching_is_forgiving(#[case] language: &str, #[case] expected: bool) {
        assert_eq!(is_strong_language(language), expected);
    }

    #[test]
    fn translation_prompt_names_the_source_language() {
        let prompt = translation_system_prompt("icelandic");
        assert!(prompt.contains("the following icelandic text to English"));
        assert!(prompt.contains("ONLY the English translation"));
    }

    #[test]
    fn detection_prompt_demands_a_bare_lowercase_name() {
        assert!(DETECTION_SYSTEM_PROMPT.contains("ONLY the language name in lowercase English"));
    }
}
