//! HTTP server configuration: environment-driven settings loaded via
//! OrthoConfig plus the runtime configuration object.

use std::net::{AddrParseError, SocketAddr};
use std::time::Duration;

use ortho_config::OrthoConfig;
use serde::Deserialize;

use playforge_backend::outbound::anthropic::AnthropicSettings;
use playforge_backend::outbound::openai::OpenAiSettings;
use playforge_backend::outbound::persistence::DbPool;

const DEFAULT_BIND_ADDR: &str = "127.0.0.1:8080";

/// Settings controlling the server boot.
///
/// Every collaborator is optional: without a database URL the server serves
/// fixture data, and without API keys the hosted generator and speech
/// collaborators fall back to fixtures as well.
#[derive(Debug, Clone, Deserialize, OrthoConfig)]
#[ortho_config(prefix = "PLAYFORGE")]
pub struct AppSettings {
    /// Socket address to bind, as `host:port`.
    pub bind_addr: Option<String>,
    /// PostgreSQL connection string.
    pub database_url: Option<String>,
    /// API key enabling the hosted document generator.
    pub anthropic_api_key: Option<String>,
    /// Origin override for the document generator.
    pub anthropic_base_url: Option<String>,
    /// Model override for the document generator.
    pub anthropic_model: Option<String>,
    /// API key enabling hosted transcription and translation.
    pub openai_api_key: Option<String>,
    /// Origin override for the speech collaborators.
    pub openai_base_url: Option<String>,
    /// End-to-end timeout for generation calls, in seconds.
    pub generation_timeout_secs: Option<u64>,
}

impl AppSettings {
    /// Return the configured bind address, falling back to the default.
    ///
    /// # Errors
    ///
    /// Returns [`AddrParseError`] when the configured value is not a valid
    /// socket address.
    pub fn bind_addr(&self) -> Result<SocketAddr, AddrParseError> {
        self.bind_addr
            .as_deref()
            .unwrap_or(DEFAULT_BIND_ADDR)
            .parse()
    }

    /// Generator connection settings, when an API key is configured.
    pub fn generator_settings(&self) -> Option<AnthropicSettings> {
        let api_key = self.anthropic_api_key.as_deref()?;
        let mut settings = AnthropicSettings::new(api_key);
        if let Some(base_url) = self.anthropic_base_url.as_deref() {
            settings = settings.with_base_url(base_url);
        }
        if let Some(model) = self.anthropic_model.as_deref() {
            settings = settings.with_model(model);
        }
        if let Some(secs) = self.generation_timeout_secs {
            settings = settings.with_timeout(Duration::from_secs(secs));
        }
        Some(settings)
    }

    /// Speech connection settings, when an API key is configured.
    pub fn speech_settings(&self) -> Option<OpenAiSettings> {
        let api_key = self.openai_api_key.as_deref()?;
        let mut settings = OpenAiSettings::new(api_key);
        if let Some(base_url) = self.openai_base_url.as_deref() {
            settings = settings.with_base_url(base_url);
        }
        Some(settings)
    }
}

/// Builder-style configuration for creating the HTTP server.
pub struct ServerConfig {
    pub(crate) bind_addr: SocketAddr,
    pub(crate) db_pool: Option<DbPool>,
    pub(crate) generator: Option<AnthropicSettings>,
    pub(crate) speech: Option<OpenAiSettings>,
}

impl ServerConfig {
    /// Construct a configuration binding the given address, with every
    /// collaborator unset.
    #[must_use]
    pub fn new(bind_addr: SocketAddr) -> Self {
        Self {
            bind_addr,
            db_pool: None,
            generator: None,
            speech: None,
        }
    }

    /// Build a runtime configuration from loaded settings.
    ///
    /// The database pool attaches separately via [`Self::with_db_pool`]
    /// because constructing it is asynchronous.
    ///
    /// # Errors
    ///
    /// Returns [`AddrParseError`] when the configured bind address is
    /// malformed.
    pub fn from_settings(settings: &AppSettings) -> Result<Self, AddrParseError> {
        let mut config = Self::new(settings.bind_addr()?);
        if let Some(generator) = settings.generator_settings() {
            config = config.with_generator(generator);
        }
        if let Some(speech) = settings.speech_settings() {
            config = config.with_speech(speech);
        }
        Ok(config)
    }

    /// Attach a database connection pool for persistence adapters.
    ///
    /// When provided, the server uses database-backed services behind the
    /// driving ports; fixture ports serve otherwise.
    #[must_use]
    pub fn with_db_pool(mut self, pool: DbPool) -> Self {
        self.db_pool = Some(pool);
        self
    }

    /// Attach generator connection settings.
    #[must_use]
    pub fn with_generator(mut self, settings: AnthropicSettings) -> Self {
        self.generator = Some(settings);
        self
    }

    /// Attach speech connection settings.
    #[must_use]
    pub fn with_speech(mut self, settings: OpenAiSettings) -> Self {
        self.speech = Some(settings);
        self
    }

    /// Return the socket address the server will bind to.
    #[must_use]
    pub fn bind_addr(&self) -> SocketAddr {
        self.bind_addr
    }
}

#[cfg(test)]
mod tests {
    //! Unit tests for settings parsing and collaborator selection.

    use std::ffi::OsString;

    use env_lock::lock_env;
    use rstest::rstest;

    use super::*;

    const ALL_SETTINGS_UNSET: [(&str, Option<String>); 8] = [
        ("PLAYFORGE_BIND_ADDR", None),
        ("PLAYFORGE_DATABASE_URL", None),
        ("PLAYFORGE_ANTHROPIC_API_KEY", None),
        ("PLAYFORGE_ANTHROPIC_BASE_URL", None),
        ("PLAYFORGE_ANTHROPIC_MODEL", None),
        ("PLAYFORGE_OPENAI_API_KEY", None),
        ("PLAYFORGE_OPENAI_BASE_URL", None),
        ("PLAYFORGE_GENERATION_TIMEOUT_SECS", None),
    ];

    fn load_from_empty_args() -> AppSettings {
        AppSettings::load_from_iter([OsString::from("playforge-backend")])
            .expect("config should load")
    }

    #[rstest]
    fn default_values_are_used_when_missing() {
        let _guard = lock_env(ALL_SETTINGS_UNSET);

        let settings = load_from_empty_args();
        assert_eq!(
            settings.bind_addr().expect("default address parses"),
            DEFAULT_BIND_ADDR.parse().expect("constant parses")
        );
        assert!(settings.database_url.is_none());
        assert!(settings.generator_settings().is_none());
        assert!(settings.speech_settings().is_none());
    }

    #[rstest]
    fn environment_overrides_are_respected() {
        let _guard = lock_env([
            ("PLAYFORGE_BIND_ADDR", Some("0.0.0.0:9000".to_owned())),
            (
                "PLAYFORGE_DATABASE_URL",
                Some("postgres://localhost/playforge".to_owned()),
            ),
            ("PLAYFORGE_ANTHROPIC_API_KEY", Some("sk-ant-test".to_owned())),
            (
                "PLAYFORGE_ANTHROPIC_BASE_URL",
                Some("http://localhost:9200/".to_owned()),
            ),
            ("PLAYFORGE_ANTHROPIC_MODEL", None::<String>),
            ("PLAYFORGE_OPENAI_API_KEY", Some("sk-test".to_owned())),
            ("PLAYFORGE_OPENAI_BASE_URL", None::<String>),
            ("PLAYFORGE_GENERATION_TIMEOUT_SECS", Some("30".to_owned())),
        ]);

        let settings = load_from_empty_args();
        assert_eq!(
            settings.bind_addr().expect("address parses"),
            "0.0.0.0:9000".parse().expect("valid address")
        );
        assert_eq!(
            settings.database_url.as_deref(),
            Some("postgres://localhost/playforge")
        );

        let generator = settings.generator_settings().expect("generator enabled");
        assert_eq!(generator.api_key, "sk-ant-test");
        assert_eq!(generator.base_url, "http://localhost:9200");
        assert_eq!(generator.timeout, Duration::from_secs(30));

        let speech = settings.speech_settings().expect("speech enabled");
        assert_eq!(speech.api_key, "sk-test");
    }

    #[rstest]
    fn malformed_bind_address_is_reported() {
        let _guard = lock_env([("PLAYFORGE_BIND_ADDR", Some("not-an-address".to_owned()))]);

        let settings = load_from_empty_args();
        assert!(settings.bind_addr().is_err());
    }

    #[rstest]
    fn from_settings_carries_collaborators() {
        let _guard = lock_env(ALL_SETTINGS_UNSET);

        let mut settings = load_from_empty_args();
        settings.anthropic_api_key = Some("sk-ant-test".to_owned());

        let config = ServerConfig::from_settings(&settings).expect("valid settings");
        assert!(config.generator.is_some());
        assert!(config.speech.is_none());
        assert!(config.db_pool.is_none());
    }
}
