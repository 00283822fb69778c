//! Layered application configuration.
//!
//! Sources, lowest precedence first: built-in defaults, a TOML file, and
//! `STANZA__SECTION__KEY` environment variables.

use derive_getters::Getters;
use serde::{Deserialize, Serialize};
use stanza_completion::{CompletionClient, OpenAICompatibleClient, RateLimitedClient};
use stanza_engine::{AlternativeEngine, EngineConfig};
use stanza_error::ConfigError;
use stanza_server::{ServerConfig, SharedEngine};
use std::num::NonZeroU32;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing::{debug, info, instrument};

const DEFAULT_CONFIG_NAME: &str = "stanza";
const API_KEY_FALLBACK_VAR: &str = "FIREWORKS_API_KEY";

/// Top-level configuration.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, Getters)]
#[serde(default)]
pub struct StanzaConfig {
    /// HTTP listener
    server: ServerConfig,
    /// Generation limits
    engine: EngineConfig,
    /// Completion backend
    completion: CompletionConfig,
    /// Data directory
    storage: StorageConfig,
}

/// Completion backend connection.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Getters, derive_builder::Builder)]
#[builder(default, setter(into))]
#[serde(default)]
pub struct CompletionConfig {
    /// API root
    base_url: String,
    /// Model identifier
    model: String,
    /// Bearer key; falls back to `FIREWORKS_API_KEY`
    api_key: Option<String>,
    /// Optional requests-per-minute ceiling
    requests_per_minute: Option<u32>,
    /// Text placed before the poem context
    prompt_prefix: Option<String>,
}

impl Default for CompletionConfig {
    fn default() -> Self {
        Self {
            base_url: "https://api.fireworks.ai/inference/v1".to_string(),
            model: "accounts/george-strakhov-3cfc5a/models/poetry-continuation-v1".to_string(),
            api_key: None,
            requests_per_minute: None,
            prompt_prefix: None,
        }
    }
}

impl CompletionConfig {
    /// Creates a new builder for CompletionConfig.
    pub fn builder() -> CompletionConfigBuilder {
        CompletionConfigBuilder::default()
    }
}

/// Where poems and preferences are written.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Getters)]
#[serde(default)]
pub struct StorageConfig {
    /// Root data directory
    data_dir: PathBuf,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            data_dir: PathBuf::from("data"),
        }
    }
}

impl StanzaConfig {
    /// Loads configuration from defaults, an optional file, and the environment.
    ///
    /// Without `path`, `stanza.toml` in the working directory is used if present.
    ///
    /// # Errors
    ///
    /// Returns an error if an explicit file is missing, a source cannot be
    /// parsed, or the result fails validation.
    #[instrument]
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        let defaults = config::Config::try_from(&Self::default())
            .map_err(|e| ConfigError::new(format!("Failed to encode defaults: {}", e)))?;

        let mut builder = config::Config::builder().add_source(defaults);

        builder = match path {
            Some(path) => {
                debug!(path = %path.display(), "Reading config file");
                builder.add_source(config::File::from(path).required(true))
            }
            None => builder.add_source(config::File::with_name(DEFAULT_CONFIG_NAME).required(false)),
        };

        builder = builder.add_source(
            config::Environment::with_prefix("STANZA")
                .prefix_separator("__")
                .separator("__")
                .try_parsing(true),
        );

        let mut loaded: Self = builder
            .build()
            .and_then(|c| c.try_deserialize())
            .map_err(|e| ConfigError::new(format!("Failed to load configuration: {}", e)))?;

        if loaded.completion.api_key.is_none() {
            loaded.completion.api_key = std::env::var(API_KEY_FALLBACK_VAR).ok();
        }

        loaded.validate()?;
        info!(
            model = %loaded.completion.model,
            data_dir = %loaded.storage.data_dir.display(),
            "Configuration loaded"
        );
        Ok(loaded)
    }

    /// Parses configuration from TOML text on top of the defaults.
    ///
    /// # Errors
    ///
    /// Returns an error if the text is not valid or fails validation.
    pub fn from_toml(text: &str) -> Result<Self, ConfigError> {
        let defaults = config::Config::try_from(&Self::default())
            .map_err(|e| ConfigError::new(format!("Failed to encode defaults: {}", e)))?;

        let loaded: Self = config::Config::builder()
            .add_source(defaults)
            .add_source(config::File::from_str(text, config::FileFormat::Toml))
            .build()
            .and_then(|c| c.try_deserialize())
            .map_err(|e| ConfigError::new(format!("Failed to parse configuration: {}", e)))?;

        loaded.validate()?;
        Ok(loaded)
    }

    /// Checks cross-field constraints.
    ///
    /// # Errors
    ///
    /// Returns the first violated constraint.
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.engine.validate()?;
        if self.completion.requests_per_minute == Some(0) {
            return Err(ConfigError::new(
                "completion.requests_per_minute must be at least 1",
            ));
        }
        Ok(())
    }
}

/// Builds the completion backend described by `config`.
///
/// # Errors
///
/// Returns an error if no API key is available or the rate is zero.
pub fn build_client(config: &CompletionConfig) -> Result<Arc<dyn CompletionClient>, ConfigError> {
    let api_key = config.api_key.clone().ok_or_else(|| {
        ConfigError::new(format!(
            "No API key: set completion.api_key or {}",
            API_KEY_FALLBACK_VAR
        ))
    })?;

    let mut client =
        OpenAICompatibleClient::new(api_key, config.model.clone(), config.base_url.clone());
    if let Some(prefix) = &config.prompt_prefix {
        client = client.with_prompt_prefix(prefix.clone());
    }

    match config.requests_per_minute {
        None => Ok(Arc::new(client)),
        Some(rpm) => {
            let rpm = NonZeroU32::new(rpm).ok_or_else(|| {
                ConfigError::new("completion.requests_per_minute must be at least 1")
            })?;
            Ok(Arc::new(RateLimitedClient::new(client, rpm)))
        }
    }
}

/// Builds the generation engine for a loaded configuration.
///
/// # Errors
///
/// See [`build_client`].
pub fn build_engine(config: &StanzaConfig) -> Result<SharedEngine, ConfigError> {
    let client = build_client(&config.completion)?;
    Ok(AlternativeEngine::new(client, config.engine.clone()))
}
