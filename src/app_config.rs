use anyhow::{anyhow, Result};
use serde::{Deserialize, Serialize};
use std::default::Default;
use std::path::PathBuf;
use std::time::Duration;
use url::Url;

use crate::errors::ConfigError;
use crate::language_utils;
use crate::translation::concurrency::ProviderProfile;
use crate::translation::core::TranslationOptions;

/// Application configuration module
/// This module handles the application configuration including loading,
/// validating and saving configuration settings.
/// Represents the application configuration
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct Config {
    /// Translation config
    #[serde(default)]
    pub translation: TranslationConfig,

    /// SQLite database holding the documents; platform data dir when unset
    #[serde(default)]
    pub database_path: Option<PathBuf>,

    /// Log level
    #[serde(default)]
    pub log_level: LogLevel,
}

/// Translation provider type
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Default)]
#[serde(rename_all = "lowercase")]
pub enum TranslationProvider {
    // @provider: Yandex Translate
    #[default]
    Yandex,
    // @provider: Anthropic
    Anthropic,
    // @provider: In-process echo translator
    Mock,
}

impl TranslationProvider {
    // @returns: Capitalized provider name
    pub fn display_name(&self) -> &str {
        match self {
            Self::Yandex => "Yandex",
            Self::Anthropic => "Anthropic",
            Self::Mock => "Mock",
        }
    }

    // @returns: Lowercase provider identifier
    pub fn to_lowercase_string(&self) -> String {
        match self {
            Self::Yandex => "yandex".to_string(),
            Self::Anthropic => "anthropic".to_string(),
            Self::Mock => "mock".to_string(),
        }
    }
}

impl std::fmt::Display for TranslationProvider {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.to_lowercase_string())
    }
}

impl std::str::FromStr for TranslationProvider {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_lowercase().as_str() {
            "yandex" => Ok(Self::Yandex),
            "anthropic" => Ok(Self::Anthropic),
            "mock" => Ok(Self::Mock),
            _ => Err(anyhow!("Invalid provider type: {}", s)),
        }
    }
}

/// Provider configuration wrapper
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct ProviderConfig {
    // @field: Provider type identifier
    #[serde(rename = "type")]
    pub provider_type: String,

    // @field: Model name (ignored by Yandex)
    #[serde(default = "String::new")]
    pub model: String,

    // @field: API key
    #[serde(default = "String::new")]
    pub api_key: String,

    // @field: Service URL
    #[serde(default = "String::new")]
    pub endpoint: String,

    // @field: Max concurrent requests
    #[serde(default = "default_concurrent_requests")]
    pub concurrent_requests: usize,

    // @field: Max characters per request
    #[serde(default = "default_max_chunk_length")]
    pub max_chunk_length: usize,

    // @field: Timeout seconds
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

impl ProviderConfig {
    // @param provider_type: Provider enum
    // @returns: Provider config with the provider's profile defaults
    pub fn new(provider_type: TranslationProvider) -> Self {
        let profile = ProviderProfile::for_provider(&provider_type);
        Self {
            provider_type: provider_type.to_lowercase_string(),
            model: String::new(),
            api_key: String::new(),
            endpoint: String::new(),
            concurrent_requests: profile.max_concurrent_requests,
            max_chunk_length: profile.max_chunk_length,
            timeout_secs: profile.timeout_secs,
        }
    }
}

/// Translation service configuration
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct TranslationConfig {
    /// Whether the translate action is offered at all
    #[serde(default = "default_true")]
    pub enabled: bool,

    /// Translation provider to use
    #[serde(default)]
    pub provider: TranslationProvider,

    /// Default target language code (ISO)
    #[serde(default = "default_target_language")]
    pub target_language: String,

    /// Available translation providers
    #[serde(default = "default_available_providers")]
    pub available_providers: Vec<ProviderConfig>,
}

/// Log verbosity level
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Default)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    Error,
    Warn,
    #[default]
    Info,
    Debug,
    Trace,
}

impl LogLevel {
    pub fn to_level_filter(&self) -> log::LevelFilter {
        match self {
            LogLevel::Error => log::LevelFilter::Error,
            LogLevel::Warn => log::LevelFilter::Warn,
            LogLevel::Info => log::LevelFilter::Info,
            LogLevel::Debug => log::LevelFilter::Debug,
            LogLevel::Trace => log::LevelFilter::Trace,
        }
    }
}

fn default_concurrent_requests() -> usize {
    4
}

fn default_max_chunk_length() -> usize {
    9999
}

fn default_timeout_secs() -> u64 {
    30
}

fn default_true() -> bool {
    true
}

fn default_target_language() -> String {
    "en".to_string()
}

fn default_available_providers() -> Vec<ProviderConfig> {
    vec![
        ProviderConfig::new(TranslationProvider::Yandex),
        ProviderConfig::new(TranslationProvider::Anthropic),
        ProviderConfig::new(TranslationProvider::Mock),
    ]
}

impl Config {
    /// Whether the translate operation may be offered to the operator
    pub fn translation_available(&self) -> bool {
        self.translation.validate().is_ok()
    }
}

/// Default implementation for Config
impl Default for Config {
    fn default() -> Self {
        Config {
            translation: TranslationConfig::default(),
            database_path: None,
            log_level: LogLevel::default(),
        }
    }
}

impl TranslationConfig {
    /// Validate the translation settings.
    ///
    /// A failure means the translate operation must not be offered at all.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !self.enabled {
            return Err(ConfigError::TranslationDisabled);
        }

        language_utils::validate_language_code(&self.target_language)
            .map_err(|_| ConfigError::InvalidLanguage(self.target_language.clone()))?;

        let profile = ProviderProfile::for_provider(&self.provider);
        if profile.requires_api_key && self.get_api_key().is_empty() {
            return Err(ConfigError::MissingApiKey {
                provider: self.provider.display_name().to_string(),
            });
        }

        if let Some(provider_config) = self.get_active_provider_config() {
            if provider_config.max_chunk_length == 0 {
                return Err(ConfigError::InvalidChunkLength);
            }
            if provider_config.concurrent_requests == 0 {
                return Err(ConfigError::InvalidConcurrency);
            }
            if !provider_config.endpoint.is_empty() && Url::parse(&provider_config.endpoint).is_err() {
                return Err(ConfigError::InvalidEndpoint(provider_config.endpoint.clone()));
            }
        }

        Ok(())
    }

    /// Get the active provider configuration from the available_providers array
    pub fn get_active_provider_config(&self) -> Option<&ProviderConfig> {
        self.get_provider_config(&self.provider)
    }

    /// Get a specific provider configuration by type
    pub fn get_provider_config(&self, provider_type: &TranslationProvider) -> Option<&ProviderConfig> {
        let provider_str = provider_type.to_lowercase_string();
        self.available_providers.iter()
            .find(|p| p.provider_type == provider_str)
    }

    /// Mutable access to the active provider configuration, created on demand
    pub fn active_provider_config_mut(&mut self) -> &mut ProviderConfig {
        let provider_str = self.provider.to_lowercase_string();
        let index = match self.available_providers.iter().position(|p| p.provider_type == provider_str) {
            Some(index) => index,
            None => {
                self.available_providers.push(ProviderConfig::new(self.provider.clone()));
                self.available_providers.len() - 1
            }
        };
        &mut self.available_providers[index]
    }

    fn profile(&self) -> ProviderProfile {
        ProviderProfile::for_provider(&self.provider)
    }

    /// Get the model for the active provider (empty means provider default)
    pub fn get_model(&self) -> String {
        self.get_active_provider_config()
            .map(|p| p.model.clone())
            .unwrap_or_default()
    }

    /// Get the API key for the active provider
    pub fn get_api_key(&self) -> String {
        self.get_active_provider_config()
            .map(|p| p.api_key.clone())
            .unwrap_or_default()
    }

    /// Get the endpoint for the active provider (empty means provider default)
    pub fn get_endpoint(&self) -> String {
        self.get_active_provider_config()
            .map(|p| p.endpoint.clone())
            .unwrap_or_default()
    }

    /// Get the max characters per request for the active provider
    pub fn get_max_chunk_length(&self) -> usize {
        self.profile()
            .effective_chunk_length(self.get_active_provider_config().map(|p| p.max_chunk_length))
    }

    /// Get the concurrent request limit for the active provider
    pub fn get_concurrent_requests(&self) -> usize {
        self.profile()
            .effective_concurrent_requests(self.get_active_provider_config().map(|p| p.concurrent_requests))
    }

    /// Get the per-request timeout for the active provider
    pub fn get_timeout_secs(&self) -> u64 {
        self.get_active_provider_config()
            .map(|p| p.timeout_secs)
            .filter(|secs| *secs > 0)
            .unwrap_or_else(|| self.profile().timeout_secs)
    }

    /// Options for the chunked translator
    pub fn translation_options(&self) -> TranslationOptions {
        TranslationOptions {
            max_chunk_length: self.get_max_chunk_length(),
            default_target_language: self.target_language.clone(),
            max_concurrent_requests: self.get_concurrent_requests(),
            request_timeout: Duration::from_secs(self.get_timeout_secs()),
        }
    }
}

impl Default for TranslationConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            provider: TranslationProvider::default(),
            target_language: default_target_language(),
            available_providers: default_available_providers(),
        }
    }
}
