/*!
 * Provider implementations for text translation services.
 *
 * This module contains client implementations for the supported providers:
 * - Yandex: Yandex Translate API
 * - Anthropic: Anthropic messages API used as a translator
 * - Mock: deterministic in-process translator for tests and dry runs
 */

use async_trait::async_trait;
use std::fmt::Debug;
use std::sync::Arc;
use std::time::Duration;

use crate::app_config::{TranslationConfig, TranslationProvider};
use crate::errors::{ConfigError, ProviderError};

/// Common trait for all translation providers
///
/// The core only ever sees this interface: a piece of text goes in together with
/// a target language code, translated text (or a provider error) comes out.
#[async_trait]
pub trait Translator: Send + Sync + Debug {
    /// Short provider name for logs
    fn name(&self) -> &str;

    /// Translate `text` into `target_language`
    ///
    /// # Arguments
    /// * `text` - The text to translate
    /// * `target_language` - ISO 639 code of the target language
    async fn translate(&self, text: &str, target_language: &str) -> Result<String, ProviderError>;

    /// Test the connection to the provider
    async fn test_connection(&self) -> Result<(), ProviderError> {
        self.translate("Hello", "en").await.map(|_| ())
    }
}

/// Build the translator selected by the configuration.
///
/// Fails when translation is not available (disabled, missing credentials).
pub fn build_translator(config: &TranslationConfig) -> Result<Arc<dyn Translator>, ConfigError> {
    config.validate()?;

    let timeout = Duration::from_secs(config.get_timeout_secs());

    let translator: Arc<dyn Translator> = match config.provider {
        TranslationProvider::Yandex => Arc::new(yandex::YandexTranslate::new(
            config.get_api_key(),
            config.get_endpoint(),
            timeout,
        )),
        TranslationProvider::Anthropic => Arc::new(anthropic::Anthropic::new(
            config.get_api_key(),
            config.get_endpoint(),
            config.get_model(),
            timeout,
        )),
        TranslationProvider::Mock => Arc::new(mock::MockTranslator::identity()),
    };

    Ok(translator)
}

pub mod anthropic;
pub mod mock;
pub mod yandex;
