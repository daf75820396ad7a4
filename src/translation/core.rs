/*!
 * Core chunked translation.
 *
 * This module contains the `ChunkedTranslator`, which turns one document's text
 * into a translation by cutting it into provider-sized chunks, translating the
 * chunks one after another and joining the results.
 */

use std::sync::Arc;
use std::time::{Duration, Instant};

use log::{debug, warn};
use tokio::sync::Semaphore;

use crate::errors::{ConfigError, ProviderError, TranslationError};
use crate::providers::Translator;

use super::chunker::split_into_chunks;

/// Translation options for customizing the translation process
#[derive(Debug, Clone, PartialEq)]
pub struct TranslationOptions {
    /// Maximum characters sent to the provider per request
    pub max_chunk_length: usize,

    /// Target language used when the caller does not name one
    pub default_target_language: String,

    /// Maximum number of provider calls in flight at once
    pub max_concurrent_requests: usize,

    /// Timeout applied to every provider call
    pub request_timeout: Duration,
}

impl Default for TranslationOptions {
    fn default() -> Self {
        Self {
            max_chunk_length: 9999,
            default_target_language: "en".to_string(),
            max_concurrent_requests: 4,
            request_timeout: Duration::from_secs(30),
        }
    }
}

/// Translates whole documents through a chunk-limited provider.
///
/// Clones share the provider and the request permits, so one limit applies to
/// every document translated through the same instance.
#[derive(Debug, Clone)]
pub struct ChunkedTranslator {
    translator: Arc<dyn Translator>,
    options: TranslationOptions,
    permits: Arc<Semaphore>,
}

impl ChunkedTranslator {
    /// Create a translator, rejecting options the provider cannot work with
    pub fn new(translator: Arc<dyn Translator>, options: TranslationOptions) -> Result<Self, ConfigError> {
        if options.max_chunk_length == 0 {
            return Err(ConfigError::InvalidChunkLength);
        }
        if options.max_concurrent_requests == 0 {
            return Err(ConfigError::InvalidConcurrency);
        }

        Ok(Self {
            translator,
            permits: Arc::new(Semaphore::new(options.max_concurrent_requests)),
            options,
        })
    }

    pub fn options(&self) -> &TranslationOptions {
        &self.options
    }

    pub fn provider_name(&self) -> &str {
        self.translator.name()
    }

    /// The language a request will actually be translated into
    pub fn resolve_target_language<'a>(&'a self, requested: Option<&'a str>) -> &'a str {
        requested
            .map(str::trim)
            .filter(|lang| !lang.is_empty())
            .unwrap_or(self.options.default_target_language.as_str())
    }

    /// Translate one document's content.
    ///
    /// Chunks are translated strictly in order. The first failing chunk aborts the
    /// document; later chunks are never sent. Empty content returns an empty
    /// string without calling the provider.
    ///
    /// # Arguments
    /// * `label` - Document label used in the error message
    /// * `content` - Text to translate
    /// * `target_language` - Target language, or `None` for the default
    pub async fn translate(
        &self,
        label: &str,
        content: &str,
        target_language: Option<&str>,
    ) -> Result<String, TranslationError> {
        let target_language = self.resolve_target_language(target_language);
        let chunks = split_into_chunks(content, self.options.max_chunk_length);

        if chunks.is_empty() {
            return Ok(String::new());
        }

        let start_time = Instant::now();
        let mut translated = String::with_capacity(content.len());

        for (chunk_index, chunk) in chunks.iter().enumerate() {
            debug!(
                "Translating chunk {}/{} of '{}' ({} chars) to {}",
                chunk_index + 1,
                chunks.len(),
                label,
                chunk.chars().count(),
                target_language
            );

            let piece = self.translate_chunk(chunk, target_language).await.map_err(|source| {
                warn!("Chunk {} of '{}' failed: {}", chunk_index + 1, label, source);
                TranslationError::Chunk {
                    document: label.to_string(),
                    chunk_index,
                    source,
                }
            })?;

            translated.push_str(&piece);
        }

        debug!("Translated '{}' in {} chunk(s) in {:?}", label, chunks.len(), start_time.elapsed());

        Ok(translated)
    }

    /// One provider call under the shared permit and the request timeout
    async fn translate_chunk(&self, chunk: &str, target_language: &str) -> Result<String, ProviderError> {
        let _permit = self.permits.acquire().await
            .map_err(|e| ProviderError::RequestFailed(format!("request permits closed: {}", e)))?;

        match tokio::time::timeout(self.options.request_timeout, self.translator.translate(chunk, target_language)).await {
            Ok(result) => result,
            Err(_) => Err(ProviderError::Timeout(self.options.request_timeout)),
        }
    }
}
