/*!
 * Provider-specific limits.
 *
 * This module provides the default request size, concurrency and timeout for each
 * provider. Configuration values override these when set. A configured chunk
 * length never exceeds what the provider accepts. Zero is passed through so
 * validation can reject it.
 */

use crate::app_config::TranslationProvider;

/// Provider-specific profile with tuned defaults
#[derive(Debug, Clone, PartialEq)]
pub struct ProviderProfile {
    /// Maximum concurrent requests
    pub max_concurrent_requests: usize,
    /// Maximum characters accepted per request
    pub max_chunk_length: usize,
    /// Per-request timeout in seconds
    pub timeout_secs: u64,
    /// Whether the provider needs an API key
    pub requires_api_key: bool,
}

impl ProviderProfile {
    /// Get the profile for a given provider
    pub fn for_provider(provider: &TranslationProvider) -> Self {
        match provider {
            TranslationProvider::Yandex => Self {
                // The API rejects texts of 10000 characters or more
                max_concurrent_requests: 4,
                max_chunk_length: 9999,
                timeout_secs: 30,
                requires_api_key: true,
            },
            TranslationProvider::Anthropic => Self {
                max_concurrent_requests: 5,
                max_chunk_length: 8000,
                timeout_secs: 60,
                requires_api_key: true,
            },
            TranslationProvider::Mock => Self {
                max_concurrent_requests: 8,
                max_chunk_length: 9999,
                timeout_secs: 5,
                requires_api_key: false,
            },
        }
    }

    /// Get effective concurrent requests, respecting any user override
    pub fn effective_concurrent_requests(&self, user_override: Option<usize>) -> usize {
        user_override.unwrap_or(self.max_concurrent_requests)
    }

    /// Get effective chunk length, capped at the provider's request limit
    pub fn effective_chunk_length(&self, user_override: Option<usize>) -> usize {
        user_override.map_or(self.max_chunk_length, |n| n.min(self.max_chunk_length))
    }
}
