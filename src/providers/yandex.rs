use std::time::Duration;

use async_trait::async_trait;
use log::{debug, error};
use reqwest::{Client, StatusCode};
use serde::Deserialize;

use crate::errors::ProviderError;
use crate::language_utils;
use crate::providers::Translator;

/// Default Yandex Translate API base URL
pub const DEFAULT_ENDPOINT: &str = "https://translate.yandex.net/api/v1.5/tr.json";

/// Yandex Translate client
#[derive(Debug)]
pub struct YandexTranslate {
    /// HTTP client for API requests
    client: Client,
    /// API key for authentication
    api_key: String,
    /// API base URL
    endpoint: String,
}

/// Yandex translate response
#[derive(Debug, Deserialize)]
pub struct YandexResponse {
    /// Provider status code, 200 on success
    pub code: u16,

    /// Translation direction, e.g. `de-en`
    #[serde(default)]
    pub lang: Option<String>,

    /// Translated text pieces
    #[serde(default)]
    pub text: Vec<String>,

    /// Error description on failure
    #[serde(default)]
    pub message: Option<String>,
}

impl YandexResponse {
    /// Join the translated pieces
    pub fn joined_text(&self) -> String {
        self.text.concat()
    }
}

impl YandexTranslate {
    /// Create a new Yandex Translate client
    pub fn new(api_key: impl Into<String>, endpoint: impl Into<String>, timeout: Duration) -> Self {
        let endpoint = endpoint.into();
        Self {
            client: Client::builder()
                .timeout(timeout)
                .build()
                .unwrap_or_default(),
            api_key: api_key.into(),
            endpoint: if endpoint.is_empty() { DEFAULT_ENDPOINT.to_string() } else { endpoint },
        }
    }

    fn translate_url(&self) -> String {
        format!("{}/translate", self.endpoint.trim_end_matches('/'))
    }

    /// Map a provider status code to an error
    pub fn status_error(code: u16, message: String) -> ProviderError {
        match code {
            401 | 402 => ProviderError::AuthenticationError(message),
            404 | 429 => ProviderError::RateLimitExceeded(message),
            _ => ProviderError::ApiError { status_code: code, message },
        }
    }

    /// Map a failed HTTP response to an error.
    ///
    /// Yandex repeats its own code in the body; the quota codes only count when
    /// they come from there, so a plain 404 from a proxy stays an API error.
    pub fn http_error(status: StatusCode, body_code: Option<u16>, message: String) -> ProviderError {
        match (status, body_code) {
            (StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN, _) => ProviderError::AuthenticationError(message),
            (StatusCode::TOO_MANY_REQUESTS, _) => ProviderError::RateLimitExceeded(message),
            (_, Some(code)) if code != 200 => Self::status_error(code, message),
            _ => ProviderError::ApiError {
                status_code: status.as_u16(),
                message,
            },
        }
    }

    /// Send a translate request and return the decoded response
    pub async fn request(&self, text: &str, lang: &str) -> Result<YandexResponse, ProviderError> {
        let response = self.client.post(self.translate_url())
            .form(&[("key", self.api_key.as_str()), ("text", text), ("lang", lang)])
            .send()
            .await
            .map_err(|e| {
                if e.is_timeout() {
                    ProviderError::RequestFailed(format!("request timed out: {}", e))
                } else if e.is_connect() {
                    ProviderError::ConnectionError(e.to_string())
                } else {
                    ProviderError::RequestFailed(e.to_string())
                }
            })?;

        let status = response.status();
        let body = response.text().await
            .map_err(|e| ProviderError::RequestFailed(format!("Failed to read response body: {}", e)))?;

        let parsed = serde_json::from_str::<YandexResponse>(&body);

        if !status.is_success() {
            let (body_code, message) = match parsed {
                Ok(r) => (Some(r.code), r.message.unwrap_or(body)),
                Err(_) => (None, body),
            };
            error!("Yandex API error ({}): {}", status, message);
            return Err(Self::http_error(status, body_code, message));
        }

        let parsed = parsed.map_err(|e| ProviderError::ParseError(e.to_string()))?;
        if parsed.code != 200 {
            let message = parsed.message.clone().unwrap_or_else(|| "unknown error".to_string());
            return Err(Self::status_error(parsed.code, message));
        }

        Ok(parsed)
    }
}

#[async_trait]
impl Translator for YandexTranslate {
    fn name(&self) -> &str {
        "yandex"
    }

    async fn translate(&self, text: &str, target_language: &str) -> Result<String, ProviderError> {
        // Yandex wants two-letter codes where they exist
        let lang = language_utils::normalize_to_part1_or_part2t(target_language)
            .unwrap_or_else(|_| target_language.to_string());

        let response = self.request(text, &lang).await?;
        debug!("Yandex translated {} chars ({})", text.chars().count(), response.lang.as_deref().unwrap_or(&lang));

        Ok(response.joined_text())
    }
}
