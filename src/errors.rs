/*!
 * Error types for the archivist application.
 *
 * This module contains custom error types for the different parts of the application,
 * using the thiserror crate for ergonomic error definitions.
 */

use std::time::Duration;

use thiserror::Error;

/// Errors that can occur when talking to a translation provider
#[derive(Error, Debug)]
pub enum ProviderError {
    /// Error when making an API request fails
    #[error("API request failed: {0}")]
    RequestFailed(String),

    /// Error when parsing an API response fails
    #[error("Failed to parse API response: {0}")]
    ParseError(String),

    /// Error returned by the API itself
    #[error("API responded with error: {status_code} - {message}")]
    ApiError {
        /// HTTP status code (or provider status code)
        status_code: u16,
        /// Error message from the API
        message: String,
    },

    /// Error establishing or maintaining a connection
    #[error("Connection error: {0}")]
    ConnectionError(String),

    /// Error related to rate limiting
    #[error("Rate limit exceeded: {0}")]
    RateLimitExceeded(String),

    /// Error with authentication
    #[error("Authentication error: {0}")]
    AuthenticationError(String),

    /// The call did not complete within the configured timeout
    #[error("Request timed out after {0:?}")]
    Timeout(Duration),
}

/// Errors raised when writing a translation back to the document store
#[derive(Error, Debug)]
pub enum PersistError {
    /// The document no longer exists in the store
    #[error("document {0} not found")]
    NotFound(i64),

    /// The storage backend rejected the write
    #[error("storage error: {0}")]
    Storage(String),
}

/// Errors that can occur while translating a single document.
///
/// Every variant renders as `"<title> failed to translate: <reason>"`, which is
/// the message reported back to the operator.
#[derive(Error, Debug)]
pub enum TranslationError {
    /// One chunk of the document could not be translated
    #[error("{document} failed to translate: {source}")]
    Chunk {
        /// Label (title) of the document
        document: String,
        /// Zero-based index of the failing chunk
        chunk_index: usize,
        /// Underlying provider failure
        source: ProviderError,
    },

    /// The translation succeeded but could not be stored
    #[error("{document} failed to translate: {source}")]
    Persist {
        /// Label (title) of the document
        document: String,
        /// Underlying store failure
        source: PersistError,
    },

    /// The batch was cancelled before this document finished
    #[error("{document} failed to translate: translation cancelled")]
    Cancelled {
        /// Label (title) of the document
        document: String,
    },
}

impl TranslationError {
    /// The bare failure reason, without the document label
    pub fn reason(&self) -> String {
        match self {
            Self::Chunk { source, .. } => source.to_string(),
            Self::Persist { source, .. } => source.to_string(),
            Self::Cancelled { .. } => "translation cancelled".to_string(),
        }
    }
}

/// A month filter key that is not of the form `YYYY-MM`
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("Invalid month filter '{key}': {reason}")]
pub struct InvalidFacetError {
    /// The rejected key
    pub key: String,
    /// Why it was rejected
    pub reason: String,
}

/// Configuration problems that make the translate operation unavailable
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    #[error("Translation is disabled in the configuration")]
    TranslationDisabled,

    #[error("Translation API key is required for the {provider} provider")]
    MissingApiKey { provider: String },

    #[error("Maximum chunk length must be greater than zero")]
    InvalidChunkLength,

    #[error("Concurrent request limit must be greater than zero")]
    InvalidConcurrency,

    #[error("Invalid target language: {0}")]
    InvalidLanguage(String),

    #[error("Invalid provider endpoint: {0}")]
    InvalidEndpoint(String),
}

/// Main application error type that wraps all other errors
#[derive(Error, Debug)]
pub enum AppError {
    /// Error from a file operation
    #[error("File error: {0}")]
    File(String),

    /// Error from a provider
    #[error("Provider error: {0}")]
    Provider(#[from] ProviderError),

    /// Error from translation
    #[error("Translation error: {0}")]
    Translation(#[from] TranslationError),

    /// Error from the document store
    #[error("Persistence error: {0}")]
    Persist(#[from] PersistError),

    /// Error from a month filter
    #[error("Filter error: {0}")]
    Facet(#[from] InvalidFacetError),

    /// Error from configuration
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// Any other error
    #[error("Unknown error: {0}")]
    Unknown(String),
}

impl From<anyhow::Error> for AppError {
    fn from(error: anyhow::Error) -> Self {
        Self::Unknown(error.to_string())
    }
}

impl From<std::io::Error> for AppError {
    fn from(error: std::io::Error) -> Self {
        Self::File(error.to_string())
    }
}
