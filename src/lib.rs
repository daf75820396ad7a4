/*!
 * # Archivist
 *
 * A Rust library for translating an archive of dated documents with
 * external machine-translation providers.
 *
 * ## Features
 *
 * - Split long documents into provider-sized chunks and reassemble the result
 * - Translate using various providers:
 *   - Yandex Translate API
 *   - Anthropic API
 *   - Mock provider for tests and dry runs
 * - Process a selection concurrently with per-document error isolation
 * - Browse and filter the archive by creation month
 * - Store documents and translations in SQLite
 * - ISO 639-1 and ISO 639-2 language code support
 *
 * ## Architecture
 *
 * The library is organized in these main modules:
 * - `app_config`: Configuration management
 * - `document`: The archived document model
 * - `facets`: Month facets and month filtering
 * - `translation`: Chunked translation:
 *   - `translation::chunker`: Text splitting
 *   - `translation::core`: Single-document translation
 *   - `translation::batch`: Batch processing with write-back
 * - `database`: Document storage (SQLite and in-memory)
 * - `app_controller`: Main application controller
 * - `language_utils`: ISO language code utilities
 * - `providers`: Client implementations for translation providers
 * - `errors`: Custom error types for the application
 *
 * ## License
 *
 * This project is licensed under the MIT License
 */

// Global lints configuration
// These lints will be allowed but not auto-fixed
#![allow(clippy::uninlined_format_args)]
#![allow(clippy::redundant_closure_for_method_calls)]

// Public modules
pub mod app_config;
pub mod app_controller;
pub mod database;
pub mod document;
pub mod errors;
pub mod facets;
pub mod language_utils;
pub mod providers;
pub mod translation;

// Re-export main types for easier usage
pub use app_config::Config;
pub use app_controller::{Controller, Selection};
pub use database::{DocumentStore, MemoryDocumentStore, Repository};
pub use document::Document;
pub use errors::{AppError, ConfigError, InvalidFacetError, PersistError, ProviderError, TranslationError};
pub use facets::{apply_facet, derive_facets, MonthFacet};
pub use language_utils::{get_language_name, language_codes_match, normalize_to_part2t};
pub use translation::{BatchRunner, CancelHandle, ChunkedTranslator, TranslationOptions, TranslationOutcome};
