/*!
 * Chunked document translation.
 *
 * This module turns one long document into one translated string, and a
 * selection of documents into one outcome per document. It is split into
 * several submodules:
 *
 * - `chunker`: Character-bounded splitting of document text
 * - `concurrency`: Per-provider limits and defaults
 * - `core`: Sequential, fail-fast translation of one document
 * - `batch`: Concurrent processing of a selection with write-back
 */

// Re-export main types for easier usage
pub use self::batch::{BatchRunner, CancelHandle, TranslationOutcome};
pub use self::chunker::split_into_chunks;
pub use self::concurrency::ProviderProfile;
pub use self::core::{ChunkedTranslator, TranslationOptions};

// Submodules
pub mod batch;
pub mod chunker;
pub mod concurrency;
pub mod core;
