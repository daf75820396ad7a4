/*!
 * Batch translation processing.
 *
 * This module runs the chunked translator over a selection of documents, with
 * support for concurrency, progress tracking, cancellation and per-document
 * error isolation. A failing document never stops the rest of the batch.
 */

use futures::stream::{self, StreamExt};
use log::{info, warn};
use std::fmt;
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Instant;
use tokio::sync::watch;

use crate::database::DocumentStore;
use crate::document::Document;
use crate::errors::TranslationError;

use super::core::ChunkedTranslator;

/// Result of translating one document in a batch
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TranslationOutcome {
    /// The translation was produced and stored
    Success {
        document_id: i64,
        message: String,
    },
    /// The translation failed or could not be stored
    Failure {
        document_id: i64,
        reason: String,
        message: String,
    },
}

impl TranslationOutcome {
    fn success(document: &Document) -> Self {
        Self::Success {
            document_id: document.id,
            message: format!("{} successfully translated", document.title),
        }
    }

    fn failure(document: &Document, error: &TranslationError) -> Self {
        Self::Failure {
            document_id: document.id,
            reason: error.reason(),
            message: error.to_string(),
        }
    }

    pub fn document_id(&self) -> i64 {
        match self {
            Self::Success { document_id, .. } | Self::Failure { document_id, .. } => *document_id,
        }
    }

    /// Operator-facing message
    pub fn message(&self) -> &str {
        match self {
            Self::Success { message, .. } | Self::Failure { message, .. } => message,
        }
    }

    pub fn is_success(&self) -> bool {
        matches!(self, Self::Success { .. })
    }
}

impl fmt::Display for TranslationOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.message())
    }
}

/// Cancels one running batch.
///
/// Each batch call takes its own handle. Finished documents keep their outcome;
/// the others are reported as cancelled and nothing is written for them.
#[derive(Debug, Clone)]
pub struct CancelHandle {
    sender: Arc<watch::Sender<bool>>,
}

impl Default for CancelHandle {
    fn default() -> Self {
        Self::new()
    }
}

impl CancelHandle {
    pub fn new() -> Self {
        let (sender, _) = watch::channel(false);
        Self { sender: Arc::new(sender) }
    }

    pub fn cancel(&self) {
        self.sender.send_replace(true);
    }

    pub fn is_cancelled(&self) -> bool {
        *self.sender.borrow()
    }

    /// Resolves once `cancel` has been called
    pub async fn cancelled(&self) {
        let mut receiver = self.sender.subscribe();
        if receiver.wait_for(|cancelled| *cancelled).await.is_err() {
            // The sender lives as long as self, so this never resolves
            std::future::pending::<()>().await;
        }
    }
}

/// Batch runner for translating a selection of documents
pub struct BatchRunner {
    /// The chunked translator to use
    translator: ChunkedTranslator,

    /// Maximum number of documents processed at once
    max_concurrent_documents: usize,
}

impl BatchRunner {
    /// Create a new batch runner
    pub fn new(translator: ChunkedTranslator) -> Self {
        Self {
            max_concurrent_documents: translator.options().max_concurrent_requests,
            translator,
        }
    }

    /// Limit how many documents are in progress at once
    pub fn with_max_concurrent_documents(mut self, max: usize) -> Self {
        self.max_concurrent_documents = max.max(1);
        self
    }

    pub fn translator(&self) -> &ChunkedTranslator {
        &self.translator
    }

    /// Translate and store every document, returning one outcome per document
    /// in input order
    pub async fn run_batch<S>(
        &self,
        documents: &[Document],
        target_language: Option<&str>,
        store: &S,
    ) -> Vec<TranslationOutcome>
    where
        S: DocumentStore + ?Sized,
    {
        self.run_batch_with_progress(documents, target_language, store, &CancelHandle::new(), |_, _| {})
            .await
    }

    /// Like [`run_batch`](Self::run_batch), stopping when `cancel` fires and
    /// calling `progress_callback(done, total)` after each document
    pub async fn run_batch_with_progress<S, F>(
        &self,
        documents: &[Document],
        target_language: Option<&str>,
        store: &S,
        cancel: &CancelHandle,
        progress_callback: F,
    ) -> Vec<TranslationOutcome>
    where
        S: DocumentStore + ?Sized,
        F: Fn(usize, usize),
    {
        let total = documents.len();
        let target = self.translator.resolve_target_language(target_language);
        info!(
            "Translating {} document(s) to {} with {}",
            total,
            target,
            self.translator.provider_name()
        );

        let start_time = Instant::now();
        let processed = AtomicUsize::new(0);
        let processed = &processed;
        let progress_callback = &progress_callback;

        let mut results = stream::iter(documents.iter().enumerate())
            .map(|(index, document)| async move {
                let outcome = self.process_document(document, target, store, cancel).await;

                let current = processed.fetch_add(1, Ordering::SeqCst) + 1;
                progress_callback(current, total);

                (index, outcome)
            })
            .buffer_unordered(self.max_concurrent_documents.max(1))
            .collect::<Vec<_>>()
            .await;

        // Restore input order for reporting
        results.sort_by_key(|(index, _)| *index);
        let outcomes: Vec<TranslationOutcome> = results.into_iter().map(|(_, outcome)| outcome).collect();

        let succeeded = outcomes.iter().filter(|o| o.is_success()).count();
        info!(
            "Batch finished in {:?}: {} translated, {} failed",
            start_time.elapsed(),
            succeeded,
            outcomes.len() - succeeded
        );

        outcomes
    }

    /// Translate one document and store the result.
    ///
    /// The store is only touched once the full translation is available.
    async fn process_document<S>(
        &self,
        document: &Document,
        target_language: &str,
        store: &S,
        cancel: &CancelHandle,
    ) -> TranslationOutcome
    where
        S: DocumentStore + ?Sized,
    {
        let cancelled = || TranslationError::Cancelled {
            document: document.title.clone(),
        };

        let translated = if cancel.is_cancelled() {
            Err(cancelled())
        } else {
            tokio::select! {
                biased;
                _ = cancel.cancelled() => Err(cancelled()),
                result = self.translator.translate(&document.title, &document.content, Some(target_language)) => result,
            }
        };

        let result = match translated {
            Ok(text) => store
                .save_translation(document.id, &text)
                .await
                .map_err(|source| TranslationError::Persist {
                    document: document.title.clone(),
                    source,
                }),
            Err(error) => Err(error),
        };

        match result {
            Ok(()) => {
                let outcome = TranslationOutcome::success(document);
                info!("{}", outcome);
                outcome
            }
            Err(error) => {
                warn!("{}", error);
                TranslationOutcome::failure(document, &error)
            }
        }
    }
}
