/*!
 * Common test utilities for the archivist test suite
 */

use archivist::database::{DocumentStore, MemoryDocumentStore};
use archivist::document::Document;
use archivist::errors::PersistError;
use async_trait::async_trait;
use chrono::{DateTime, TimeZone, Utc};
use parking_lot::Mutex;
use std::collections::HashSet;

/// Route `log` output through env_logger; safe to call from every test
pub fn init_test_logging() {
    let _ = env_logger::builder().is_test(true).try_init();
}

/// Timestamp helper
pub fn at(year: i32, month: u32, day: u32) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(year, month, day, 12, 0, 0).unwrap()
}

/// Creates a test document
pub fn document(id: i64, title: &str, content: &str, created: DateTime<Utc>) -> Document {
    Document::new(id, title, content, created)
}

/// A small archive spread over three months of two years
pub fn sample_archive() -> Vec<Document> {
    vec![
        document(1, "Harbour report", "Der Hafen war heute ruhig.", at(2023, 12, 30)),
        document(2, "Market notes", "Die Preise sind gestiegen.", at(2024, 1, 5)),
        document(3, "Weather", "Es regnet seit drei Tagen.", at(2024, 1, 20)),
        document(4, "Council minutes", "Der Rat tagte bis spät.", at(2024, 3, 2)),
    ]
}

/// Store wrapper that records writes and can reject chosen documents
#[derive(Debug, Default)]
pub struct RecordingStore {
    pub inner: MemoryDocumentStore,
    saves: Mutex<Vec<i64>>,
    failing_ids: HashSet<i64>,
}

impl RecordingStore {
    pub fn new(documents: Vec<Document>) -> Self {
        Self {
            inner: MemoryDocumentStore::with_documents(documents),
            ..Self::default()
        }
    }

    /// Reject writes for these ids with a storage error
    pub fn failing_on(mut self, ids: &[i64]) -> Self {
        self.failing_ids = ids.iter().copied().collect();
        self
    }

    /// Ids written, in write order
    pub fn saves(&self) -> Vec<i64> {
        self.saves.lock().clone()
    }
}

#[async_trait]
impl DocumentStore for RecordingStore {
    async fn list_documents(&self) -> Result<Vec<Document>, PersistError> {
        self.inner.list_documents().await
    }

    async fn get_documents(&self, ids: &[i64]) -> Result<Vec<Document>, PersistError> {
        self.inner.get_documents(ids).await
    }

    async fn save_translation(&self, id: i64, translation: &str) -> Result<(), PersistError> {
        if self.failing_ids.contains(&id) {
            return Err(PersistError::Storage("disk full".to_string()));
        }
        self.saves.lock().push(id);
        self.inner.save_translation(id, translation).await
    }
}
