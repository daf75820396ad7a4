/*!
 * In-memory document store.
 *
 * Used by tests and by hosts that keep their documents elsewhere and only want
 * the translation core.
 */

use async_trait::async_trait;
use parking_lot::RwLock;
use std::collections::BTreeMap;
use std::sync::Arc;

use super::store::DocumentStore;
use crate::document::Document;
use crate::errors::PersistError;

/// Document store backed by a map
#[derive(Debug, Clone, Default)]
pub struct MemoryDocumentStore {
    documents: Arc<RwLock<BTreeMap<i64, Document>>>,
}

impl MemoryDocumentStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a store holding the given documents
    pub fn with_documents(documents: impl IntoIterator<Item = Document>) -> Self {
        let store = Self::new();
        for document in documents {
            store.insert(document);
        }
        store
    }

    /// Insert or replace a document
    pub fn insert(&self, document: Document) {
        self.documents.write().insert(document.id, document);
    }

    /// Snapshot of one document
    pub fn get(&self, id: i64) -> Option<Document> {
        self.documents.read().get(&id).cloned()
    }

    pub fn len(&self) -> usize {
        self.documents.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.documents.read().is_empty()
    }
}

#[async_trait]
impl DocumentStore for MemoryDocumentStore {
    async fn list_documents(&self) -> Result<Vec<Document>, PersistError> {
        let mut documents: Vec<Document> = self.documents.read().values().cloned().collect();
        documents.sort_by_key(|d| (d.created, d.id));
        Ok(documents)
    }

    async fn get_documents(&self, ids: &[i64]) -> Result<Vec<Document>, PersistError> {
        let documents = self.documents.read();
        Ok(ids.iter().filter_map(|id| documents.get(id).cloned()).collect())
    }

    async fn save_translation(&self, id: i64, translation: &str) -> Result<(), PersistError> {
        let mut documents = self.documents.write();
        let document = documents.get_mut(&id).ok_or(PersistError::NotFound(id))?;
        document.translation = Some(translation.to_string());
        Ok(())
    }
}
