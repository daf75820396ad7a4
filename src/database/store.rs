use async_trait::async_trait;

use crate::document::Document;
use crate::errors::PersistError;

/// Where documents come from and where translations go back to
#[async_trait]
pub trait DocumentStore: Send + Sync {
    /// All documents, oldest first
    async fn list_documents(&self) -> Result<Vec<Document>, PersistError>;

    /// The documents with the given ids, in the order the ids were given.
    /// Unknown ids are skipped.
    async fn get_documents(&self, ids: &[i64]) -> Result<Vec<Document>, PersistError>;

    /// Overwrite the translation of one document
    async fn save_translation(&self, id: i64, translation: &str) -> Result<(), PersistError>;
}
