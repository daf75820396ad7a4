/*!
 * Repository layer for database operations.
 *
 * This module provides the SQLite-backed document store, abstracting away the SQL
 * details and providing type-safe access.
 */

use anyhow::Result;
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use log::debug;
use rusqlite::{params, Connection, Row};

use super::connection::DatabaseConnection;
use super::store::DocumentStore;
use crate::document::Document;
use crate::errors::PersistError;

/// Repository for database operations
#[derive(Clone)]
pub struct Repository {
    /// Database connection
    db: DatabaseConnection,
}

impl Repository {
    /// Create a new repository with the given database connection
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    /// Create a repository with the default database location
    pub fn new_default() -> Result<Self> {
        let db = DatabaseConnection::new_default()?;
        Ok(Self::new(db))
    }

    /// Create a repository with an in-memory database (for testing)
    pub fn new_in_memory() -> Result<Self> {
        let db = DatabaseConnection::new_in_memory()?;
        Ok(Self::new(db))
    }

    /// Insert documents, replacing any with the same id
    pub async fn import_documents(&self, documents: Vec<Document>) -> Result<usize> {
        self.db
            .transaction_async(move |tx| {
                let mut stmt = tx.prepare(
                    r#"
                    INSERT OR REPLACE INTO documents (id, title, content, translation, created)
                    VALUES (?1, ?2, ?3, ?4, ?5)
                    "#,
                )?;

                for document in &documents {
                    stmt.execute(params![
                        document.id,
                        document.title,
                        document.content,
                        document.translation,
                        document.created,
                    ])?;
                }

                debug!("Imported {} document(s)", documents.len());
                Ok(documents.len())
            })
            .await
    }

    /// Count stored documents
    pub async fn count_documents(&self) -> Result<i64> {
        self.db
            .execute_async(|conn| {
                Ok(conn.query_row("SELECT COUNT(*) FROM documents", [], |row| row.get(0))?)
            })
            .await
    }

    fn row_to_document(row: &Row<'_>) -> rusqlite::Result<Document> {
        Ok(Document {
            id: row.get(0)?,
            title: row.get(1)?,
            content: row.get(2)?,
            translation: row.get(3)?,
            created: row.get::<_, DateTime<Utc>>(4)?,
        })
    }

    fn get_document_sync(conn: &Connection, id: i64) -> Result<Option<Document>> {
        let mut stmt = conn.prepare_cached(
            "SELECT id, title, content, translation, created FROM documents WHERE id = ?1",
        )?;
        let mut rows = stmt.query_map([id], Self::row_to_document)?;
        Ok(rows.next().transpose()?)
    }
}

fn storage_error(error: anyhow::Error) -> PersistError {
    PersistError::Storage(error.to_string())
}

#[async_trait]
impl DocumentStore for Repository {
    async fn list_documents(&self) -> Result<Vec<Document>, PersistError> {
        self.db
            .execute_async(|conn| {
                let mut stmt = conn.prepare(
                    "SELECT id, title, content, translation, created FROM documents ORDER BY created, id",
                )?;
                let documents = stmt
                    .query_map([], Self::row_to_document)?
                    .collect::<rusqlite::Result<Vec<_>>>()?;
                Ok(documents)
            })
            .await
            .map_err(storage_error)
    }

    async fn get_documents(&self, ids: &[i64]) -> Result<Vec<Document>, PersistError> {
        let ids = ids.to_vec();

        self.db
            .execute_async(move |conn| {
                let mut documents = Vec::with_capacity(ids.len());
                for id in ids {
                    if let Some(document) = Self::get_document_sync(conn, id)? {
                        documents.push(document);
                    }
                }
                Ok(documents)
            })
            .await
            .map_err(storage_error)
    }

    async fn save_translation(&self, id: i64, translation: &str) -> Result<(), PersistError> {
        let translation = translation.to_string();

        let updated = self.db
            .execute_async(move |conn| {
                Ok(conn.execute(
                    "UPDATE documents SET translation = ?1 WHERE id = ?2",
                    params![translation, id],
                )?)
            })
            .await
            .map_err(storage_error)?;

        if updated == 0 {
            return Err(PersistError::NotFound(id));
        }

        Ok(())
    }
}
