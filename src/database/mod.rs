/*!
 * Document storage.
 *
 * This module provides the `DocumentStore` interface the translation core writes
 * back through, with two implementations:
 * - `Repository`: SQLite-backed archive
 * - `MemoryDocumentStore`: in-memory map for tests and embedding
 */

pub mod connection;
pub mod memory;
pub mod repository;
pub mod schema;
pub mod store;

// Re-export main types
pub use connection::DatabaseConnection;
pub use memory::MemoryDocumentStore;
pub use repository::Repository;
pub use store::DocumentStore;
