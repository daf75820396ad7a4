/*!
 * SQLite connection handling.
 *
 * One connection per archive, shared behind a mutex. Blocking SQLite calls are
 * moved off the async runtime with `spawn_blocking`.
 */

use anyhow::{Context, Result, anyhow};
use log::{debug, info};
use parking_lot::Mutex;
use rusqlite::{Connection, Transaction};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Duration;

use super::schema;

/// How long a write waits for another process holding the archive
const BUSY_TIMEOUT: Duration = Duration::from_secs(5);

/// Shared handle to an archive database
#[derive(Clone)]
pub struct DatabaseConnection {
    /// Database file, or `:memory:`
    db_path: PathBuf,
    connection: Arc<Mutex<Connection>>,
}

impl DatabaseConnection {
    /// Open the archive in the platform data directory
    pub fn new_default() -> Result<Self> {
        Self::new(Self::default_database_path()?)
    }

    /// Open (and create if needed) the archive at `db_path`
    pub fn new<P: AsRef<Path>>(db_path: P) -> Result<Self> {
        let db_path = db_path.as_ref().to_path_buf();

        if let Some(parent) = db_path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create archive directory: {:?}", parent))?;
        }

        info!("Opening archive at {:?}", db_path);
        let conn = Connection::open(&db_path)
            .with_context(|| format!("Failed to open archive: {:?}", db_path))?;
        conn.busy_timeout(BUSY_TIMEOUT)?;

        Self::from_connection(conn, db_path)
    }

    /// Throwaway archive that lives as long as the handle
    pub fn new_in_memory() -> Result<Self> {
        debug!("Opening in-memory archive");
        let conn = Connection::open_in_memory().context("Failed to create in-memory archive")?;
        Self::from_connection(conn, PathBuf::from(":memory:"))
    }

    fn from_connection(conn: Connection, db_path: PathBuf) -> Result<Self> {
        schema::initialize_schema(&conn)?;
        Ok(Self {
            db_path,
            connection: Arc::new(Mutex::new(conn)),
        })
    }

    /// `<data dir>/archivist/archive.db`
    pub fn default_database_path() -> Result<PathBuf> {
        let base_dir = dirs::data_local_dir()
            .or_else(dirs::data_dir)
            .ok_or_else(|| anyhow!("Could not determine data directory"))?;

        Ok(base_dir.join("archivist").join("archive.db"))
    }

    pub fn path(&self) -> &Path {
        &self.db_path
    }

    /// Run `f` against the connection on the blocking pool
    pub async fn execute_async<F, T>(&self, f: F) -> Result<T>
    where
        F: FnOnce(&Connection) -> Result<T> + Send + 'static,
        T: Send + 'static,
    {
        let connection = Arc::clone(&self.connection);

        tokio::task::spawn_blocking(move || f(&*connection.lock()))
            .await
            .context("Archive task panicked")?
    }

    /// Run `f` inside a transaction that commits only if `f` succeeds
    pub async fn transaction_async<F, T>(&self, f: F) -> Result<T>
    where
        F: FnOnce(&Transaction<'_>) -> Result<T> + Send + 'static,
        T: Send + 'static,
    {
        let connection = Arc::clone(&self.connection);

        tokio::task::spawn_blocking(move || {
            let mut conn = connection.lock();
            let tx = conn.transaction()?;
            let result = f(&tx)?;
            tx.commit()?;
            Ok(result)
        })
        .await
        .context("Archive transaction task panicked")?
    }
}
