use anyhow::{Context, Result};
use log::{debug, info};
use std::sync::Arc;

use crate::app_config::{Config, TranslationProvider};
use crate::database::{DatabaseConnection, DocumentStore, Repository};
use crate::document::Document;
use crate::errors::{AppError, ConfigError};
use crate::facets::{self, MonthFacet};
use crate::providers::{self, Translator};
use crate::translation::{BatchRunner, CancelHandle, ChunkedTranslator, TranslationOutcome};

// @module: Application controller for archive browsing and translation

/// Which documents a translate request covers
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Selection {
    /// Explicit document ids, in the given order
    Ids(Vec<i64>),
    /// Every document created in the month with this `YYYY-MM` key
    Month(String),
    /// The whole archive
    All,
}

/// Main application controller
pub struct Controller {
    // @field: App configuration
    config: Config,

    // @field: Where documents are read from and translations written to
    store: Arc<dyn DocumentStore>,

    // @field: Provider used instead of the configured one
    translator: Option<Arc<dyn Translator>>,
}

impl Controller {
    /// Create a controller over an existing store
    pub fn with_store(config: Config, store: Arc<dyn DocumentStore>) -> Self {
        Self {
            config,
            store,
            translator: None,
        }
    }

    /// Create a controller over the SQLite archive named in the configuration
    pub fn open(config: Config) -> Result<Self> {
        let repository = open_repository(&config)?;
        Ok(Self::with_store(config, Arc::new(repository)))
    }

    /// Replace the configured provider, e.g. with a mock
    pub fn with_translator(mut self, translator: Arc<dyn Translator>) -> Self {
        self.translator = Some(translator);
        self
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Whether the translate operation may be offered
    pub fn translation_available(&self) -> bool {
        self.batch_runner().is_ok()
    }

    /// Build the runner for the configured provider.
    ///
    /// Fails when translation is disabled or the provider is missing credentials.
    pub fn batch_runner(&self) -> Result<BatchRunner, ConfigError> {
        let translator = match &self.translator {
            Some(translator) => {
                // An injected provider still honours the switch and the limits
                let mut config = self.config.translation.clone();
                config.provider = TranslationProvider::Mock;
                config.validate()?;
                Arc::clone(translator)
            }
            None => providers::build_translator(&self.config.translation)?,
        };

        let chunked = ChunkedTranslator::new(translator, self.config.translation.translation_options())?;
        Ok(BatchRunner::new(chunked))
    }

    /// Resolve a selection to the documents it covers
    pub async fn select_documents(&self, selection: &Selection) -> Result<Vec<Document>, AppError> {
        let documents = match selection {
            Selection::Ids(ids) => self.store.get_documents(ids).await?,
            Selection::Month(key) => facets::apply_facet(self.store.list_documents().await?, Some(key.as_str()))?,
            Selection::All => self.store.list_documents().await?,
        };
        debug!("Selection {:?} covers {} document(s)", selection, documents.len());
        Ok(documents)
    }

    /// Translate the selected documents and store the results
    pub async fn translate(
        &self,
        selection: &Selection,
        target_language: Option<&str>,
    ) -> Result<Vec<TranslationOutcome>, AppError> {
        self.translate_with_progress(selection, target_language, &CancelHandle::new(), |_, _| {})
            .await
    }

    /// Like [`translate`](Self::translate), stopping when `cancel` fires and
    /// reporting `(done, total)` after each document
    pub async fn translate_with_progress<F>(
        &self,
        selection: &Selection,
        target_language: Option<&str>,
        cancel: &CancelHandle,
        progress_callback: F,
    ) -> Result<Vec<TranslationOutcome>, AppError>
    where
        F: Fn(usize, usize),
    {
        let runner = self.batch_runner()?;
        let documents = self.select_documents(selection).await?;

        if documents.is_empty() {
            info!("Nothing to translate");
            return Ok(Vec::new());
        }

        Ok(runner
            .run_batch_with_progress(&documents, target_language, self.store.as_ref(), cancel, progress_callback)
            .await)
    }

    /// Months that have at least one document, newest first
    pub async fn month_facets(&self) -> Result<Vec<MonthFacet>, AppError> {
        let documents = self.store.list_documents().await?;
        Ok(facets::derive_facets(&documents))
    }

    /// Documents, optionally restricted to one month
    pub async fn list_documents(&self, month: Option<&str>) -> Result<Vec<Document>, AppError> {
        let documents = self.store.list_documents().await?;
        Ok(facets::apply_facet(documents, month)?)
    }
}

/// Open the SQLite archive at the configured path, or the default location
pub fn open_repository(config: &Config) -> Result<Repository> {
    let db = match &config.database_path {
        Some(path) => DatabaseConnection::new(path)
            .with_context(|| format!("Failed to open database: {}", path.display()))?,
        None => DatabaseConnection::new_default().context("Failed to open default database")?,
    };
    Ok(Repository::new(db))
}
