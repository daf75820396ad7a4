/*!
 * Integration tests for the application lifecycle: config file to controller
 */

use archivist::app_config::Config;
use archivist::app_controller::{Controller, Selection};
use archivist::database::MemoryDocumentStore;
use archivist::errors::{AppError, ConfigError};
use archivist::providers::mock::MockTranslator;
use archivist::translation::CancelHandle;
use std::fs;
use std::sync::Arc;
use tempfile::TempDir;

use crate::common::sample_archive;

fn load(json: &str) -> Config {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("conf.json");
    fs::write(&path, json).unwrap();
    serde_json::from_str(&fs::read_to_string(&path).unwrap()).unwrap()
}

#[tokio::test]
async fn test_lifecycle_withoutApiKey_shouldNotOfferTranslate() {
    let config = load(r#"{"translation": {"provider": "yandex"}}"#);
    let store = MemoryDocumentStore::with_documents(sample_archive());
    let controller = Controller::with_store(config, Arc::new(store.clone()));

    assert!(!controller.translation_available());
    let result = controller.translate(&Selection::All, None).await;
    assert!(matches!(
        result,
        Err(AppError::Config(ConfigError::MissingApiKey { .. }))
    ));
    assert!((1..=4).all(|id| store.get(id).unwrap().translation.is_none()));

    // Browsing still works
    assert_eq!(controller.list_documents(None).await.unwrap().len(), 4);
}

#[tokio::test]
async fn test_lifecycle_withMockProvider_shouldTranslateWholeArchive() {
    let config = load(r#"{"translation": {"provider": "mock", "target_language": "fr"}, "log_level": "debug"}"#);
    let store = MemoryDocumentStore::with_documents(sample_archive());
    let mock = MockTranslator::uppercase();
    let controller = Controller::with_store(config, Arc::new(store.clone())).with_translator(Arc::new(mock.clone()));

    let seen = parking_lot::Mutex::new(0usize);
    let outcomes = controller
        .translate_with_progress(&Selection::All, None, &CancelHandle::new(), |done, _| *seen.lock() = done)
        .await
        .unwrap();

    assert_eq!(outcomes.len(), 4);
    assert_eq!(*seen.lock(), 4);
    assert!(mock.calls().iter().all(|c| c.target_language == "fr"));
    assert_eq!(
        store.get(4).unwrap().translation.as_deref(),
        Some("DER RAT TAGTE BIS SPÄT.")
    );
}

#[tokio::test]
async fn test_lifecycle_withEmptyMonth_shouldReturnNoOutcomes() {
    let config = load(r#"{"translation": {"provider": "mock"}}"#);
    let controller = Controller::with_store(config, Arc::new(MemoryDocumentStore::with_documents(sample_archive())));

    let outcomes = controller.translate(&Selection::Month("2022-06".to_string()), None).await.unwrap();
    assert!(outcomes.is_empty());
}

#[test]
fn test_lifecycle_browsingFromSyncCode_shouldListFacets() {
    let config = load(r#"{"translation": {"enabled": false}}"#);
    let controller = Controller::with_store(config, Arc::new(MemoryDocumentStore::with_documents(sample_archive())));

    let result = tokio_test::block_on(async { controller.month_facets().await });

    assert!(!controller.translation_available());
    assert_eq!(result.unwrap().len(), 3);
}
