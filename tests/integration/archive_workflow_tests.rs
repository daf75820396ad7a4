/*!
 * Integration tests for the SQLite-backed archive
 */

use archivist::app_config::{Config, TranslationProvider};
use archivist::app_controller::{open_repository, Controller, Selection};
use archivist::database::DocumentStore;
use tempfile::TempDir;

use crate::common::sample_archive;

fn config_in(dir: &TempDir) -> Config {
    let mut config = Config::default();
    config.translation.provider = TranslationProvider::Mock;
    config.database_path = Some(dir.path().join("nested").join("archive.db"));
    config
}

#[tokio::test]
async fn test_archive_importTranslateReopen_shouldKeepTranslations() {
    let dir = TempDir::new().unwrap();
    let config = config_in(&dir);

    let repository = open_repository(&config).unwrap();
    assert_eq!(repository.import_documents(sample_archive()).await.unwrap(), 4);

    let controller = Controller::open(config.clone()).unwrap();
    let outcomes = controller
        .translate(&Selection::Month("2024-01".to_string()), Some("de"))
        .await
        .unwrap();
    assert_eq!(outcomes.len(), 2);
    assert!(outcomes.iter().all(|o| o.is_success()));
    drop(controller);

    // A fresh connection sees what the controller wrote
    let reopened = open_repository(&config).unwrap();
    let documents = reopened.list_documents().await.unwrap();
    let translated: Vec<i64> = documents.iter().filter(|d| d.is_translated()).map(|d| d.id).collect();
    assert_eq!(translated, vec![2, 3]);
    assert_eq!(documents[1].translation.as_deref(), Some("Die Preise sind gestiegen."));
}

#[tokio::test]
async fn test_archive_monthFacets_shouldComeFromStoredDocuments() {
    let dir = TempDir::new().unwrap();
    let config = config_in(&dir);
    open_repository(&config).unwrap().import_documents(sample_archive()).await.unwrap();

    let controller = Controller::open(config).unwrap();
    let labels: Vec<String> = controller
        .month_facets()
        .await
        .unwrap()
        .into_iter()
        .map(|f| f.label)
        .collect();

    assert_eq!(labels, vec!["March 2024", "January 2024", "December 2023"]);
}

#[tokio::test]
async fn test_archive_translateByIds_shouldSkipUnknownIds() {
    let dir = TempDir::new().unwrap();
    let config = config_in(&dir);
    open_repository(&config).unwrap().import_documents(sample_archive()).await.unwrap();

    let controller = Controller::open(config).unwrap();
    let outcomes = controller.translate(&Selection::Ids(vec![4, 99, 1]), None).await.unwrap();

    let ids: Vec<i64> = outcomes.iter().map(|o| o.document_id()).collect();
    assert_eq!(ids, vec![4, 1]);
}

#[tokio::test]
async fn test_archive_reimport_shouldReplaceExistingDocuments() {
    let dir = TempDir::new().unwrap();
    let config = config_in(&dir);
    let repository = open_repository(&config).unwrap();

    repository.import_documents(sample_archive()).await.unwrap();
    let mut updated = sample_archive();
    updated[0].title = "Harbour report (revised)".to_string();
    repository.import_documents(updated).await.unwrap();

    assert_eq!(repository.count_documents().await.unwrap(), 4);
    let first = repository.get_documents(&[1]).await.unwrap();
    assert_eq!(first[0].title, "Harbour report (revised)");
}
