/*!
 * Integration tests for chunked translation and batch write-back
 */

use archivist::providers::mock::MockTranslator;
use archivist::translation::{BatchRunner, CancelHandle, ChunkedTranslator, TranslationOptions, TranslationOutcome};
use std::sync::Arc;
use std::time::Duration;

use crate::common::{at, document, init_test_logging, RecordingStore};

fn runner(mock: &MockTranslator, options: TranslationOptions) -> BatchRunner {
    BatchRunner::new(ChunkedTranslator::new(Arc::new(mock.clone()), options).unwrap())
}

fn options(max_chunk_length: usize, max_concurrent_requests: usize) -> TranslationOptions {
    TranslationOptions {
        max_chunk_length,
        max_concurrent_requests,
        ..TranslationOptions::default()
    }
}

#[tokio::test]
async fn test_batch_withFailingMiddleDocument_shouldPersistOthers() {
    init_test_logging();
    let docs = vec![
        document(1, "One", "first text", at(2024, 1, 1)),
        document(2, "Two", "second POISON text", at(2024, 1, 2)),
        document(3, "Three", "third text", at(2024, 1, 3)),
    ];
    let store = RecordingStore::new(docs.clone());
    let mock = MockTranslator::fail_when_contains("POISON");

    let outcomes = runner(&mock, options(100, 4)).run_batch(&docs, Some("en"), &store).await;

    assert_eq!(outcomes.len(), 3);
    assert!(outcomes[0].is_success());
    assert!(!outcomes[1].is_success());
    assert!(outcomes[2].is_success());
    assert_eq!(outcomes[1].document_id(), 2);

    let mut saves = store.saves();
    saves.sort_unstable();
    assert_eq!(saves, vec![1, 3]);
    assert!(store.inner.get(2).unwrap().translation.is_none());
}

#[tokio::test]
async fn test_batch_withLongDocument_shouldTranslateEveryChunkInOrder() {
    let content = "abcdefghij".repeat(5);
    let docs = vec![document(7, "Long", &content, at(2024, 2, 1))];
    let store = RecordingStore::new(docs.clone());
    let mock = MockTranslator::uppercase();

    let outcomes = runner(&mock, options(12, 4)).run_batch(&docs, None, &store).await;

    assert_eq!(outcomes[0].message(), "Long successfully translated");
    assert_eq!(mock.call_count(), 5);
    let texts: Vec<String> = mock.calls().into_iter().map(|c| c.text).collect();
    assert_eq!(texts.concat(), content);
    assert_eq!(store.inner.get(7).unwrap().translation, Some(content.to_uppercase()));
}

#[tokio::test]
async fn test_batch_whenChunkFails_shouldStopDocumentAndSkipWrite() {
    let docs = vec![document(1, "Report", &"z".repeat(30), at(2024, 2, 1))];
    let store = RecordingStore::new(docs.clone());
    let mock = MockTranslator::fail_on_call(2);

    let outcomes = runner(&mock, options(10, 4)).run_batch(&docs, None, &store).await;

    assert_eq!(mock.call_count(), 2);
    assert!(store.saves().is_empty());
    match &outcomes[0] {
        TranslationOutcome::Failure { message, .. } => {
            assert!(message.starts_with("Report failed to translate: "));
            assert!(message.contains("Simulated failure"));
        }
        other => panic!("unexpected outcome: {:?}", other),
    }
}

#[tokio::test]
async fn test_batch_whenStoreFails_shouldReportFailureForThatDocumentOnly() {
    let docs = vec![
        document(1, "Kept", "a", at(2024, 1, 1)),
        document(2, "Lost", "b", at(2024, 1, 2)),
    ];
    let store = RecordingStore::new(docs.clone()).failing_on(&[2]);
    let mock = MockTranslator::identity();

    let outcomes = runner(&mock, options(100, 4)).run_batch(&docs, None, &store).await;

    assert!(outcomes[0].is_success());
    assert_eq!(outcomes[1].message(), "Lost failed to translate: storage error: disk full");
    assert_eq!(store.saves(), vec![1]);
}

#[tokio::test]
async fn test_batch_shouldNeverExceedRequestLimit() {
    let docs: Vec<_> = (1..=8)
        .map(|i| document(i, &format!("Doc {}", i), "some text", at(2024, 1, i as u32)))
        .collect();
    let store = RecordingStore::new(docs.clone());
    let mock = MockTranslator::slow(20);

    let outcomes = runner(&mock, options(4, 2))
        .with_max_concurrent_documents(8)
        .run_batch(&docs, None, &store)
        .await;

    assert!(outcomes.iter().all(|o| o.is_success()));
    // Eight documents compete, so the limit is reached but never passed
    assert_eq!(mock.max_in_flight(), 2);
    assert_eq!(store.saves().len(), 8);
}

#[tokio::test]
async fn test_batch_whenProviderHangs_shouldFailWithTimeout() {
    let docs = vec![document(1, "Slow", "text", at(2024, 1, 1))];
    let store = RecordingStore::new(docs.clone());
    let mock = MockTranslator::slow(2_000);
    let options = TranslationOptions {
        request_timeout: Duration::from_millis(50),
        ..options(100, 1)
    };

    let outcomes = runner(&mock, options).run_batch(&docs, None, &store).await;

    match &outcomes[0] {
        TranslationOutcome::Failure { reason, .. } => assert!(reason.contains("timed out")),
        other => panic!("unexpected outcome: {:?}", other),
    }
    assert!(store.saves().is_empty());
}

#[tokio::test]
async fn test_batch_whenCancelledMidway_shouldReportCancelledAndWriteNothing() {
    init_test_logging();
    let docs = vec![
        document(1, "A", "one", at(2024, 1, 1)),
        document(2, "B", "two", at(2024, 1, 2)),
    ];
    let store = RecordingStore::new(docs.clone());
    let mock = MockTranslator::slow(5_000);
    let runner = runner(&mock, options(100, 4));
    let cancel = CancelHandle::new();

    let (outcomes, _) = tokio::join!(
        runner.run_batch_with_progress(&docs, None, &store, &cancel, |_, _| {}),
        async {
            tokio::time::sleep(Duration::from_millis(50)).await;
            cancel.cancel();
        }
    );

    assert_eq!(outcomes.len(), 2);
    for outcome in &outcomes {
        match outcome {
            TranslationOutcome::Failure { reason, .. } => assert_eq!(reason, "translation cancelled"),
            other => panic!("unexpected outcome: {:?}", other),
        }
    }
    assert!(store.saves().is_empty());
}

#[tokio::test]
async fn test_batch_whenCancelledAfterFirstDocument_shouldKeepItsTranslation() {
    let docs = vec![
        document(1, "Done", "one", at(2024, 1, 1)),
        document(2, "Pending", "two", at(2024, 1, 2)),
    ];
    let store = RecordingStore::new(docs.clone());
    let mock = MockTranslator::identity();
    let runner = runner(&mock, options(100, 4)).with_max_concurrent_documents(1);
    let cancel = CancelHandle::new();

    let outcomes = runner
        .run_batch_with_progress(&docs, None, &store, &cancel, |done, _| {
            if done == 1 {
                cancel.cancel();
            }
        })
        .await;

    assert_eq!(outcomes[0].message(), "Done successfully translated");
    match &outcomes[1] {
        TranslationOutcome::Failure { document_id, reason, .. } => {
            assert_eq!(*document_id, 2);
            assert_eq!(reason, "translation cancelled");
        }
        other => panic!("unexpected outcome: {:?}", other),
    }
    assert_eq!(mock.call_count(), 1);
    assert_eq!(store.saves(), vec![1]);
    assert_eq!(store.inner.get(1).unwrap().translation.as_deref(), Some("one"));
    assert!(store.inner.get(2).unwrap().translation.is_none());
}

#[tokio::test]
async fn test_batch_withEmptyContent_shouldStoreEmptyTranslation() {
    let docs = vec![document(1, "Blank", "", at(2024, 1, 1))];
    let store = RecordingStore::new(docs.clone());
    let mock = MockTranslator::identity();

    let outcomes = runner(&mock, options(100, 4)).run_batch(&docs, None, &store).await;

    assert!(outcomes[0].is_success());
    assert_eq!(mock.call_count(), 0);
    assert_eq!(store.inner.get(1).unwrap().translation.as_deref(), Some(""));
}
