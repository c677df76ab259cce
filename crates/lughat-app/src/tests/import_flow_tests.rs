use std::io::Write;

use lughat_core::types::AppEvent;
use lughat_import::DICTIONARY_TEMPLATE;
use lughat_types::{ImportStatus, Notice};

use crate::events::import::deliver_status;

use super::event_flow_tests::Harness;
use super::{admin, seed};

fn csv_file(content: &str) -> tempfile::NamedTempFile {
    let mut file = tempfile::Builder::new().suffix(".csv").tempfile().unwrap();
    file.write_all(content.as_bytes()).unwrap();
    file
}

async fn final_status(harness: &Harness) -> ImportStatus {
    harness
        .until(|event| match event {
            AppEvent::ImportStatusChanged(status) if !status.is_loading() => Some(status),
            _ => None,
        })
        .await
}

#[tokio::test]
async fn test_edit_preloads_existing_words() {
    let harness = Harness::start(seed());
    harness.view().await;

    harness.tx.send(AppEvent::EditLanguage("pa".to_string())).await.unwrap();
    assert_eq!(
        final_status(&harness).await,
        ImportStatus::Success("2 words loaded from existing data".to_string())
    );
    assert_eq!(harness.state.editing.read().await.as_deref(), Some("pa"));
    harness.close().await;
}

#[tokio::test]
async fn test_import_and_submit_replaces_dictionary() {
    let harness = Harness::start(seed());
    harness.view().await;

    let file = csv_file(DICTIONARY_TEMPLATE);
    harness
        .tx
        .send(AppEvent::ImportCsv {
            language_id: Some("bal".to_string()),
            path: file.path().to_path_buf(),
        })
        .await
        .unwrap();
    harness.tx.send(AppEvent::SubmitEdit(admin())).await.unwrap();

    assert_eq!(harness.notice().await, Notice::Info("Language updated (bal)".to_string()));
    let model = harness.view().await;
    assert_eq!(model.filtered_count, 7);

    let catalog = harness.state.catalog.read().await;
    let balochi = catalog.find("bal").unwrap();
    assert_eq!(balochi.dictionary.len(), 3);
    assert_eq!(balochi.updated_by.as_deref(), Some("admin-1"));
    drop(catalog);

    assert!(harness.state.editing.read().await.is_none());
    harness.close().await;
}

#[tokio::test]
async fn test_failed_import_reports_status() {
    let harness = Harness::start(seed());
    harness.view().await;

    let file = csv_file("name,def\nSalam,Hello\n");
    harness
        .tx
        .send(AppEvent::ImportCsv {
            language_id: None,
            path: file.path().to_path_buf(),
        })
        .await
        .unwrap();

    assert_eq!(
        final_status(&harness).await,
        ImportStatus::Error("Missing required columns: word, meaning".to_string())
    );
    harness.close().await;
}

#[tokio::test]
async fn test_latest_import_wins() {
    let harness = Harness::start(seed());
    harness.view().await;

    // both finish before or after the edit starts; neither may leak into it
    let first = csv_file(DICTIONARY_TEMPLATE);
    let second = csv_file("word,meaning\nKhair,Welfare\n");
    for file in [&first, &second] {
        harness
            .tx
            .send(AppEvent::ImportCsv {
                language_id: None,
                path: file.path().to_path_buf(),
            })
            .await
            .unwrap();
    }
    harness.tx.send(AppEvent::EditLanguage("sd".to_string())).await.unwrap();
    harness
        .tx
        .send(AppEvent::ImportCsv {
            language_id: None,
            path: second.path().to_path_buf(),
        })
        .await
        .unwrap();
    harness.tx.send(AppEvent::SubmitEdit(admin())).await.unwrap();

    assert_eq!(harness.notice().await, Notice::Info("Language updated (sd)".to_string()));
    let catalog = harness.state.catalog.read().await;
    let words: Vec<_> = catalog.find("sd").unwrap().dictionary.iter().map(|e| e.word.clone()).collect();
    assert_eq!(words, vec!["Khair"]);
    drop(catalog);
    harness.close().await;
}

#[tokio::test]
async fn test_submit_without_edit() {
    let harness = Harness::start(seed());
    harness.view().await;

    harness.tx.send(AppEvent::SubmitEdit(admin())).await.unwrap();
    assert_eq!(
        harness.notice().await,
        Notice::Error("No language is being edited".to_string())
    );
    harness.close().await;
}

#[tokio::test]
async fn test_status_to_closed_presenter_is_reported() {
    let (tx, rx) = kanal::bounded_async::<AppEvent>(1);
    assert!(deliver_status(&tx, ImportStatus::Idle).await);
    assert!(matches!(rx.recv().await, Ok(AppEvent::ImportStatusChanged(ImportStatus::Idle))));

    drop(rx);
    assert!(!deliver_status(&tx, ImportStatus::Loading("Processing CSV file...".to_string())).await);
}
