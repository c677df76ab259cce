use std::sync::{Arc, Mutex};

use lughat_core::catalog::Snapshot;
use lughat_core::error::StoreError;
use lughat_core::store::{LanguageStore, SnapshotCallback};
use lughat_types::{Caller, DictionaryEntry};

use super::{admin, language, seed};
use crate::memory_store::InMemoryStore;

fn recorder() -> (Arc<Mutex<Vec<Snapshot>>>, SnapshotCallback) {
    let seen: Arc<Mutex<Vec<Snapshot>>> = Arc::new(Mutex::new(Vec::new()));
    let sink = seen.clone();
    let callback: SnapshotCallback = Box::new(move |result: Result<Snapshot, StoreError>| {
        if let Ok(snapshot) = result {
            sink.lock().unwrap().push(snapshot);
        }
    });
    (seen, callback)
}

#[tokio::test]
async fn test_subscribe_delivers_sorted_snapshot() {
    let store = InMemoryStore::new(seed());
    let (seen, callback) = recorder();
    let _sub = store.subscribe(callback);

    let seen = seen.lock().unwrap();
    assert_eq!(seen.len(), 1);
    let names: Vec<_> = seen[0].iter().map(|l| l.name.as_str()).collect();
    assert_eq!(names, vec!["Balochi", "Punjabi", "Sindhi"]);
}

#[tokio::test]
async fn test_visitor_cannot_mutate() {
    let store = InMemoryStore::new(seed());
    let (seen, callback) = recorder();
    let _sub = store.subscribe(callback);

    let err = store
        .create(&Caller::Visitor, language("", "Saraiki", "Punjab", &[]))
        .await
        .unwrap_err();
    assert!(matches!(err, StoreError::PermissionDenied));
    assert!(matches!(
        store.delete(&Caller::Visitor, "sd").await,
        Err(StoreError::PermissionDenied)
    ));
    assert_eq!(seen.lock().unwrap().len(), 1);
}

#[tokio::test]
async fn test_create_stamps_and_pushes() {
    let store = InMemoryStore::new(seed());
    let (seen, callback) = recorder();
    let _sub = store.subscribe(callback);

    let id = store
        .create(&admin(), language("ignored", "Saraiki", "Punjab", &[]))
        .await
        .unwrap();

    let seen = seen.lock().unwrap();
    assert_eq!(seen.len(), 2);
    let created = seen[1].iter().find(|l| l.id == id).unwrap();
    assert_eq!(created.created_by.as_deref(), Some("admin-1"));
    assert!(created.created_at.is_some());
    assert_eq!(created.dictionary, vec![DictionaryEntry::placeholder()]);
}

#[tokio::test]
async fn test_update_keeps_creation_stamp() {
    let mut langs = seed();
    langs[0].created_by = Some("founder".to_string());
    let store = InMemoryStore::new(langs);

    let mut changed = language("sd", "Sindhi", "Sindh", &[("Sain", "Sir")]);
    changed.status = Some("Stable".to_string());
    store.update(&admin(), "sd", changed).await.unwrap();

    let (seen, callback) = recorder();
    let _sub = store.subscribe(callback);
    let seen = seen.lock().unwrap();
    let sindhi = seen[0].iter().find(|l| l.id == "sd").unwrap();
    assert_eq!(sindhi.created_by.as_deref(), Some("founder"));
    assert_eq!(sindhi.updated_by.as_deref(), Some("admin-1"));
    assert_eq!(sindhi.dictionary[0].word, "Sain");
}

#[tokio::test]
async fn test_invalid_draft_rejected() {
    let store = InMemoryStore::new(seed());
    let err = store
        .update(&admin(), "sd", language("sd", "Sindhi", "Atlantis", &[]))
        .await
        .unwrap_err();
    assert!(matches!(err, StoreError::Invalid(_)));

    let err = store.delete(&admin(), "missing").await.unwrap_err();
    assert!(matches!(err, StoreError::NotFound(id) if id == "missing"));
}

#[tokio::test]
async fn test_dropped_subscription_detaches() {
    let store = InMemoryStore::new(seed());
    let (seen, callback) = recorder();
    let sub = store.subscribe(callback);
    assert_eq!(store.subscriber_count(), 1);

    drop(sub);
    assert_eq!(store.subscriber_count(), 0);

    store.delete(&admin(), "bal").await.unwrap();
    assert_eq!(seen.lock().unwrap().len(), 1);
}
