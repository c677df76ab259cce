use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use chrono::Utc;
use lughat_core::catalog::Snapshot;
use lughat_core::draft::prepare_draft;
use lughat_core::error::StoreError;
use lughat_core::preprocess::fold;
use lughat_core::store::{LanguageStore, SnapshotCallback, Subscription};
use lughat_types::{Caller, Language};

type Subscribers = HashMap<u64, Arc<SnapshotCallback>>;

/// Process-local language collection with push notifications.
///
/// Snapshots are ordered by language name. Every successful mutation pushes
/// a fresh snapshot to all subscribers before returning.
#[derive(Default)]
pub struct InMemoryStore {
    languages: Mutex<Vec<Language>>,
    subscribers: Arc<Mutex<Subscribers>>,
    next_subscriber: AtomicU64,
}

fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(PoisonError::into_inner)
}

fn require_admin(caller: &Caller) -> Result<&str, StoreError> {
    caller.uid().ok_or(StoreError::PermissionDenied)
}

impl InMemoryStore {
    pub fn new(languages: Vec<Language>) -> Self {
        let store = Self::default();
        *lock(&store.languages) = languages;
        store
    }

    fn snapshot(&self) -> Snapshot {
        let mut languages = lock(&self.languages).clone();
        languages.sort_by_cached_key(|l| fold(&l.name));
        Arc::new(languages)
    }

    fn publish(&self) {
        let snapshot = self.snapshot();
        let subscribers: Vec<Arc<SnapshotCallback>> = lock(&self.subscribers).values().cloned().collect();
        tracing::debug!(
            "Pushing snapshot of {} languages to {} subscribers",
            snapshot.len(),
            subscribers.len()
        );
        for callback in subscribers {
            (*callback)(Ok(Arc::clone(&snapshot)));
        }
    }

    pub fn subscriber_count(&self) -> usize {
        lock(&self.subscribers).len()
    }
}

#[async_trait::async_trait]
impl LanguageStore for InMemoryStore {
    fn subscribe(&self, callback: SnapshotCallback) -> Subscription {
        let id = self.next_subscriber.fetch_add(1, Ordering::SeqCst);
        let callback = Arc::new(callback);
        lock(&self.subscribers).insert(id, Arc::clone(&callback));
        (*callback)(Ok(self.snapshot()));

        let subscribers = Arc::clone(&self.subscribers);
        Subscription::new(move || {
            lock(&subscribers).remove(&id);
            tracing::debug!("Subscriber {} detached", id);
        })
    }

    async fn create(&self, caller: &Caller, draft: Language) -> Result<String, StoreError> {
        let uid = require_admin(caller)?.to_string();
        let mut language = prepare_draft(draft)?;

        let id = uuid::Uuid::new_v4().to_string();
        let now = Utc::now();
        language.id = id.clone();
        language.created_at = Some(now);
        language.updated_at = Some(now);
        language.created_by = Some(uid.clone());
        language.updated_by = Some(uid);

        tracing::info!("Creating language {} ({})", language.name, id);
        lock(&self.languages).push(language);
        self.publish();
        Ok(id)
    }

    async fn update(&self, caller: &Caller, id: &str, language: Language) -> Result<(), StoreError> {
        let uid = require_admin(caller)?.to_string();
        let mut language = prepare_draft(language)?;
        {
            let mut languages = lock(&self.languages);
            let current = languages
                .iter_mut()
                .find(|l| l.id == id)
                .ok_or_else(|| StoreError::NotFound(id.to_string()))?;

            language.id = id.to_string();
            language.created_at = current.created_at;
            language.created_by = current.created_by.take();
            language.updated_at = Some(Utc::now());
            language.updated_by = Some(uid);
            *current = language;
        }

        tracing::info!("Updated language {}", id);
        self.publish();
        Ok(())
    }

    async fn delete(&self, caller: &Caller, id: &str) -> Result<(), StoreError> {
        require_admin(caller)?;
        {
            let mut languages = lock(&self.languages);
            let before = languages.len();
            languages.retain(|l| l.id != id);
            if languages.len() == before {
                return Err(StoreError::NotFound(id.to_string()));
            }
        }

        tracing::info!("Deleted language {}", id);
        self.publish();
        Ok(())
    }
}
