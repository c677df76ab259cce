use lughat_types::{Caller, Language};

use crate::catalog::Snapshot;
use crate::error::StoreError;

/// Receives every snapshot the store pushes, or the error that stopped it
pub type SnapshotCallback = Box<dyn Fn(Result<Snapshot, StoreError>) + Send + Sync>;

/// Handle to a live subscription; detaches when dropped
pub struct Subscription {
    detach: Option<Box<dyn FnOnce() + Send>>,
}

impl Subscription {
    pub fn new(detach: impl FnOnce() + Send + 'static) -> Self {
        Self {
            detach: Some(Box::new(detach)),
        }
    }

    /// Stop receiving snapshots
    pub fn unsubscribe(mut self) {
        self.detach_now();
    }

    fn detach_now(&mut self) {
        if let Some(detach) = self.detach.take() {
            detach();
        }
    }
}

impl Drop for Subscription {
    fn drop(&mut self) {
        self.detach_now();
    }
}

impl std::fmt::Debug for Subscription {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Subscription")
            .field("attached", &self.detach.is_some())
            .finish()
    }
}

/// Remote collection of language documents.
///
/// A subscriber gets the current snapshot right away and a complete new one
/// after every change. Mutations require an administrator caller; on success
/// the store pushes a fresh snapshot to every subscriber.
#[async_trait::async_trait]
pub trait LanguageStore: Send + Sync {
    fn subscribe(&self, callback: SnapshotCallback) -> Subscription;

    /// Returns the id assigned to the new language
    async fn create(&self, caller: &Caller, draft: Language) -> Result<String, StoreError>;

    async fn update(&self, caller: &Caller, id: &str, language: Language) -> Result<(), StoreError>;

    async fn delete(&self, caller: &Caller, id: &str) -> Result<(), StoreError>;
}
