use std::sync::Arc;
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};

use lughat_types::Notice;
use tokio::sync::RwLock;

/// Application status
pub struct AppStatus {
    loading: Arc<AtomicBool>,
    pub last_notice: RwLock<Option<Notice>>,
    pub error_count: AtomicU64,
}

/// Holds the loading flag up while a store call runs; dropping it clears
/// the flag whichever way the call ended
pub struct LoadingGuard {
    flag: Arc<AtomicBool>,
}

impl Drop for LoadingGuard {
    fn drop(&mut self) {
        self.flag.store(false, Ordering::SeqCst);
    }
}

impl AppStatus {
    pub fn new() -> Self {
        Self {
            loading: Arc::new(AtomicBool::new(false)),
            last_notice: RwLock::new(None),
            error_count: AtomicU64::new(0),
        }
    }

    pub fn is_loading(&self) -> bool {
        self.loading.load(Ordering::SeqCst)
    }

    pub fn start_loading(&self) -> LoadingGuard {
        self.loading.store(true, Ordering::SeqCst);
        LoadingGuard {
            flag: Arc::clone(&self.loading),
        }
    }

    pub async fn record(&self, notice: &Notice) {
        if matches!(notice, Notice::Error(_)) {
            self.error_count.fetch_add(1, Ordering::SeqCst);
        }
        *self.last_notice.write().await = Some(notice.clone());
    }
}

impl Default for AppStatus {
    fn default() -> Self {
        Self::new()
    }
}
