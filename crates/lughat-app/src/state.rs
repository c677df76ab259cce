use std::sync::Arc;

use lughat_config::Config;
use lughat_core::catalog::Catalog;
use lughat_core::pagination::PageSize;
use lughat_core::state::FilterState;
use lughat_import::ImportSession;
use tokio::sync::RwLock;

use crate::status::AppStatus;

pub struct AppState {
    pub config: Arc<RwLock<Config>>,
    pub catalog: RwLock<Catalog>,
    pub filter: RwLock<FilterState>,
    pub import: Arc<ImportSession>,
    /// Id of the language whose form is open
    pub editing: RwLock<Option<String>>,
    pub status: AppStatus,
}

impl AppState {
    pub fn new(config: Config) -> Self {
        let page_size = PageSize::dictionary(config.browse.dictionary_page_size).unwrap_or_else(|| {
            tracing::warn!(
                "Unsupported dictionary page size {}, using {}",
                config.browse.dictionary_page_size,
                PageSize::default().get()
            );
            PageSize::default()
        });

        Self {
            config: Arc::new(RwLock::new(config)),
            catalog: RwLock::new(Catalog::default()),
            filter: RwLock::new(FilterState::new(page_size)),
            import: Arc::new(ImportSession::new()),
            editing: RwLock::new(None),
            status: AppStatus::new(),
        }
    }
}
