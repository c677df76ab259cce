use std::path::Path;
use std::sync::atomic::{AtomicU64, Ordering};

use lughat_config::import::ImportConfig;
use lughat_types::{DictionaryEntry, ImportStatus};
use tokio::sync::RwLock;

use crate::csv_import::{ImportOutcome, parse_dictionary_csv};
use crate::error::ImportError;

const PREVIEW_WORDS: usize = 3;

/// Stamp handed out for each import request, in request order
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct ImportTicket(u64);

#[derive(Debug, Default)]
struct Imported {
    status: ImportStatus,
    entries: Vec<DictionaryEntry>,
}

/// Import state of one language form.
///
/// Every request takes a ticket. A finished read is applied only while its
/// ticket is still the latest one issued, so a slow superseded import never
/// overwrites a newer result.
#[derive(Debug, Default)]
pub struct ImportSession {
    latest: AtomicU64,
    inner: RwLock<Imported>,
}

/// "a, b, c ... and N more"
pub fn preview(entries: &[DictionaryEntry]) -> String {
    let words: Vec<&str> = entries.iter().take(PREVIEW_WORDS).map(|e| e.word.as_str()).collect();
    let mut preview = words.join(", ");
    if entries.len() > PREVIEW_WORDS {
        preview.push_str(&format!(" ... and {} more", entries.len() - PREVIEW_WORDS));
    }
    preview
}

fn success_message(outcome: &ImportOutcome) -> String {
    format!(
        "Successfully imported {} words from CSV. Preview: {}",
        outcome.accepted(),
        preview(&outcome.entries)
    )
}

/// Refuse files by name and size before reading them
pub async fn check_file(path: &Path, config: &ImportConfig) -> Result<(), ImportError> {
    let is_csv = path
        .extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| ext.eq_ignore_ascii_case("csv"));
    if config.require_csv_extension && !is_csv {
        return Err(ImportError::NotCsv);
    }

    let size = tokio::fs::metadata(path)
        .await
        .map_err(|e| ImportError::Read(e.to_string()))?
        .len();
    if size > config.max_bytes {
        return Err(ImportError::TooLarge {
            size,
            limit: config.max_bytes,
        });
    }
    Ok(())
}

pub async fn read_dictionary_file(path: &Path, config: &ImportConfig) -> Result<ImportOutcome, ImportError> {
    check_file(path, config).await?;
    let content = tokio::fs::read_to_string(path)
        .await
        .map_err(|e| ImportError::Read(e.to_string()))?;
    parse_dictionary_csv(&content)
}

impl ImportSession {
    pub fn new() -> Self {
        Self::default()
    }

    /// Issue a ticket, superseding every earlier one
    pub fn begin(&self) -> ImportTicket {
        ImportTicket(self.latest.fetch_add(1, Ordering::SeqCst) + 1)
    }

    pub fn is_current(&self, ticket: ImportTicket) -> bool {
        self.latest.load(Ordering::SeqCst) == ticket.0
    }

    pub async fn status(&self) -> ImportStatus {
        self.inner.read().await.status.clone()
    }

    pub async fn entries(&self) -> Vec<DictionaryEntry> {
        self.inner.read().await.entries.clone()
    }

    pub async fn is_loading(&self) -> bool {
        self.inner.read().await.status.is_loading()
    }

    /// Mark `ticket` as in flight, unless it was already superseded
    pub async fn mark_loading(&self, ticket: ImportTicket) -> bool {
        let mut inner = self.inner.write().await;
        if !self.is_current(ticket) {
            return false;
        }
        inner.status = ImportStatus::Loading("Processing CSV file...".to_string());
        true
    }

    /// Apply a finished read. Returns the new status, or `None` when the
    /// ticket was superseded and the result discarded.
    ///
    /// A failure leaves previously imported entries in place.
    pub async fn complete(
        &self,
        ticket: ImportTicket,
        result: Result<ImportOutcome, ImportError>,
    ) -> Option<ImportStatus> {
        let mut inner = self.inner.write().await;
        if !self.is_current(ticket) {
            tracing::debug!("Discarding result of superseded import {:?}", ticket);
            return None;
        }

        inner.status = match result {
            Ok(outcome) => {
                let status = ImportStatus::Success(success_message(&outcome));
                tracing::info!("Imported {} words ({} rows dropped)", outcome.accepted(), outcome.dropped);
                inner.entries = outcome.entries;
                status
            }
            Err(e) => {
                tracing::warn!("CSV import failed: {}", e);
                ImportStatus::Error(e.to_string())
            }
        };
        Some(inner.status.clone())
    }

    /// Read and parse one file. Returns `None` if a newer request arrived
    /// while this one was reading.
    pub async fn import_file(&self, path: &Path, config: &ImportConfig) -> Option<ImportStatus> {
        let ticket = self.begin();
        self.mark_loading(ticket).await;
        tracing::info!("Importing dictionary from {}", path.display());

        let result = read_dictionary_file(path, config).await;
        self.complete(ticket, result).await
    }

    /// Seed the session from a language being edited. Any import still in
    /// flight is superseded.
    pub async fn preload(&self, existing: &[DictionaryEntry]) -> ImportStatus {
        self.begin();
        let mut inner = self.inner.write().await;
        if existing.is_empty() {
            *inner = Imported::default();
        } else {
            inner.entries = existing.to_vec();
            inner.status = ImportStatus::Success(format!("{} words loaded from existing data", existing.len()));
        }
        inner.status.clone()
    }

    /// Forget imported entries and any in-flight request
    pub async fn reset(&self) {
        self.begin();
        *self.inner.write().await = Imported::default();
    }
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use super::*;
    use crate::template::DICTIONARY_TEMPLATE;

    fn entry(word: &str) -> DictionaryEntry {
        DictionaryEntry {
            word: word.to_string(),
            meaning: "m".to_string(),
            ..DictionaryEntry::default()
        }
    }

    fn csv_file(content: &str, suffix: &str) -> tempfile::NamedTempFile {
        let mut file = tempfile::Builder::new().suffix(suffix).tempfile().unwrap();
        file.write_all(content.as_bytes()).unwrap();
        file
    }

    #[tokio::test]
    async fn test_import_template_file() {
        let file = csv_file(DICTIONARY_TEMPLATE, ".csv");
        let session = ImportSession::new();

        let status = session
            .import_file(file.path(), &ImportConfig::default())
            .await
            .unwrap();
        assert_eq!(
            status,
            ImportStatus::Success("Successfully imported 3 words from CSV. Preview: Salam, Mehrbani, Adab".to_string())
        );
        assert_eq!(session.entries().await.len(), 3);
        assert!(!session.is_loading().await);
    }

    #[tokio::test]
    async fn test_failure_keeps_previous_entries() {
        let session = ImportSession::new();
        session
            .import_file(csv_file(DICTIONARY_TEMPLATE, ".csv").path(), &ImportConfig::default())
            .await;

        let status = session
            .import_file(csv_file("name,def\na,b\n", ".csv").path(), &ImportConfig::default())
            .await
            .unwrap();
        assert_eq!(status, ImportStatus::Error("Missing required columns: word, meaning".to_string()));
        assert_eq!(session.entries().await.len(), 3);
    }

    #[tokio::test]
    async fn test_wrong_extension_rejected() {
        let file = csv_file(DICTIONARY_TEMPLATE, ".txt");
        let session = ImportSession::new();
        let status = session.import_file(file.path(), &ImportConfig::default()).await;
        assert_eq!(status, Some(ImportStatus::Error("Please upload a CSV file".to_string())));

        let relaxed = ImportConfig {
            require_csv_extension: false,
            ..ImportConfig::default()
        };
        let status = session.import_file(file.path(), &relaxed).await;
        assert!(matches!(status, Some(ImportStatus::Success(_))));
    }

    #[tokio::test]
    async fn test_oversize_rejected() {
        let file = csv_file(DICTIONARY_TEMPLATE, ".csv");
        let config = ImportConfig {
            max_bytes: 10,
            ..ImportConfig::default()
        };
        let err = read_dictionary_file(file.path(), &config).await.unwrap_err();
        assert!(matches!(err, ImportError::TooLarge { limit: 10, .. }));
    }

    #[tokio::test]
    async fn test_missing_file_is_read_error() {
        let dir = tempfile::tempdir().unwrap();
        let err = read_dictionary_file(&dir.path().join("gone.csv"), &ImportConfig::default())
            .await
            .unwrap_err();
        assert!(matches!(err, ImportError::Read(_)));
    }

    #[tokio::test]
    async fn test_superseded_result_discarded() {
        let session = ImportSession::new();
        let first = session.begin();
        let second = session.begin();
        assert!(!session.mark_loading(first).await);
        assert!(session.mark_loading(second).await);

        let newer = parse_dictionary_csv("word,meaning\nPani,Water\n");
        assert!(session.complete(second, newer).await.is_some());

        // the older request finishes last but loses
        let older = parse_dictionary_csv(DICTIONARY_TEMPLATE);
        assert_eq!(session.complete(first, older).await, None);

        let entries = session.entries().await;
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].word, "Pani");
    }

    #[tokio::test]
    async fn test_preload() {
        let session = ImportSession::new();
        let stale = session.begin();

        let status = session.preload(&[entry("a"), entry("b")]).await;
        assert_eq!(status, ImportStatus::Success("2 words loaded from existing data".to_string()));
        assert!(!session.is_current(stale));

        assert_eq!(session.preload(&[]).await, ImportStatus::Idle);
        assert!(session.entries().await.is_empty());
    }

    #[test]
    fn test_preview() {
        let words: Vec<DictionaryEntry> = ["a", "b", "c", "d", "e"].into_iter().map(entry).collect();
        assert_eq!(preview(&words), "a, b, c ... and 2 more");
        assert_eq!(preview(&words[..2]), "a, b");
    }
}
