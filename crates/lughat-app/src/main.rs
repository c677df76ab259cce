use std::path::{Path, PathBuf};
use std::sync::Arc;

use anyhow::Context;
use clap::Parser;
use lughat_config::{Config, LogFormat};
use lughat_core::browse::{LanguageQuery, LanguageSortKey};
use lughat_core::pagination::PageSize;
use lughat_core::search::Selection;
use lughat_core::sort::SortKey;
use lughat_core::state::{FilterEdit, ViewMode};
use lughat_core::types::AppEvent;
use lughat_import::{DICTIONARY_TEMPLATE, TEMPLATE_FILE_NAME};
use lughat_types::Caller;
use tracing_subscriber::EnvFilter;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

pub mod controller;
pub mod events;
pub mod io;
pub mod memory_store;
pub mod seed;
pub mod state;
pub mod status;
pub mod ui;

#[cfg(test)]
mod tests;

use self::controller::{AppController, ChannelSet};
use self::memory_store::InMemoryStore;
use self::state::AppState;

#[derive(Parser, Debug)]
#[command(name = "lughat")]
#[command(about = "Browse and curate a catalog of languages and their dictionaries")]
struct Cli {
    /// JSON config file replacing the defaults
    #[arg(long)]
    config: Option<PathBuf>,

    /// JSON file with the language documents to start from
    #[arg(long)]
    seed: Option<PathBuf>,

    /// Free text matched against word, meaning, pronunciation, example and dialects
    #[arg(short, long)]
    query: Option<String>,

    /// Only words of this language ("all" for every language)
    #[arg(long)]
    language: Option<String>,

    /// Only words from this region ("all" for every region)
    #[arg(long)]
    region: Option<String>,

    /// word, language or region; for --languages: name, speakers, region, family or created
    #[arg(long)]
    sort: Option<String>,

    /// all, by-language or by-region
    #[arg(long)]
    view: Option<String>,

    #[arg(long, default_value_t = 1)]
    page: usize,

    #[arg(long)]
    per_page: Option<usize>,

    /// List languages instead of dictionary words
    #[arg(long)]
    languages: bool,

    /// Language family filter for --languages
    #[arg(long)]
    family: Option<String>,

    /// Status filter for --languages
    #[arg(long)]
    status: Option<String>,

    /// Admin search over name, ISO code and region for --languages
    #[arg(long)]
    admin_search: Option<String>,

    /// Print catalog statistics
    #[arg(long)]
    stats: bool,

    /// Write the CSV import template into this directory
    #[arg(long, value_name = "DIR", num_args = 0..=1, default_missing_value = ".")]
    template: Option<PathBuf>,

    /// CSV file with dictionary entries to import
    #[arg(long, requires = "into")]
    import: Option<PathBuf>,

    /// Id of the language receiving the import
    #[arg(long, requires = "import")]
    into: Option<String>,

    /// Id of a language to delete
    #[arg(long)]
    delete: Option<String>,

    /// Act as this administrator uid
    #[arg(long)]
    admin: Option<String>,
}

impl Cli {
    fn caller(&self) -> Caller {
        match &self.admin {
            Some(uid) => Caller::Admin {
                uid: uid.clone(),
                email: None,
            },
            None => Caller::Visitor,
        }
    }

    fn language_query(&self, config: &Config) -> anyhow::Result<LanguageQuery> {
        let size = self.per_page.unwrap_or(config.browse.language_page_size);
        let page_size = PageSize::language(size).with_context(|| format!("unsupported page size {size}"))?;

        let mut query = LanguageQuery::new(page_size);
        query.page = self.page;
        query.admin_query = self.admin_search.clone();
        query.filter.query = self.query.clone().unwrap_or_default();
        query.filter.region = Selection::from_input(self.region.as_deref().unwrap_or(""));
        query.filter.family = Selection::from_input(self.family.as_deref().unwrap_or(""));
        query.filter.status = Selection::from_input(self.status.as_deref().unwrap_or(""));
        if let Some(sort) = &self.sort {
            query.sort = LanguageSortKey::parse(sort).with_context(|| format!("unknown sort {sort}"))?;
        }
        Ok(query)
    }

    /// Filter edits in the order the dictionary page would apply them
    fn filter_edits(&self) -> anyhow::Result<Vec<FilterEdit>> {
        let mut edits = Vec::new();
        if let Some(size) = self.per_page {
            let size = PageSize::dictionary(size).with_context(|| format!("unsupported page size {size}"))?;
            edits.push(FilterEdit::PageSize(size));
        }
        if let Some(query) = &self.query {
            edits.push(FilterEdit::Query(query.clone()));
        }
        if let Some(language) = &self.language {
            edits.push(FilterEdit::Language(Selection::from_input(language)));
        }
        if let Some(region) = &self.region {
            edits.push(FilterEdit::Region(Selection::from_input(region)));
        }
        if let Some(sort) = &self.sort {
            let key = SortKey::parse(sort).with_context(|| format!("unknown sort {sort}"))?;
            edits.push(FilterEdit::Sort(key));
        }
        if let Some(view) = &self.view {
            let mode = ViewMode::parse(view).with_context(|| format!("unknown view {view}"))?;
            edits.push(FilterEdit::Mode(mode));
        }
        edits.push(FilterEdit::Page(self.page));
        Ok(edits)
    }
}

fn init_tracing(config: &Config) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&config.log.filter));
    let registry = tracing_subscriber::registry().with(filter);

    match config.log.format {
        LogFormat::Json => registry
            .with(tracing_subscriber::fmt::layer().json().with_writer(std::io::stderr))
            .init(),
        LogFormat::Pretty => registry
            .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
            .init(),
    }
}

fn load_config(path: Option<&Path>) -> anyhow::Result<Config> {
    match path {
        Some(path) => Ok(Config::load(path)?),
        None => Ok(Config::new()),
    }
}

async fn write_template(dir: &Path) -> anyhow::Result<()> {
    let path = dir.join(TEMPLATE_FILE_NAME);
    tokio::fs::write(&path, DICTIONARY_TEMPLATE)
        .await
        .with_context(|| format!("writing {}", path.display()))?;
    println!("Template written to {}", path.display());
    Ok(())
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    let cli = Cli::parse();

    let mut config = load_config(cli.config.as_deref())?;
    if let Some(seed) = &cli.seed {
        config.store.seed_path = Some(seed.display().to_string());
    }
    init_tracing(&config);

    if let Some(dir) = &cli.template {
        return write_template(dir).await;
    }

    let languages = match &config.store.seed_path {
        Some(path) => seed::load_seed(Path::new(path))?,
        None => Vec::new(),
    };
    let store = Arc::new(InMemoryStore::new(languages));

    let channels = ChannelSet::new(&config);
    let language_query = cli.languages.then(|| cli.language_query(&config)).transpose()?;
    let edits = if cli.languages { Vec::new() } else { cli.filter_edits()? };

    let state = Arc::new(AppState::new(config));
    let mut controller = AppController::new(state, store, channels);
    controller.attach_store();

    let show_view = !cli.languages && !cli.stats;
    let mut tasks = controller.spawn_tasks(show_view);
    let tx = controller.sender();
    let caller = cli.caller();

    if let (Some(path), Some(id)) = (&cli.import, &cli.into) {
        tx.send(AppEvent::ImportCsv {
            language_id: Some(id.clone()),
            path: path.clone(),
        })
        .await?;
        tx.send(AppEvent::SubmitEdit(caller.clone())).await?;
    }
    if let Some(id) = &cli.delete {
        tx.send(AppEvent::DeleteLanguage {
            caller: caller.clone(),
            id: id.clone(),
        })
        .await?;
    }
    for edit in edits {
        tx.send(AppEvent::Filter(edit)).await?;
    }
    if let Some(query) = language_query {
        tx.send(AppEvent::BrowseLanguages(query)).await?;
    }
    if cli.stats {
        tx.send(AppEvent::RequestStats).await?;
    }
    tx.send(AppEvent::Close).await?;

    while let Some(result) = tasks.join_next().await {
        match result {
            Ok(Ok(())) => {}
            Ok(Err(e)) => tracing::error!("Task exited with error: {e}"),
            Err(e) => tracing::error!("Task panicked: {e}"),
        }
    }
    controller.shutdown();
    Ok(())
}
