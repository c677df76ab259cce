use std::sync::Arc;

use kanal::{AsyncReceiver, AsyncSender};
use lughat_core::store::LanguageStore;
use lughat_core::types::AppEvent;
use lughat_types::Notice;
use tokio::task::JoinSet;
use tokio_util::sync::CancellationToken;

use crate::state::AppState;

pub mod browse;
pub mod filter;
pub mod import;
pub mod mutate;

use browse::{handle_browse_languages, handle_stats_request};
use filter::{handle_filter_edit, handle_snapshot, handle_store_failure};
use import::{handle_csv_import, handle_edit_language, handle_submit_edit};
use mutate::{handle_create, handle_delete, handle_update};

/// What every handler needs
#[derive(Clone)]
pub struct EventContext {
    pub state: Arc<AppState>,
    pub store: Arc<dyn LanguageStore>,
    pub app_to_ui_tx: AsyncSender<AppEvent>,
}

impl EventContext {
    pub async fn notify(&self, notice: Notice) -> anyhow::Result<()> {
        self.state.status.record(&notice).await;
        self.app_to_ui_tx.send(AppEvent::Notify(notice)).await?;
        Ok(())
    }
}

/// App's main loop.
///
/// Store pushes are drained before presentation requests so a request
/// always sees the newest snapshot already received.
pub async fn event_loop(
    ctx: EventContext,
    ui_to_app_rx: AsyncReceiver<AppEvent>,
    store_rx: AsyncReceiver<AppEvent>,
    cancel: CancellationToken,
) -> anyhow::Result<()> {
    let mut imports: JoinSet<()> = JoinSet::new();

    tracing::info!("Event loop started");
    loop {
        let event = tokio::select! {
            biased;
            _ = cancel.cancelled() => {
                tracing::info!("Event loop cancelled");
                break;
            }
            event = store_rx.recv() => event?,
            event = ui_to_app_rx.recv() => event?,
        };

        tracing::debug!("Event received: {:?}", std::mem::discriminant(&event));
        if matches!(event, AppEvent::Close) {
            drain_imports(&mut imports).await;
            ctx.app_to_ui_tx.send(AppEvent::Close).await?;
            break;
        }
        handle_events(&ctx, &mut imports, event).await?;
    }

    imports.abort_all();
    Ok(())
}

/// Wait for every import still reading
pub async fn drain_imports(imports: &mut JoinSet<()>) {
    while let Some(result) = imports.join_next().await {
        if let Err(e) = result {
            tracing::error!("Import task failed: {e}");
        }
    }
}

async fn handle_events(ctx: &EventContext, imports: &mut JoinSet<()>, event: AppEvent) -> anyhow::Result<()> {
    match event {
        AppEvent::SnapshotReceived(snapshot) => handle_snapshot(ctx, snapshot).await?,
        AppEvent::StoreFailed(message) => handle_store_failure(ctx, message).await?,
        AppEvent::Filter(edit) => handle_filter_edit(ctx, edit).await?,
        AppEvent::EditLanguage(id) => handle_edit_language(ctx, &id).await?,
        AppEvent::ImportCsv { language_id, path } => {
            if let Some(id) = language_id {
                handle_edit_language(ctx, &id).await?;
            }
            handle_csv_import(ctx, imports, path).await;
        }
        AppEvent::SubmitEdit(caller) => {
            drain_imports(imports).await;
            handle_submit_edit(ctx, caller).await?;
        }
        AppEvent::CreateLanguage { caller, draft } => handle_create(ctx, caller, *draft).await?,
        AppEvent::UpdateLanguage { caller, id, language } => {
            handle_update(ctx, caller, &id, *language).await?;
        }
        AppEvent::DeleteLanguage { caller, id } => handle_delete(ctx, caller, &id).await?,
        AppEvent::BrowseLanguages(query) => handle_browse_languages(ctx, query).await?,
        AppEvent::RequestStats => handle_stats_request(ctx).await?,
        AppEvent::ShowView(_)
        | AppEvent::ShowLanguages(_)
        | AppEvent::ShowStats { .. }
        | AppEvent::ImportStatusChanged(_)
        | AppEvent::Notify(_) => {
            // Presentation-only events, nothing to do in the backend
        }
        AppEvent::Close => {}
    }

    Ok(())
}
