use std::path::PathBuf;
use std::sync::Arc;

use kanal::AsyncSender;
use lughat_core::types::AppEvent;
use lughat_import::session::read_dictionary_file;
use lughat_types::{Caller, ImportStatus, Notice};
use tokio::task::JoinSet;

use super::EventContext;
use super::mutate::handle_update;

/// Open a language for editing and seed the import state from it
pub async fn handle_edit_language(ctx: &EventContext, id: &str) -> anyhow::Result<()> {
    let dictionary = {
        let catalog = ctx.state.catalog.read().await;
        catalog.find(id).map(|l| l.dictionary.clone())
    };
    let Some(dictionary) = dictionary else {
        return ctx.notify(Notice::Error(format!("Language not found: {id}"))).await;
    };

    *ctx.state.editing.write().await = Some(id.to_string());
    let valid: Vec<_> = dictionary.into_iter().filter(|e| e.is_valid()).collect();
    let status = ctx.state.import.preload(&valid).await;
    ctx.app_to_ui_tx.send(AppEvent::ImportStatusChanged(status)).await?;
    Ok(())
}

/// Forward an import status to the presenter. Returns false when it is gone.
pub(crate) async fn deliver_status(tx: &AsyncSender<AppEvent>, status: ImportStatus) -> bool {
    match tx.send(AppEvent::ImportStatusChanged(status)).await {
        Ok(()) => true,
        Err(e) => {
            tracing::warn!("Import status not delivered: {e}");
            false
        }
    }
}

/// Start reading a CSV file in the background.
///
/// A newer import supersedes this one; its result is then dropped without
/// touching the import state.
pub async fn handle_csv_import(ctx: &EventContext, imports: &mut JoinSet<()>, path: PathBuf) {
    let session = Arc::clone(&ctx.state.import);
    let config = ctx.state.config.read().await.import.clone();
    let tx = ctx.app_to_ui_tx.clone();

    let ticket = session.begin();
    imports.spawn(async move {
        if session.mark_loading(ticket).await {
            deliver_status(&tx, session.status().await).await;
        }

        let result = read_dictionary_file(&path, &config).await;
        match session.complete(ticket, result).await {
            Some(status) => {
                deliver_status(&tx, status).await;
            }
            None => tracing::debug!("Import of {} superseded", path.display()),
        }
    });
}

/// Save imported entries into the language being edited
pub async fn handle_submit_edit(ctx: &EventContext, caller: Caller) -> anyhow::Result<()> {
    let Some(id) = ctx.state.editing.read().await.clone() else {
        return ctx.notify(Notice::Error("No language is being edited".to_string())).await;
    };
    if let ImportStatus::Error(message) = ctx.state.import.status().await {
        tracing::warn!("Submitting {} despite failed import: {}", id, message);
    }

    let language = {
        let catalog = ctx.state.catalog.read().await;
        catalog.find(&id).cloned()
    };
    let Some(mut language) = language else {
        return ctx.notify(Notice::Error(format!("Language not found: {id}"))).await;
    };
    language.dictionary = ctx.state.import.entries().await;

    if handle_update(ctx, caller, &id, language).await? {
        *ctx.state.editing.write().await = None;
        ctx.state.import.reset().await;
    }
    Ok(())
}
