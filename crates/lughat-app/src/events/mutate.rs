use lughat_types::{Caller, Language, Notice};

use super::EventContext;

pub async fn handle_create(ctx: &EventContext, caller: Caller, draft: Language) -> anyhow::Result<()> {
    let _loading = ctx.state.status.start_loading();

    match ctx.store.create(&caller, draft).await {
        Ok(id) => {
            tracing::info!("Language added: {}", id);
            ctx.notify(Notice::Info(format!("Language added ({id})"))).await?;
        }
        Err(e) => {
            tracing::error!("Error adding language: {}", e);
            ctx.notify(Notice::Error(format!("Error adding language: {e}"))).await?;
        }
    }
    Ok(())
}

/// Returns whether the store accepted the update
pub async fn handle_update(ctx: &EventContext, caller: Caller, id: &str, language: Language) -> anyhow::Result<bool> {
    let _loading = ctx.state.status.start_loading();

    match ctx.store.update(&caller, id, language).await {
        Ok(()) => {
            ctx.notify(Notice::Info(format!("Language updated ({id})"))).await?;
            Ok(true)
        }
        Err(e) => {
            tracing::error!("Error updating language {}: {}", id, e);
            ctx.notify(Notice::Error(format!("Error updating language: {e}"))).await?;
            Ok(false)
        }
    }
}

pub async fn handle_delete(ctx: &EventContext, caller: Caller, id: &str) -> anyhow::Result<()> {
    let _loading = ctx.state.status.start_loading();

    match ctx.store.delete(&caller, id).await {
        Ok(()) => {
            if ctx.state.editing.read().await.as_deref() == Some(id) {
                *ctx.state.editing.write().await = None;
            }
            ctx.notify(Notice::Info(format!("Language deleted ({id})"))).await?;
        }
        Err(e) => {
            tracing::error!("Error deleting language {}: {}", id, e);
            ctx.notify(Notice::Error(format!("Error deleting language: {e}"))).await?;
        }
    }
    Ok(())
}
