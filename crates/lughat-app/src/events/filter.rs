use lughat_core::catalog::Snapshot;
use lughat_core::state::FilterEdit;
use lughat_core::types::{AppEvent, ViewModel};
use lughat_types::Notice;

use super::EventContext;

/// Run the pipeline for the current filter and push the result
pub async fn render_view(ctx: &EventContext) -> anyhow::Result<()> {
    let radius = ctx.state.config.read().await.browse.page_radius;

    let model = {
        let catalog = ctx.state.catalog.read().await;
        let mut filter = ctx.state.filter.write().await;
        let output = catalog.view(&filter, radius);
        *filter = output.state.clone();
        ViewModel::new(catalog.revision(), catalog.stats(), &output)
    };

    tracing::debug!(
        "Showing {} of {} matching entries",
        model.entries().len(),
        model.filtered_count
    );
    ctx.app_to_ui_tx.send(AppEvent::ShowView(model)).await?;
    Ok(())
}

pub async fn handle_snapshot(ctx: &EventContext, snapshot: Snapshot) -> anyhow::Result<()> {
    ctx.state.catalog.write().await.replace(snapshot);
    render_view(ctx).await
}

/// The last good snapshot stays in place
pub async fn handle_store_failure(ctx: &EventContext, message: String) -> anyhow::Result<()> {
    tracing::error!("Store subscription failed: {}", message);
    ctx.notify(Notice::Error(message)).await
}

pub async fn handle_filter_edit(ctx: &EventContext, edit: FilterEdit) -> anyhow::Result<()> {
    {
        let mut filter = ctx.state.filter.write().await;
        *filter = filter.apply(edit);
    }
    render_view(ctx).await
}
