use chrono::Utc;
use lughat_core::browse::LanguageQuery;
use lughat_core::stats::catalog_stats;
use lughat_core::types::{AppEvent, LanguageListModel};

use super::EventContext;

pub async fn handle_browse_languages(ctx: &EventContext, query: LanguageQuery) -> anyhow::Result<()> {
    let radius = ctx.state.config.read().await.browse.page_radius;

    let model = {
        let catalog = ctx.state.catalog.read().await;
        LanguageListModel::from(&query.run(catalog.languages(), radius))
    };

    tracing::debug!("Language listing: {} matches", model.filtered_count);
    ctx.app_to_ui_tx.send(AppEvent::ShowLanguages(model)).await?;
    Ok(())
}

pub async fn handle_stats_request(ctx: &EventContext) -> anyhow::Result<()> {
    let (dictionary, catalog) = {
        let catalog = ctx.state.catalog.read().await;
        (catalog.stats(), catalog_stats(catalog.languages(), Utc::now()))
    };

    ctx.app_to_ui_tx
        .send(AppEvent::ShowStats { dictionary, catalog })
        .await?;
    Ok(())
}
