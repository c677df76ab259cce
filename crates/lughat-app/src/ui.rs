use std::fmt::Write;

use kanal::AsyncReceiver;
use lughat_core::pagination::PageMarker;
use lughat_core::stats::{CatalogStats, DictionaryStats};
use lughat_core::types::{AppEvent, DisplayEntry, DisplayView, LanguageListModel, ViewModel};
use lughat_types::{ImportStatus, Notice};

fn markers_line(markers: &[PageMarker]) -> String {
    markers.iter().map(ToString::to_string).collect::<Vec<_>>().join(" ")
}

fn entry_line(out: &mut String, entry: &DisplayEntry) {
    let _ = write!(out, "  {} - {}", entry.word, entry.meaning);
    if let Some(pronunciation) = &entry.pronunciation {
        let _ = write!(out, " [{pronunciation}]");
    }
    let _ = write!(
        out,
        " ({}, {})",
        entry.language_name,
        entry.region.as_deref().unwrap_or("-")
    );
    if !entry.dialects.is_empty() {
        let _ = write!(out, " dialects: {}", entry.dialects.join("; "));
    }
    out.push('\n');
}

pub fn render_view(model: &ViewModel) -> String {
    let mut out = String::new();
    let stats = &model.stats;
    let _ = writeln!(
        out,
        "{} words across {} languages in {} regions ({:.1} per language)",
        stats.total_words, stats.total_languages, stats.total_regions, stats.average_words_per_language
    );

    match &model.view {
        DisplayView::List {
            entries,
            page,
            total_pages,
            showing,
            markers,
        } => {
            match showing {
                Some((from, to)) => {
                    let _ = writeln!(out, "Showing {from}-{to} of {} words", model.filtered_count);
                }
                None => {
                    let _ = writeln!(out, "No words found");
                }
            }
            for entry in entries {
                entry_line(&mut out, entry);
            }
            if *total_pages > 1 {
                let _ = writeln!(out, "Page {page} of {total_pages}: {}", markers_line(markers));
            }
        }
        DisplayView::Grouped { groups, .. } => {
            if groups.is_empty() {
                let _ = writeln!(out, "No words found");
            }
            for group in groups {
                let _ = writeln!(out, "{} ({})", group.label, group.count);
                for entry in &group.entries {
                    entry_line(&mut out, entry);
                }
            }
        }
    }
    out
}

pub fn render_languages(model: &LanguageListModel) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "{} languages", model.filtered_count);
    for lang in &model.languages {
        let _ = writeln!(
            out,
            "  {} [{}] {} / {} / {} - {} speakers, {} words",
            lang.name,
            lang.iso_code.as_deref().unwrap_or("-"),
            lang.region.as_deref().unwrap_or("-"),
            lang.family.as_deref().unwrap_or("-"),
            lang.status.as_deref().unwrap_or("-"),
            lang.speakers.map_or_else(|| "unknown".to_string(), |s| s.to_string()),
            lang.words
        );
    }
    if model.total_pages > 1 {
        let _ = writeln!(
            out,
            "Page {} of {}: {}",
            model.page,
            model.total_pages,
            markers_line(&model.markers)
        );
    }
    out
}

pub fn render_stats(dictionary: &DictionaryStats, catalog: &CatalogStats) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "Languages: {}", catalog.total_languages);
    let _ = writeln!(out, "Words: {}", catalog.total_words);
    let _ = writeln!(out, "Endangered: {}", catalog.endangered_count);
    let _ = writeln!(out, "Added this week: {}", catalog.recent_additions);
    let _ = writeln!(out, "Languages with words: {}", dictionary.total_languages);
    let _ = writeln!(out, "Regions with words: {}", dictionary.total_regions);
    let _ = writeln!(out, "Average words per language: {:.1}", dictionary.average_words_per_language);
    out
}

/// Terminal presenter.
///
/// Views are re-rendered on every change, so only the last one is printed
/// when the loop closes. Everything else is printed as it arrives.
pub async fn ui_loop(app_to_ui_rx: AsyncReceiver<AppEvent>, show_view: bool) -> anyhow::Result<()> {
    let mut last_view: Option<ViewModel> = None;

    while let Ok(event) = app_to_ui_rx.recv().await {
        match event {
            AppEvent::ShowView(model) => last_view = Some(model),
            AppEvent::ShowLanguages(model) => print!("{}", render_languages(&model)),
            AppEvent::ShowStats { dictionary, catalog } => print!("{}", render_stats(&dictionary, &catalog)),
            AppEvent::ImportStatusChanged(status) => match status {
                ImportStatus::Idle | ImportStatus::Loading(_) => tracing::info!("{}", status.message()),
                ImportStatus::Success(message) => println!("{message}"),
                ImportStatus::Error(message) => eprintln!("{message}"),
            },
            AppEvent::Notify(Notice::Info(message)) => println!("{message}"),
            AppEvent::Notify(Notice::Error(message)) => eprintln!("{message}"),
            AppEvent::Close => break,
            _ => {}
        }
    }

    if show_view && let Some(model) = last_view {
        print!("{}", render_view(&model));
    }
    Ok(())
}
