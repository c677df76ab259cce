use std::collections::HashSet;

use chrono::{DateTime, Duration, Utc};
use lughat_types::Language;
use serde::Serialize;

/// Figures shown above the dictionary
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct DictionaryStats {
    pub total_words: usize,
    /// Languages with at least one word
    pub total_languages: usize,
    /// Distinct regions among those languages
    pub total_regions: usize,
    pub average_words_per_language: f64,
}

pub fn dictionary_stats(languages: &[Language]) -> DictionaryStats {
    let with_words: Vec<&Language> = languages.iter().filter(|l| !l.dictionary.is_empty()).collect();
    let total_words: usize = with_words.iter().map(|l| l.dictionary.len()).sum();
    let names: HashSet<&str> = with_words.iter().map(|l| l.name.as_str()).collect();
    let regions: HashSet<&str> = with_words
        .iter()
        .map(|l| l.region_name().unwrap_or(""))
        .collect();

    DictionaryStats {
        total_words,
        total_languages: names.len(),
        total_regions: regions.len(),
        average_words_per_language: total_words as f64 / names.len().max(1) as f64,
    }
}

/// How far back a language still counts as a recent addition
pub const RECENT_WINDOW_DAYS: i64 = 7;

/// Figures shown on the admin dashboard
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct CatalogStats {
    pub total_languages: usize,
    pub total_words: usize,
    pub endangered_count: usize,
    pub recent_additions: usize,
}

pub fn catalog_stats(languages: &[Language], now: DateTime<Utc>) -> CatalogStats {
    let cutoff = now - Duration::days(RECENT_WINDOW_DAYS);

    languages
        .iter()
        .fold(CatalogStats::default(), |mut stats, lang| {
            stats.total_languages += 1;
            stats.total_words += lang.dictionary.len();
            if lang.status().is_some_and(|s| s.is_endangered()) {
                stats.endangered_count += 1;
            }
            if lang.created_at.is_some_and(|at| at > cutoff) {
                stats.recent_additions += 1;
            }
            stats
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::aggregate::fixtures::{catalog, language};

    #[test]
    fn test_dictionary_stats_skip_empty_languages() {
        let stats = dictionary_stats(&catalog());
        assert_eq!(stats.total_words, 5);
        assert_eq!(stats.total_languages, 2);
        assert_eq!(stats.total_regions, 2);
        assert!((stats.average_words_per_language - 2.5).abs() < f64::EPSILON);
    }

    #[test]
    fn test_dictionary_stats_empty() {
        let stats = dictionary_stats(&[]);
        assert_eq!(stats.total_words, 0);
        assert_eq!(stats.average_words_per_language, 0.0);
    }

    #[test]
    fn test_catalog_stats() {
        let now = Utc::now();
        let mut langs = catalog();
        langs[0].status = Some("Critically Endangered".to_string());
        langs[1].status = Some("Endangered".to_string());
        langs[2].status = Some("Stable".to_string());
        langs[0].created_at = Some(now - Duration::days(2));
        langs[1].created_at = Some(now - Duration::days(30));

        let mut extra = language("y", "Y", "Federal", &[]);
        extra.status = Some("endangered?".to_string());
        langs.push(extra);

        let stats = catalog_stats(&langs, now);
        assert_eq!(
            stats,
            CatalogStats {
                total_languages: 4,
                total_words: 5,
                endangered_count: 2,
                recent_additions: 1,
            }
        );
    }
}
