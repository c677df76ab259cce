use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::aggregate::AggregatedEntry;
use crate::preprocess::fold;

/// Label used for entries whose region is unknown
pub const UNSPECIFIED_REGION: &str = "Unspecified";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GroupBy {
    Language,
    Region,
}

/// A section of a grouped view
#[derive(Debug, Clone, PartialEq)]
pub struct EntryGroup<'a> {
    pub by: GroupBy,
    pub key: String,
    pub count: usize,
    pub entries: Vec<&'a AggregatedEntry>,
}

impl EntryGroup<'_> {
    /// Heading text; only region groups substitute a label for a blank key
    pub fn label(&self) -> &str {
        match self.by {
            GroupBy::Region if self.key.is_empty() => UNSPECIFIED_REGION,
            _ => &self.key,
        }
    }
}

fn group_key(item: &AggregatedEntry, by: GroupBy) -> &str {
    match by {
        GroupBy::Language => &item.language_name,
        GroupBy::Region => item.effective_region().unwrap_or(""),
    }
}

/// Group already filtered entries.
///
/// Groups come out in ascending folded-key order; inside a group entries keep
/// the order of `entries`. A group is only ever created for an entry, so no
/// empty group can appear in the output.
pub fn group_entries<'a>(entries: &[&'a AggregatedEntry], by: GroupBy) -> Vec<EntryGroup<'a>> {
    let mut map: BTreeMap<&str, Vec<&'a AggregatedEntry>> = BTreeMap::new();

    for &item in entries {
        map.entry(group_key(item, by)).or_default().push(item);
    }

    let mut groups: Vec<EntryGroup<'a>> = map
        .into_iter()
        .filter(|(_, members)| !members.is_empty())
        .map(|(key, members)| EntryGroup {
            by,
            key: key.to_string(),
            count: members.len(),
            entries: members,
        })
        .collect();
    groups.sort_by_cached_key(|g| fold(&g.key));

    tracing::debug!("Grouped {} entries into {} groups", entries.len(), groups.len());
    groups
}

pub fn group_by_language<'a>(entries: &[&'a AggregatedEntry]) -> Vec<EntryGroup<'a>> {
    group_entries(entries, GroupBy::Language)
}

pub fn group_by_region<'a>(entries: &[&'a AggregatedEntry]) -> Vec<EntryGroup<'a>> {
    group_entries(entries, GroupBy::Region)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::aggregate::aggregate;
    use crate::aggregate::fixtures::{catalog, language};
    use crate::search::{EntryFilter, filter_entries};

    fn keys(groups: &[EntryGroup<'_>]) -> Vec<String> {
        groups.iter().map(|g| g.key.clone()).collect()
    }

    #[test]
    fn test_group_by_language_sorted_with_counts() {
        let entries = aggregate(&catalog());
        let refs: Vec<_> = entries.iter().collect();
        let groups = group_by_language(&refs);

        // Balochi has no words and must not show up
        assert_eq!(keys(&groups), vec!["Punjabi", "Sindhi"]);
        assert_eq!(groups[0].count, 3);
        assert_eq!(groups[1].count, 2);
        let words: Vec<_> = groups[0].entries.iter().map(|e| e.entry.word.as_str()).collect();
        assert_eq!(words, vec!["Salam", "Pani", "roti"]);
    }

    #[test]
    fn test_group_by_region_uses_override() {
        let entries = aggregate(&catalog());
        let refs: Vec<_> = entries.iter().collect();
        let groups = group_by_region(&refs);
        assert_eq!(keys(&groups), vec!["Federal", "Punjab", "Sindh"]);
        assert_eq!(groups[0].entries[0].entry.word, "Pani");
    }

    #[test]
    fn test_groups_from_filtered_input_are_never_empty() {
        let entries = aggregate(&catalog());
        let filter = EntryFilter {
            query: "kind".to_string(),
            ..EntryFilter::default()
        };
        let found = filter_entries(&entries, &filter);
        let groups = group_by_language(&found);
        assert_eq!(keys(&groups), vec!["Sindhi"]);
        assert!(groups.iter().all(|g| g.count > 0 && g.count == g.entries.len()));

        let none = filter_entries(
            &entries,
            &EntryFilter {
                query: "nothing matches".to_string(),
                ..EntryFilter::default()
            },
        );
        assert!(group_by_region(&none).is_empty());
    }

    #[test]
    fn test_group_order_ignores_case() {
        let langs = vec![
            language("1", "urdu", "Federal", &[("a", "a")]),
            language("2", "Balti", "Gilgit-Baltistan", &[("b", "b")]),
        ];
        let entries = aggregate(&langs);
        let refs: Vec<_> = entries.iter().collect();
        assert_eq!(keys(&group_by_language(&refs)), vec!["Balti", "urdu"]);
    }

    #[test]
    fn test_missing_region_label() {
        let mut langs = catalog();
        langs[2].region = None;
        let entries = aggregate(&langs);
        let refs: Vec<_> = entries.iter().collect();
        let groups = group_by_region(&refs);
        assert_eq!(groups[0].key, "");
        assert_eq!(groups[0].label(), UNSPECIFIED_REGION);
    }

    #[test]
    fn test_blank_language_name_keeps_its_own_label() {
        let mut langs = catalog();
        langs[0].name = String::new();
        let entries = aggregate(&langs);
        let refs: Vec<_> = entries.iter().collect();
        let groups = group_by_language(&refs);
        assert_eq!(groups[0].by, GroupBy::Language);
        assert_eq!(groups[0].key, "");
        assert_eq!(groups[0].label(), "");
    }
}
