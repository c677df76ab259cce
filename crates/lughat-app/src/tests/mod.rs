mod import_flow_tests;
mod store_tests;

use lughat_types::{DictionaryEntry, Language};

pub fn language(id: &str, name: &str, region: &str, words: &[(&str, &str)]) -> Language {
    Language {
        id: id.to_string(),
        name: name.to_string(),
        region: Some(region.to_string()),
        family: Some("Indo-Aryan".to_string()),
        dictionary: words
            .iter()
            .map(|(w, m)| DictionaryEntry {
                word: w.to_string(),
                meaning: m.to_string(),
                dialects: vec![String::new()],
                ..DictionaryEntry::default()
            })
            .collect(),
        ..Language::default()
    }
}

pub fn seed() -> Vec<Language> {
    vec![
        language("sd", "Sindhi", "Sindh", &[("Mehrbani", "Kindness"), ("Adab", "Respect")]),
        language("pa", "Punjabi", "Punjab", &[("Salam", "Hello/Peace"), ("Pani", "Water")]),
        language("bal", "Balochi", "Balochistan", &[]),
    ]
}

pub fn admin() -> lughat_types::Caller {
    lughat_types::Caller::Admin {
        uid: "admin-1".to_string(),
        email: Some("admin@example.org".to_string()),
    }
}
