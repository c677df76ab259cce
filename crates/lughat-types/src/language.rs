use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::lenient;

/// Administrative region a language (or a single word) belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Region {
    Punjab,
    Sindh,
    KhyberPakhtunkhwa,
    Balochistan,
    GilgitBaltistan,
    AzadKashmir,
    Federal,
}

impl Region {
    pub const ALL: [Region; 7] = [
        Region::Punjab,
        Region::Sindh,
        Region::KhyberPakhtunkhwa,
        Region::Balochistan,
        Region::GilgitBaltistan,
        Region::AzadKashmir,
        Region::Federal,
    ];

    pub fn parse(s: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|r| r.as_str() == s.trim())
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Region::Punjab => "Punjab",
            Region::Sindh => "Sindh",
            Region::KhyberPakhtunkhwa => "Khyber Pakhtunkhwa",
            Region::Balochistan => "Balochistan",
            Region::GilgitBaltistan => "Gilgit-Baltistan",
            Region::AzadKashmir => "Azad Kashmir",
            Region::Federal => "Federal",
        }
    }
}

/// Language family
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Family {
    IndoAryan,
    Iranian,
    Dardic,
    Turkic,
    Dravidian,
    Isolate,
    Other,
}

impl Family {
    pub const ALL: [Family; 7] = [
        Family::IndoAryan,
        Family::Iranian,
        Family::Dardic,
        Family::Turkic,
        Family::Dravidian,
        Family::Isolate,
        Family::Other,
    ];

    pub fn parse(s: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|f| f.as_str() == s.trim())
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Family::IndoAryan => "Indo-Aryan",
            Family::Iranian => "Iranian",
            Family::Dardic => "Dardic",
            Family::Turkic => "Turkic",
            Family::Dravidian => "Dravidian",
            Family::Isolate => "Isolate",
            Family::Other => "Other",
        }
    }
}

/// Vitality status
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Status {
    Endangered,
    Vulnerable,
    Stable,
    Thriving,
    CriticallyEndangered,
}

impl Status {
    pub const ALL: [Status; 5] = [
        Status::Endangered,
        Status::Vulnerable,
        Status::Stable,
        Status::Thriving,
        Status::CriticallyEndangered,
    ];

    pub fn parse(s: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|st| st.as_str() == s.trim())
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Status::Endangered => "Endangered",
            Status::Vulnerable => "Vulnerable",
            Status::Stable => "Stable",
            Status::Thriving => "Thriving",
            Status::CriticallyEndangered => "Critically Endangered",
        }
    }

    /// Counted towards the "endangered" figure on the admin dashboard
    pub fn is_endangered(&self) -> bool {
        matches!(self, Status::Endangered | Status::CriticallyEndangered)
    }
}

macro_rules! display_as_str {
    ($($ty:ty),*) => {
        $(impl fmt::Display for $ty {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.as_str())
            }
        })*
    };
}

display_as_str!(Region, Family, Status);

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Geography {
    #[serde(deserialize_with = "lenient::float")]
    pub latitude: Option<f64>,
    #[serde(deserialize_with = "lenient::float")]
    pub longitude: Option<f64>,
}

impl Geography {
    /// `(latitude, longitude)` when both are present and finite
    pub fn coordinates(&self) -> Option<(f64, f64)> {
        match (self.latitude, self.longitude) {
            (Some(lat), Some(lng)) if lat.is_finite() && lng.is_finite() => Some((lat, lng)),
            _ => None,
        }
    }
}

/// One word record, always embedded in a [`Language`]
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DictionaryEntry {
    #[serde(deserialize_with = "lenient::string")]
    pub word: String,
    #[serde(deserialize_with = "lenient::string")]
    pub meaning: String,
    #[serde(deserialize_with = "lenient::optional_string")]
    pub pronunciation: Option<String>,
    /// Overrides the parent language region when present
    #[serde(deserialize_with = "lenient::optional_string")]
    pub region: Option<String>,
    #[serde(deserialize_with = "lenient::optional_string")]
    pub example: Option<String>,
    /// May contain empty placeholders left by the editing form
    #[serde(deserialize_with = "lenient::strings")]
    pub dialects: Vec<String>,
}

impl DictionaryEntry {
    /// Entry produced for a language submitted without any words
    pub fn placeholder() -> Self {
        Self {
            dialects: vec![String::new()],
            ..Self::default()
        }
    }

    /// Dialect variants with placeholders removed
    pub fn dialects(&self) -> impl Iterator<Item = &str> {
        self.dialects
            .iter()
            .map(String::as_str)
            .filter(|d| !d.trim().is_empty())
    }

    pub fn region(&self) -> Option<&str> {
        non_empty(&self.region)
    }

    pub fn is_valid(&self) -> bool {
        !self.word.trim().is_empty() && !self.meaning.trim().is_empty()
    }
}

/// A documented language and its embedded dictionary
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Language {
    #[serde(deserialize_with = "lenient::string")]
    pub id: String,
    #[serde(deserialize_with = "lenient::string")]
    pub name: String,
    #[serde(deserialize_with = "lenient::optional_string")]
    pub iso_code: Option<String>,
    #[serde(deserialize_with = "lenient::optional_string")]
    pub region: Option<String>,
    #[serde(deserialize_with = "lenient::optional_string")]
    pub family: Option<String>,
    #[serde(deserialize_with = "lenient::optional_string")]
    pub status: Option<String>,
    #[serde(deserialize_with = "lenient::count")]
    pub speakers: Option<u64>,
    #[serde(deserialize_with = "lenient::object")]
    pub geography: Option<Geography>,

    #[serde(deserialize_with = "lenient::optional_string")]
    pub introduction: Option<String>,
    #[serde(deserialize_with = "lenient::optional_string")]
    pub history: Option<String>,
    #[serde(deserialize_with = "lenient::optional_string")]
    pub literature: Option<String>,
    #[serde(deserialize_with = "lenient::optional_string")]
    pub linguistics: Option<String>,
    #[serde(deserialize_with = "lenient::optional_string")]
    pub internationality: Option<String>,
    #[serde(deserialize_with = "lenient::optional_string")]
    pub education: Option<String>,
    #[serde(deserialize_with = "lenient::optional_string")]
    pub media: Option<String>,
    #[serde(deserialize_with = "lenient::optional_string")]
    pub language_activism: Option<String>,
    #[serde(deserialize_with = "lenient::optional_string")]
    pub future: Option<String>,
    #[serde(deserialize_with = "lenient::optional_string")]
    pub location: Option<String>,
    #[serde(deserialize_with = "lenient::optional_string")]
    pub description: Option<String>,

    #[serde(deserialize_with = "lenient::items")]
    pub dictionary: Vec<DictionaryEntry>,

    #[serde(deserialize_with = "lenient::timestamp")]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(deserialize_with = "lenient::timestamp")]
    pub updated_at: Option<DateTime<Utc>>,
    #[serde(deserialize_with = "lenient::optional_string")]
    pub created_by: Option<String>,
    #[serde(deserialize_with = "lenient::optional_string")]
    pub updated_by: Option<String>,
}

impl Language {
    pub fn region_name(&self) -> Option<&str> {
        non_empty(&self.region)
    }

    pub fn region(&self) -> Option<Region> {
        self.region_name().and_then(Region::parse)
    }

    pub fn family(&self) -> Option<Family> {
        non_empty(&self.family).and_then(Family::parse)
    }

    pub fn status(&self) -> Option<Status> {
        non_empty(&self.status).and_then(Status::parse)
    }

    pub fn coordinates(&self) -> Option<(f64, f64)> {
        self.geography.as_ref().and_then(Geography::coordinates)
    }
}

/// Present and not just whitespace
pub fn non_empty(value: &Option<String>) -> Option<&str> {
    value.as_deref().filter(|s| !s.trim().is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_partial_record_deserializes() {
        let json = r#"{
            "id": "abc",
            "name": "Saraiki",
            "speakers": "",
            "status": "Vulnerable",
            "geography": {"latitude": "", "longitude": 71.2},
            "dictionary": [{"word": "Salam", "meaning": null, "dialects": [""]}]
        }"#;
        let lang: Language = serde_json::from_str(json).unwrap();

        assert_eq!(lang.name, "Saraiki");
        assert_eq!(lang.speakers, None);
        assert_eq!(lang.status(), Some(Status::Vulnerable));
        assert_eq!(lang.region(), None);
        assert_eq!(lang.coordinates(), None);
        assert_eq!(lang.dictionary[0].meaning, "");
        assert_eq!(lang.dictionary[0].dialects().count(), 0);
    }

    #[test]
    fn test_null_dictionary_and_null_entries() {
        let lang: Language = serde_json::from_str(r#"{"id": "a", "dictionary": null}"#).unwrap();
        assert!(lang.dictionary.is_empty());

        let json = r#"{"id": "b", "dictionary": [null, {"word": "Pani", "meaning": "Water"}, "stray"]}"#;
        let lang: Language = serde_json::from_str(json).unwrap();
        assert_eq!(lang.dictionary.len(), 3);
        assert_eq!(lang.dictionary[0], DictionaryEntry::default());
        assert_eq!(lang.dictionary[1].word, "Pani");
        assert!(!lang.dictionary[2].is_valid());
    }

    #[test]
    fn test_timestamp_shapes() {
        let expected = DateTime::<Utc>::from_timestamp(1_700_000_000, 0);
        let created = |raw: &str| {
            let json = format!(r#"{{"id": "t", "createdAt": {raw}}}"#);
            serde_json::from_str::<Language>(&json).unwrap().created_at
        };

        assert_eq!(created(r#"{"seconds": 1700000000, "nanoseconds": 0}"#), expected);
        assert_eq!(created(r#"{"_seconds": 1700000000, "_nanoseconds": 0}"#), expected);
        assert_eq!(created(r#""2023-11-14T22:13:20Z""#), expected);
        assert_eq!(created("1700000000"), expected);
        assert_eq!(created("1700000000000"), expected);
        assert_eq!(created(r#""""#), None);
        assert_eq!(created(r#""last tuesday""#), None);
        assert_eq!(created("[1, 2]"), None);
        assert_eq!(created("null"), None);
    }

    #[test]
    fn test_odd_audit_and_geography_fields() {
        let json = r#"{
            "id": "c",
            "createdBy": "",
            "updatedBy": 42,
            "updatedAt": {"nanoseconds": 5},
            "geography": "31.5, 74.3"
        }"#;
        let lang: Language = serde_json::from_str(json).unwrap();
        assert_eq!(lang.created_by, None);
        assert_eq!(lang.updated_by.as_deref(), Some("42"));
        assert_eq!(lang.updated_at, None);
        assert_eq!(lang.geography, None);
    }

    #[test]
    fn test_one_malformed_document_keeps_the_rest() {
        let json = r#"[
            {"id": "ok", "name": "Sindhi", "dictionary": [{"word": "Mehrbani", "meaning": "Kindness"}]},
            {"id": "odd", "name": "Balochi", "dictionary": null, "createdAt": {"seconds": "soon"}}
        ]"#;
        let langs: Vec<Language> = serde_json::from_str(json).unwrap();
        assert_eq!(langs.len(), 2);
        assert_eq!(langs[1].created_at, None);
    }

    #[test]
    fn test_unknown_enumeration_value_is_not_fatal() {
        let lang: Language =
            serde_json::from_str(r#"{"id": "x", "family": "Unclassified"}"#).unwrap();
        assert_eq!(lang.family, Some("Unclassified".to_string()));
        assert_eq!(lang.family(), None);
    }

    #[test]
    fn test_enumerations_round_trip_through_names() {
        for region in Region::ALL {
            assert_eq!(Region::parse(region.as_str()), Some(region));
        }
        assert_eq!(Status::parse("Critically Endangered"), Some(Status::CriticallyEndangered));
        assert!(Status::CriticallyEndangered.is_endangered());
        assert!(!Status::Stable.is_endangered());
        assert_eq!(Family::IndoAryan.to_string(), "Indo-Aryan");
    }

    #[test]
    fn test_entry_region_ignores_blank_override() {
        let entry = DictionaryEntry {
            region: Some("  ".to_string()),
            ..DictionaryEntry::default()
        };
        assert_eq!(entry.region(), None);
    }
}
