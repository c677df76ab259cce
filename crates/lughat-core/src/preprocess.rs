use std::cmp::Ordering;

use unicode_normalization::UnicodeNormalization;

/// Comparison form of a piece of text: NFKC normalized, then lowercased.
///
/// Search and sorting both go through this so that "Apple" and "apple", or a
/// composed and decomposed "é", are treated alike. Accents are kept.
pub fn fold(text: &str) -> String {
    text.nfkc().collect::<String>().to_lowercase()
}

/// `haystack` contains an already folded `needle`
pub fn contains_folded(haystack: &str, needle: &str) -> bool {
    fold(haystack).contains(needle)
}

/// Order two strings by their folded form
pub fn compare_folded(a: &str, b: &str) -> Ordering {
    fold(a).cmp(&fold(b))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fold_ignores_case_and_width() {
        assert_eq!(fold("SaLaM"), "salam");
        // fullwidth latin folds to ascii under NFKC
        assert_eq!(fold("Ｓａｌａｍ"), "salam");
    }

    #[test]
    fn test_composed_and_decomposed_match() {
        assert!(contains_folded("Cafe\u{301}", &fold("café")));
    }

    #[test]
    fn test_compare_is_case_insensitive() {
        assert_eq!(compare_folded("Apple", "banana"), Ordering::Less);
        assert_eq!(compare_folded("apple", "APPLE"), Ordering::Equal);
    }
}
