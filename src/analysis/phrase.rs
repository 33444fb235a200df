//! Word-level tokenization for whole-phrase matching.
//!
//! Splits text on Unicode word boundaries (UAX #29) and lower-cases each
//! word, so that `"Land-Development"` and `"land development"` compare equal
//! at the word level.

use unicode_segmentation::UnicodeSegmentation;

/// Split `text` into lower-cased words.
pub fn words(text: &str) -> Vec<String> {
    text.unicode_words().map(str::to_lowercase).collect()
}

/// Whether the word sequence `needle` occurs contiguously in `haystack`.
pub fn contains_phrase(haystack: &[String], needle: &[String]) -> bool {
    if needle.is_empty() || needle.len() > haystack.len() {
        return false;
    }
    haystack.windows(needle.len()).any(|window| window == needle)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_words() {
        assert_eq!(
            words("Tender for Land-Development, phase II"),
            vec!["tender", "for", "land", "development", "phase", "ii"]
        );
        assert!(words("  ... ").is_empty());
    }

    #[test]
    fn test_contains_phrase() {
        let haystack = words("supply of landline handsets");
        assert!(contains_phrase(&haystack, &words("landline")));
        assert!(contains_phrase(&haystack, &words("LANDLINE handsets")));
        assert!(!contains_phrase(&haystack, &words("land")));
        assert!(!contains_phrase(&haystack, &[]));
    }
}
