//! Anti-pattern suppression of false-positive search candidates.
//!
//! An expansion such as `lan → "local area network"` is OR-ed into a
//! full-text query together with the bare keyword, so the index will happily
//! return a tender titled "land development works". Each keyword therefore
//! carries anti-patterns, and the search layer drops any candidate whose text
//! contains one of them.
//!
//! Two matching modes are available:
//!
//! - [`MatchMode::Substring`] (default): case-insensitive substring test.
//!   `"landline"` also suppresses `"landlines"`. Never misses a suppression
//!   that phrase matching would catch, except across irregular whitespace or
//!   punctuation.
//! - [`MatchMode::Phrase`]: the anti-pattern's words must occur as a
//!   contiguous run of whole words in the candidate, compared after Unicode
//!   word segmentation and lower-casing. `"land development"` then matches
//!   `"Land-Development"` but `"land"` does not match `"landline"`.
//!
//! # Examples
//!
//! ```
//! use tenderex::anti_pattern::should_suppress;
//!
//! let patterns = ["land development"];
//! assert!(should_suppress("Tender for LAND DEVELOPMENT project", &patterns));
//! assert!(!should_suppress("procurement of local area network switches", &patterns));
//! ```

use serde::{Deserialize, Serialize};

use crate::analysis::phrase::{contains_phrase, words};

/// How anti-patterns are compared against candidate text.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MatchMode {
    #[default]
    Substring,
    Phrase,
}

/// Case-insensitive substring check of `candidate_text` against every pattern.
///
/// Blank patterns are ignored; an empty pattern list never suppresses.
pub fn should_suppress<I, S>(candidate_text: &str, anti_patterns: I) -> bool
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    AntiPatternFilter::substring(anti_patterns).should_suppress(candidate_text)
}

#[derive(Debug, Clone, PartialEq)]
struct Pattern {
    lowered: String,
    words: Vec<String>,
}

/// Pre-compiled anti-pattern set for repeated checks against many candidates.
#[derive(Debug, Clone, PartialEq)]
pub struct AntiPatternFilter {
    mode: MatchMode,
    patterns: Vec<Pattern>,
}

impl AntiPatternFilter {
    pub fn new<I, S>(anti_patterns: I, mode: MatchMode) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let patterns = anti_patterns
            .into_iter()
            .filter_map(|p| {
                let lowered = p.as_ref().trim().to_lowercase();
                if lowered.is_empty() {
                    return None;
                }
                let words = words(&lowered);
                Some(Pattern { lowered, words })
            })
            .collect();

        AntiPatternFilter { mode, patterns }
    }

    pub fn substring<I, S>(anti_patterns: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        Self::new(anti_patterns, MatchMode::Substring)
    }

    pub fn phrase<I, S>(anti_patterns: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        Self::new(anti_patterns, MatchMode::Phrase)
    }

    pub fn mode(&self) -> MatchMode {
        self.mode
    }

    pub fn is_empty(&self) -> bool {
        self.patterns.is_empty()
    }

    pub fn len(&self) -> usize {
        self.patterns.len()
    }

    pub fn should_suppress(&self, candidate_text: &str) -> bool {
        self.matched_pattern(candidate_text).is_some()
    }

    /// The first anti-pattern found in `candidate_text`, if any.
    pub fn matched_pattern(&self, candidate_text: &str) -> Option<&str> {
        if self.patterns.is_empty() {
            return None;
        }

        let found = match self.mode {
            MatchMode::Substring => {
                let text = candidate_text.to_lowercase();
                self.patterns
                    .iter()
                    .find(|p| text.contains(p.lowered.as_str()))
            }
            MatchMode::Phrase => {
                let text = words(candidate_text);
                self.patterns
                    .iter()
                    .find(|p| contains_phrase(&text, &p.words))
            }
        };
        found.map(|p| p.lowered.as_str())
    }

    /// Keep the items whose text is not suppressed, preserving order.
    pub fn retain_unsuppressed<T, F>(&self, items: Vec<T>, text_of: F) -> Vec<T>
    where
        F: Fn(&T) -> &str,
    {
        if self.patterns.is_empty() {
            return items;
        }
        items
            .into_iter()
            .filter(|item| !self.should_suppress(text_of(item)))
            .collect()
    }
}
