//! Keyword normalization.
//!
//! Raw user tokens arrive in every shape: upper case acronyms, padded
//! input, accented letters, stray punctuation. [`normalize`] folds all of
//! them onto the key space used by the synonym dictionary.
//!
//! # Examples
//!
//! ```
//! use tenderex::analysis::normalizer::normalize;
//!
//! assert_eq!(normalize("  LAN "), "lan");
//! assert_eq!(normalize("Wi-Fi\t6E!"), "wi-fi 6e");
//! assert_eq!(normalize("Café"), "cafe");
//! assert_eq!(normalize("?!"), "");
//! ```

use unicode_normalization::UnicodeNormalization;

/// Normalize a raw keyword into a dictionary lookup key.
///
/// The input is decomposed (NFKD) so diacritics split off their base letter,
/// lower-cased, and then reduced to `[a-z0-9 _-]`. Whitespace runs become a
/// single space and leading/trailing whitespace is dropped. The function is
/// total and idempotent.
pub fn normalize(raw: &str) -> String {
    let mut normalized = String::with_capacity(raw.len());
    let mut pending_space = false;

    for c in raw.nfkd().flat_map(char::to_lowercase) {
        if c.is_whitespace() {
            pending_space = !normalized.is_empty();
            continue;
        }
        if is_key_char(c) {
            if pending_space {
                normalized.push(' ');
                pending_space = false;
            }
            normalized.push(c);
        }
    }

    normalized
}

/// Whether `key` is already in normalized form.
pub fn is_normalized(key: &str) -> bool {
    normalize(key) == key
}

#[inline]
fn is_key_char(c: char) -> bool {
    matches!(c, 'a'..='z' | '0'..='9' | '_' | '-')
}
