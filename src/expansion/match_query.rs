//! Builder for the OR-ed FTS5 `MATCH` expression fed to the search backend.

/// Build an FTS5 match expression from expansion phrases.
///
/// Longer phrases come first (stable on ties) since they are the most
/// specific. Multi-word phrases are double-quoted with embedded quotes
/// doubled; single bare words stay unquoted unless they would be read as FTS5
/// syntax. Returns `None` when no phrase survives trimming.
pub fn build_match_expression<I, S>(phrases: I) -> Option<String>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut terms: Vec<(usize, String)> = phrases
        .into_iter()
        .filter_map(|p| {
            let phrase = p.as_ref().trim();
            if phrase.is_empty() {
                None
            } else {
                Some((phrase.split_whitespace().count(), format_term(phrase)))
            }
        })
        .collect();

    if terms.is_empty() {
        return None;
    }

    terms.sort_by(|a, b| b.0.cmp(&a.0));
    Some(
        terms
            .into_iter()
            .map(|(_, term)| term)
            .collect::<Vec<_>>()
            .join(" OR "),
    )
}

/// Quote `phrase` as a single FTS5 string literal.
pub fn quote(phrase: &str) -> String {
    format!("\"{}\"", phrase.replace('"', "\"\""))
}

fn format_term(phrase: &str) -> String {
    if is_bareword(phrase) {
        phrase.to_string()
    } else {
        quote(phrase)
    }
}

fn is_bareword(term: &str) -> bool {
    !matches!(term, "AND" | "OR" | "NOT" | "NEAR")
        && term.chars().all(|c| c.is_alphanumeric() || c == '_')
}
