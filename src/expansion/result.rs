use serde::{Deserialize, Serialize};

use crate::anti_pattern::{AntiPatternFilter, MatchMode};

use super::engine::UNKNOWN_DOMAIN;
use super::match_query::{build_match_expression, quote};

/// Outcome of expanding one query.
///
/// Built fresh for every call and never cached by the engine.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExpansionResult {
    /// Input exactly as received.
    pub query: String,
    /// Lookup key after normalization.
    pub normalized_query: String,
    /// Expansion phrases in priority order.
    pub phrases: Vec<String>,
    /// Winning domain, or `"unknown"`.
    pub domain: String,
    /// `1.0` unambiguous, `(0.0, 0.99]` ambiguous, `0.0` no match.
    pub confidence: f64,
    /// Weight of the matched entry, `0.0` when nothing matched.
    #[serde(default)]
    pub weight: f64,
    /// Suppression phrases for downstream filtering.
    pub anti_patterns: Vec<String>,
}

impl ExpansionResult {
    /// The fallback result for a query with no dictionary match.
    pub fn unknown<Q, N>(query: Q, normalized_query: N) -> Self
    where
        Q: Into<String>,
        N: Into<String>,
    {
        ExpansionResult {
            query: query.into(),
            normalized_query: normalized_query.into(),
            phrases: Vec::new(),
            domain: UNKNOWN_DOMAIN.to_string(),
            confidence: 0.0,
            weight: 0.0,
            anti_patterns: Vec::new(),
        }
    }

    pub fn is_match(&self) -> bool {
        !self.phrases.is_empty()
    }

    pub fn expansion_count(&self) -> usize {
        self.phrases.len()
    }

    /// A filter over this result's anti-patterns.
    pub fn filter(&self, mode: MatchMode) -> AntiPatternFilter {
        AntiPatternFilter::new(&self.anti_patterns, mode)
    }

    /// The FTS5 `MATCH` expression for this result.
    ///
    /// Without phrases the search falls back to the literal normalized query;
    /// `None` means there is nothing to search for at all.
    pub fn match_expression(&self) -> Option<String> {
        if self.is_match() {
            build_match_expression(&self.phrases)
        } else if self.normalized_query.is_empty() {
            None
        } else {
            Some(quote(&self.normalized_query))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unknown() {
        let result = ExpansionResult::unknown("ZZZ!", "zzz");
        assert_eq!(result.query, "ZZZ!");
        assert_eq!(result.domain, "unknown");
        assert_eq!(result.confidence, 0.0);
        assert!(!result.is_match());
        assert_eq!(result.match_expression().as_deref(), Some("\"zzz\""));
        assert_eq!(ExpansionResult::unknown("!!", "").match_expression(), None);
    }

    #[test]
    fn test_json_field_names() {
        let result = ExpansionResult {
            query: "LAN".to_string(),
            normalized_query: "lan".to_string(),
            phrases: vec!["local area network".to_string()],
            domain: "networking".to_string(),
            confidence: 1.0,
            weight: 1.0,
            anti_patterns: vec!["land development".to_string()],
        };
        let value = serde_json::to_value(&result).unwrap();
        for field in ["query", "normalized_query", "phrases", "domain", "confidence", "weight"] {
            assert!(value.get(field).is_some(), "missing {field}");
        }
        assert!(result.filter(MatchMode::Substring).should_suppress("Land Development Board"));
    }
}
