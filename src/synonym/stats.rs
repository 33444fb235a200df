//! Summary statistics over a dictionary snapshot.

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::dictionary::SynonymDictionary;

/// Dictionary-wide counts reported by the `stats` command and health checks.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DictionaryStats {
    /// Distinct keywords across all domains.
    pub total_keywords: usize,
    /// `(domain, keyword)` entries; exceeds `total_keywords` when keywords are ambiguous.
    pub total_entries: usize,
    pub total_expansions: usize,
    pub average_expansions_per_keyword: f64,
    pub domain_distribution: BTreeMap<String, usize>,
    pub domains_supported: usize,
    /// Entries carrying at least one anti-pattern.
    pub anti_patterns_configured: usize,
    pub average_relevance_weight: f64,
    pub ambiguous_keywords: usize,
    pub config_version: Option<String>,
    pub configuration_source: String,
    pub loaded_at: DateTime<Utc>,
}

impl DictionaryStats {
    pub fn collect(dictionary: &SynonymDictionary) -> Self {
        let total_entries = dictionary.entry_count();
        let total_expansions: usize = dictionary.entries().map(|e| e.phrases.len()).sum();
        let weight_sum: f64 = dictionary.entries().map(|e| e.weight).sum();

        let domain_distribution = dictionary
            .domains()
            .iter()
            .map(|d| (d.name().to_string(), d.len()))
            .collect();

        DictionaryStats {
            total_keywords: dictionary.keyword_count(),
            total_entries,
            total_expansions,
            average_expansions_per_keyword: round_to(ratio(total_expansions as f64, total_entries), 2),
            domain_distribution,
            domains_supported: dictionary.domain_count(),
            anti_patterns_configured: dictionary
                .entries()
                .filter(|e| !e.anti_patterns.is_empty())
                .count(),
            average_relevance_weight: round_to(ratio(weight_sum, total_entries), 3),
            ambiguous_keywords: dictionary.ambiguous_keywords().len(),
            config_version: dictionary.version().map(str::to_string),
            configuration_source: dictionary.source().to_string(),
            loaded_at: dictionary.loaded_at(),
        }
    }
}

impl SynonymDictionary {
    pub fn stats(&self) -> DictionaryStats {
        DictionaryStats::collect(self)
    }
}

fn ratio(sum: f64, count: usize) -> f64 {
    if count == 0 { 0.0 } else { sum / count as f64 }
}

fn round_to(value: f64, places: i32) -> f64 {
    let factor = 10f64.powi(places);
    (value * factor).round() / factor
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::synonym::DictionarySource;

    #[test]
    fn test_collect() {
        let text = r#"
version: "9"
domains:
  cloud:
    keywords:
      api:
        phrases: [application programming interface, rest api, api gateway]
        anti_patterns: [application form]
        weight: 0.5
  government:
    keywords:
      api: [application]
      rfp: [request for proposal, tender document]
"#;
        let dict = SynonymDictionary::load(&DictionarySource::yaml(text)).unwrap();
        let stats = dict.stats();

        assert_eq!(stats.total_keywords, 2);
        assert_eq!(stats.total_entries, 3);
        assert_eq!(stats.total_expansions, 6);
        assert_eq!(stats.average_expansions_per_keyword, 2.0);
        assert_eq!(stats.domain_distribution["government"], 2);
        assert_eq!(stats.domains_supported, 2);
        assert_eq!(stats.anti_patterns_configured, 1);
        assert_eq!(stats.average_relevance_weight, 0.833);
        assert_eq!(stats.ambiguous_keywords, 1);
        assert_eq!(stats.config_version.as_deref(), Some("9"));
    }

    #[test]
    fn test_empty_dictionary() {
        let stats = DictionaryStats::collect(&SynonymDictionary::empty());
        assert_eq!(stats.total_keywords, 0);
        assert_eq!(stats.average_expansions_per_keyword, 0.0);
        assert_eq!(stats.average_relevance_weight, 0.0);
    }
}
