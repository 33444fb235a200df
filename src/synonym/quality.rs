//! Quality review of a loaded dictionary.
//!
//! Load-time validation rejects documents that cannot be served at all. The
//! report here covers entries that load fine but will behave badly: phrases
//! that their own anti-patterns would suppress, thin expansions, phrases
//! shared by several keywords, and ambiguous keywords whose domains carry the
//! same weight so only name order decides.

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::anti_pattern::AntiPatternFilter;
use crate::expansion::DomainResolver;

use super::dictionary::SynonymDictionary;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum QualityRating {
    Excellent,
    Good,
    NeedsImprovement,
}

impl QualityRating {
    pub fn from_score(score: u32) -> Self {
        if score >= 90 {
            QualityRating::Excellent
        } else if score >= 70 {
            QualityRating::Good
        } else {
            QualityRating::NeedsImprovement
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QualityReport {
    pub quality_score: u32,
    pub quality_rating: QualityRating,
    pub issues: Vec<String>,
    pub warnings: Vec<String>,
    pub total_keywords: usize,
    pub well_defined_keywords: usize,
    pub validated_at: DateTime<Utc>,
}

impl QualityReport {
    pub fn review(dictionary: &SynonymDictionary) -> Self {
        let mut issues = Vec::new();
        let mut warnings = Vec::new();
        let mut single_expansion = 0usize;
        let mut flawed = 0usize;

        for entry in dictionary.entries() {
            let filter = AntiPatternFilter::substring(&entry.anti_patterns);
            let issues_before = issues.len();
            for phrase in &entry.phrases {
                if let Some(pattern) = filter.matched_pattern(phrase) {
                    issues.push(format!(
                        "{}.{}: phrase '{}' is suppressed by its own anti-pattern '{}'",
                        entry.domain, entry.keyword, phrase, pattern
                    ));
                }
            }
            let single = entry.phrases.len() == 1;
            if single {
                single_expansion += 1;
            }
            if single || issues.len() > issues_before {
                flawed += 1;
            }
        }
        if single_expansion > 0 {
            warnings.push(format!(
                "{single_expansion} keywords have only 1 expansion (recommend 2+)"
            ));
        }

        // phrase -> owners, in first-seen order
        let mut owners: BTreeMap<String, Vec<String>> = BTreeMap::new();
        for entry in dictionary.entries() {
            for phrase in &entry.phrases {
                owners
                    .entry(phrase.to_lowercase())
                    .or_default()
                    .push(format!("{}.{}", entry.domain, entry.keyword));
            }
        }
        for (phrase, keys) in owners.iter().filter(|(_, keys)| keys.len() > 1) {
            warnings.push(format!(
                "duplicate expansion '{}' in {}",
                phrase,
                keys.join(", ")
            ));
        }

        for keyword in dictionary.ambiguous_keywords() {
            let mut weights: Vec<(f64, &str)> = dictionary
                .candidates(keyword)
                .map(|c| (DomainResolver::candidate_weight(&c), c.domain.name()))
                .collect();
            weights.sort_by(|a, b| b.0.total_cmp(&a.0).then(a.1.cmp(b.1)));
            if weights.len() > 1 && weights[0].0 == weights[1].0 {
                warnings.push(format!(
                    "ambiguous keyword '{}' resolves to '{}' over '{}' by name order only",
                    keyword, weights[0].1, weights[1].1
                ));
            }
        }

        let penalty = issues.len() as i64 * 10 + warnings.len() as i64 * 2;
        let quality_score = (100 - penalty).clamp(0, 100) as u32;
        let total_keywords = dictionary.entry_count();

        QualityReport {
            quality_score,
            quality_rating: QualityRating::from_score(quality_score),
            issues,
            warnings,
            total_keywords,
            well_defined_keywords: total_keywords.saturating_sub(flawed),
            validated_at: Utc::now(),
        }
    }

    pub fn is_clean(&self) -> bool {
        self.issues.is_empty() && self.warnings.is_empty()
    }
}

impl SynonymDictionary {
    pub fn quality_report(&self) -> QualityReport {
        QualityReport::review(self)
    }
}
