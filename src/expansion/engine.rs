//! The keyword expansion engine.

use std::sync::Arc;

use log::debug;

use crate::analysis::normalizer::normalize;
use crate::config::EngineConfig;
use crate::synonym::{SynonymDictionary, SynonymStore};

use super::resolver::DomainResolver;
use super::result::ExpansionResult;

/// Domain reported when nothing matched.
pub const UNKNOWN_DOMAIN: &str = "unknown";

/// Phrase cap used when the caller does not ask for one.
pub const DEFAULT_MAX_EXPANSIONS: usize = 5;

/// Map a caller-supplied phrase cap onto a usable one: anything below 1 is 1.
pub fn clamp_max_expansions(requested: i64) -> usize {
    usize::try_from(requested).unwrap_or(0).max(1)
}

/// Expands keywords against the snapshot currently published by a
/// [`SynonymStore`].
///
/// Every call takes its own snapshot, so a reload running in parallel is
/// never observed halfway.
#[derive(Debug, Clone)]
pub struct ExpansionEngine {
    store: Arc<SynonymStore>,
    resolver: DomainResolver,
    default_max_expansions: usize,
}

impl ExpansionEngine {
    pub fn new(store: Arc<SynonymStore>) -> Self {
        ExpansionEngine {
            store,
            resolver: DomainResolver::default(),
            default_max_expansions: DEFAULT_MAX_EXPANSIONS,
        }
    }

    pub fn with_config(store: Arc<SynonymStore>, config: &EngineConfig) -> Self {
        ExpansionEngine {
            store,
            resolver: DomainResolver::new(config.ambiguity_cap),
            default_max_expansions: config.default_max_expansions.max(1),
        }
    }

    pub fn store(&self) -> &Arc<SynonymStore> {
        &self.store
    }

    pub fn resolver(&self) -> &DomainResolver {
        &self.resolver
    }

    pub fn default_max_expansions(&self) -> usize {
        self.default_max_expansions
    }

    /// Expand `raw_query` into at most `max_expansions` phrases.
    ///
    /// A cap of 0 behaves like 1. Unrecognized input yields
    /// [`ExpansionResult::unknown`].
    pub fn expand(&self, raw_query: &str, max_expansions: usize) -> ExpansionResult {
        let snapshot = self.store.snapshot();
        self.expand_in(&snapshot, raw_query, max_expansions)
    }

    pub fn expand_default(&self, raw_query: &str) -> ExpansionResult {
        self.expand(raw_query, self.default_max_expansions)
    }

    /// Expand against an explicit snapshot instead of the store's current one.
    pub fn expand_in(
        &self,
        dictionary: &SynonymDictionary,
        raw_query: &str,
        max_expansions: usize,
    ) -> ExpansionResult {
        let normalized = normalize(raw_query);
        if normalized.is_empty() {
            debug!("Query {raw_query:?} normalized to nothing");
            return ExpansionResult::unknown(raw_query, normalized);
        }

        let Some(resolution) = self.resolver.resolve(dictionary.candidates(&normalized)) else {
            debug!("No synonyms for {normalized:?}");
            return ExpansionResult::unknown(raw_query, normalized);
        };

        let limit = max_expansions.max(1);
        let entry = resolution.entry;
        debug!(
            "Expanded {normalized:?} in domain {} ({} candidates, confidence {:.3})",
            resolution.domain.name(),
            resolution.competing,
            resolution.confidence
        );

        ExpansionResult {
            query: raw_query.to_string(),
            normalized_query: normalized,
            phrases: entry.phrases.iter().take(limit).cloned().collect(),
            domain: resolution.domain.name().to_string(),
            confidence: resolution.confidence,
            weight: entry.weight,
            anti_patterns: entry.anti_patterns.clone(),
        }
    }
}
