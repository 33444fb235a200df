//! Validated, immutable synonym dictionary snapshot.
//!
//! A [`SynonymDictionary`] is built once from a [`SynonymDocument`] and never
//! mutated afterwards. Every keyword is indexed across all domains so resolving
//! a keyword is a single hash lookup that yields each `(domain, entry)` pair containing
//! the keyword.

use std::collections::HashSet;

use ahash::AHashMap;
use chrono::{DateTime, Utc};
use log::info;
use serde::{Deserialize, Serialize};

use crate::analysis::normalizer::normalize;
use crate::error::{ConfigError, Result, TenderexError};

use super::document::{DomainDocument, KeywordDocument, SynonymDocument};
use super::source::DictionarySource;

/// One keyword's expansion record within a domain.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SynonymEntry {
    /// Normalized, non-empty keyword.
    pub keyword: String,
    /// Name of the enclosing domain.
    pub domain: String,
    /// Expansion phrases, highest value first. Never empty.
    pub phrases: Vec<String>,
    /// Lower-cased suppression phrases.
    pub anti_patterns: Vec<String>,
    pub weight: f64,
}

/// A named group of keywords sharing a business area.
#[derive(Debug, Clone)]
pub struct Domain {
    name: String,
    priority: u32,
    description: Option<String>,
    entries: Vec<SynonymEntry>,
    by_keyword: AHashMap<String, usize>,
}

impl Domain {
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn priority(&self) -> u32 {
        self.priority
    }

    pub fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }

    pub fn get(&self, keyword: &str) -> Option<&SynonymEntry> {
        self.by_keyword.get(keyword).map(|&i| &self.entries[i])
    }

    /// Entries in document order.
    pub fn entries(&self) -> &[SynonymEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// A domain that contains a looked-up keyword, paired with its entry.
#[derive(Debug, Clone, Copy)]
pub struct Candidate<'a> {
    pub domain: &'a Domain,
    pub entry: &'a SynonymEntry,
}

/// A keyword returned by [`SynonymDictionary::search_keywords`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct KeywordMatch {
    pub keyword: String,
    pub domain: String,
    pub phrases: Vec<String>,
    pub weight: f64,
    pub has_anti_patterns: bool,
}

/// Immutable synonym dictionary indexed by normalized keyword.
#[derive(Debug, Clone)]
pub struct SynonymDictionary {
    version: Option<String>,
    source: String,
    loaded_at: DateTime<Utc>,
    domains: Vec<Domain>,
    domain_index: AHashMap<String, usize>,
    /// keyword -> (domain position, entry position), in domain order
    index: AHashMap<String, Vec<(usize, usize)>>,
}

impl SynonymDictionary {
    /// A dictionary with no domains. Every lookup misses.
    pub fn empty() -> Self {
        SynonymDictionary {
            version: None,
            source: String::from("<empty>"),
            loaded_at: Utc::now(),
            domains: Vec::new(),
            domain_index: AHashMap::new(),
            index: AHashMap::new(),
        }
    }

    /// Read, parse and validate a dictionary from `source`.
    pub fn load(source: &DictionarySource) -> Result<Self> {
        let document = source.read_document()?;
        let dictionary = Self::from_document(document, source.to_string())?;
        info!(
            "Loaded {} keywords across {} domains from {}",
            dictionary.keyword_count(),
            dictionary.domain_count(),
            dictionary.source
        );
        Ok(dictionary)
    }

    /// Validate a parsed document into a dictionary.
    pub fn from_document<S: Into<String>>(document: SynonymDocument, source: S) -> Result<Self> {
        if document.domains.is_empty() {
            return Err(TenderexError::malformed("document defines no domains"));
        }

        let mut domains = Vec::with_capacity(document.domains.len());
        let mut domain_index = AHashMap::with_capacity(document.domains.len());
        let mut index: AHashMap<String, Vec<(usize, usize)>> = AHashMap::new();

        for (raw_name, domain_doc) in document.domains {
            let name = raw_name.trim().to_string();
            if name.is_empty() {
                return Err(ConfigError::EmptyDomainName.into());
            }
            if domain_index.contains_key(&name) {
                return Err(ConfigError::DuplicateDomain(name).into());
            }

            let position = domains.len();
            let domain = build_domain(name, domain_doc)?;
            for (entry_position, entry) in domain.entries.iter().enumerate() {
                index
                    .entry(entry.keyword.clone())
                    .or_default()
                    .push((position, entry_position));
            }
            domain_index.insert(domain.name.clone(), position);
            domains.push(domain);
        }

        Ok(SynonymDictionary {
            version: document.version,
            source: source.into(),
            loaded_at: Utc::now(),
            domains,
            domain_index,
            index,
        })
    }

    /// All `(domain, entry)` pairs for an already-normalized keyword.
    pub fn candidates<'a>(
        &'a self,
        keyword: &str,
    ) -> impl ExactSizeIterator<Item = Candidate<'a>> + use<'a> {
        self.index
            .get(keyword)
            .map(Vec::as_slice)
            .unwrap_or(&[])
            .iter()
            .map(move |&(d, e)| {
                let domain = &self.domains[d];
                Candidate {
                    domain,
                    entry: &domain.entries[e],
                }
            })
    }

    pub fn contains(&self, keyword: &str) -> bool {
        self.index.contains_key(keyword)
    }

    pub fn domain(&self, name: &str) -> Option<&Domain> {
        self.domain_index.get(name).map(|&i| &self.domains[i])
    }

    /// Domains in document order.
    pub fn domains(&self) -> &[Domain] {
        &self.domains
    }

    /// Domain names in document order.
    pub fn domain_names(&self) -> Vec<&str> {
        self.domains.iter().map(Domain::name).collect()
    }

    /// Every distinct keyword, sorted.
    pub fn keywords(&self) -> Vec<&str> {
        let mut keywords: Vec<&str> = self.index.keys().map(String::as_str).collect();
        keywords.sort_unstable();
        keywords
    }

    /// Keywords of one domain, sorted. Unknown domains yield nothing.
    pub fn domain_keywords(&self, name: &str) -> Vec<&str> {
        let mut keywords: Vec<&str> = self
            .domain(name)
            .map(|d| d.entries.iter().map(|e| e.keyword.as_str()).collect())
            .unwrap_or_default();
        keywords.sort_unstable();
        keywords
    }

    /// Keywords present in more than one domain, sorted.
    pub fn ambiguous_keywords(&self) -> Vec<&str> {
        let mut keywords: Vec<&str> = self
            .index
            .iter()
            .filter(|(_, slots)| slots.len() > 1)
            .map(|(k, _)| k.as_str())
            .collect();
        keywords.sort_unstable();
        keywords
    }

    /// Case-insensitive substring search over keywords and their phrases.
    ///
    /// Results are ordered by keyword, then domain name.
    pub fn search_keywords(&self, query: &str, limit: usize) -> Vec<KeywordMatch> {
        let needle = query.trim().to_lowercase();
        if needle.is_empty() || limit == 0 {
            return Vec::new();
        }

        let mut matches: Vec<KeywordMatch> = self
            .entries()
            .filter(|entry| {
                entry.keyword.contains(&needle)
                    || entry
                        .phrases
                        .iter()
                        .any(|p| p.to_lowercase().contains(&needle))
            })
            .map(|entry| KeywordMatch {
                keyword: entry.keyword.clone(),
                domain: entry.domain.clone(),
                phrases: entry.phrases.clone(),
                weight: entry.weight,
                has_anti_patterns: !entry.anti_patterns.is_empty(),
            })
            .collect();

        matches.sort_by(|a, b| a.keyword.cmp(&b.keyword).then(a.domain.cmp(&b.domain)));
        matches.truncate(limit);
        matches
    }

    /// Every entry of every domain, in document order.
    pub fn entries(&self) -> impl Iterator<Item = &SynonymEntry> {
        self.domains.iter().flat_map(|d| d.entries.iter())
    }

    /// Number of distinct keywords.
    pub fn keyword_count(&self) -> usize {
        self.index.len()
    }

    /// Number of `(domain, keyword)` entries; larger than
    /// [`keyword_count`](Self::keyword_count) when keywords are ambiguous.
    pub fn entry_count(&self) -> usize {
        self.domains.iter().map(Domain::len).sum()
    }

    pub fn domain_count(&self) -> usize {
        self.domains.len()
    }

    pub fn version(&self) -> Option<&str> {
        self.version.as_deref()
    }

    /// Description of the source this snapshot was loaded from.
    pub fn source(&self) -> &str {
        &self.source
    }

    pub fn loaded_at(&self) -> DateTime<Utc> {
        self.loaded_at
    }
}

impl Default for SynonymDictionary {
    fn default() -> Self {
        Self::empty()
    }
}

fn build_domain(name: String, document: DomainDocument) -> Result<Domain> {
    let priority = u32::try_from(document.priority)
        .ok()
        .filter(|&p| p >= 1)
        .ok_or_else(|| ConfigError::InvalidPriority {
            domain: name.clone(),
            priority: document.priority,
        })?;

    let mut entries = Vec::with_capacity(document.keywords.len());
    let mut by_keyword = AHashMap::with_capacity(document.keywords.len());

    for (raw_keyword, keyword_doc) in document.keywords {
        let entry = build_entry(&name, &raw_keyword, keyword_doc)?;
        if by_keyword.contains_key(&entry.keyword) {
            return Err(ConfigError::DuplicateKeyword {
                domain: name,
                keyword: entry.keyword,
            }
            .into());
        }
        by_keyword.insert(entry.keyword.clone(), entries.len());
        entries.push(entry);
    }

    Ok(Domain {
        name,
        priority,
        description: document.description,
        entries,
        by_keyword,
    })
}

fn build_entry(domain: &str, raw_keyword: &str, document: KeywordDocument) -> Result<SynonymEntry> {
    let keyword = normalize(raw_keyword);
    if keyword.is_empty() {
        return Err(ConfigError::EmptyKeyword {
            domain: domain.to_string(),
            raw: raw_keyword.to_string(),
        }
        .into());
    }

    let (raw_phrases, raw_anti_patterns, weight) = document.into_parts();

    if raw_phrases.is_empty() {
        return Err(ConfigError::EmptyPhrases {
            domain: domain.to_string(),
            keyword,
        }
        .into());
    }
    if !weight.is_finite() || weight <= 0.0 {
        return Err(ConfigError::InvalidWeight {
            domain: domain.to_string(),
            keyword,
            weight,
        }
        .into());
    }

    // Repeated phrases keep their first position.
    let mut seen = HashSet::with_capacity(raw_phrases.len());
    let mut phrases = Vec::with_capacity(raw_phrases.len());
    for phrase in raw_phrases {
        let phrase = phrase.trim();
        if phrase.is_empty() {
            return Err(ConfigError::BlankPhrase {
                domain: domain.to_string(),
                keyword,
            }
            .into());
        }
        if seen.insert(phrase.to_lowercase()) {
            phrases.push(phrase.to_string());
        }
    }

    let mut anti_patterns: Vec<String> = Vec::with_capacity(raw_anti_patterns.len());
    for pattern in raw_anti_patterns {
        let pattern = pattern.trim().to_lowercase();
        if pattern.is_empty() {
            return Err(ConfigError::BlankAntiPattern {
                domain: domain.to_string(),
                keyword,
            }
            .into());
        }
        if !anti_patterns.contains(&pattern) {
            anti_patterns.push(pattern);
        }
    }

    Ok(SynonymEntry {
        keyword,
        domain: domain.to_string(),
        phrases,
        anti_patterns,
        weight,
    })
}
