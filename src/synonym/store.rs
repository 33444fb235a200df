//! Hot-reloadable holder of the current dictionary snapshot.
//!
//! Readers call [`SynonymStore::snapshot`] and keep the returned `Arc` for the
//! lifetime of a request. A reload builds the replacement off to the side and
//! publishes it with a single atomic pointer swap, so a reader sees either the
//! old snapshot or the new one and never a mix. Readers take no lock. Reloads are serialized; a failed
//! reload leaves the published snapshot untouched.

use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};

use arc_swap::ArcSwap;
use chrono::{DateTime, Utc};
use log::{info, warn};
use parking_lot::{Mutex, RwLock};
use serde::{Deserialize, Serialize};

use crate::error::Result;

use super::dictionary::SynonymDictionary;
use super::source::DictionarySource;

/// Lifecycle of the store once it has been opened.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StoreState {
    Ready,
    Reloading,
}

/// Outcome of a successful reload.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReloadReport {
    pub previous_keywords: usize,
    pub current_keywords: usize,
    pub keywords_added: i64,
    pub previous_domains: usize,
    pub current_domains: usize,
    pub generation: u64,
    pub source: String,
    pub reloaded_at: DateTime<Utc>,
}

/// Owner of the published [`SynonymDictionary`].
#[derive(Debug)]
pub struct SynonymStore {
    current: ArcSwap<SynonymDictionary>,
    source: RwLock<DictionarySource>,
    reload_lock: Mutex<()>,
    generation: AtomicU64,
}

impl SynonymStore {
    /// Load the initial snapshot. Fails if the source does not validate.
    pub fn open(source: DictionarySource) -> Result<Self> {
        let dictionary = SynonymDictionary::load(&source)?;
        Ok(Self::with_dictionary(dictionary, source))
    }

    /// Wrap an already-built dictionary.
    pub fn with_dictionary(dictionary: SynonymDictionary, source: DictionarySource) -> Self {
        SynonymStore {
            current: ArcSwap::from_pointee(dictionary),
            source: RwLock::new(source),
            reload_lock: Mutex::new(()),
            generation: AtomicU64::new(0),
        }
    }

    /// The currently published snapshot. Never blocks, not even during a
    /// reload.
    pub fn snapshot(&self) -> Arc<SynonymDictionary> {
        self.current.load_full()
    }

    /// Re-read the source the current snapshot came from.
    pub fn reload_current(&self) -> Result<ReloadReport> {
        let source = self.source.read().clone();
        self.reload(source)
    }

    /// Build a snapshot from `source` and publish it.
    ///
    /// All or nothing: on error the previous snapshot and source stay in
    /// effect.
    pub fn reload(&self, source: DictionarySource) -> Result<ReloadReport> {
        let _guard = self.reload_lock.lock();

        let dictionary = match SynonymDictionary::load(&source) {
            Ok(dictionary) => dictionary,
            Err(e) => {
                warn!("Synonym reload from {source} rejected, keeping previous snapshot: {e}");
                return Err(e);
            }
        };

        let current_keywords = dictionary.keyword_count();
        let current_domains = dictionary.domain_count();
        let reloaded_at = dictionary.loaded_at();

        let previous = self.current.swap(Arc::new(dictionary));
        let description = source.to_string();
        *self.source.write() = source;
        let generation = self.generation.fetch_add(1, Ordering::AcqRel) + 1;

        info!(
            "Synonym dictionary reloaded from {description} (generation {generation}): {} -> {current_keywords} keywords",
            previous.keyword_count()
        );

        Ok(ReloadReport {
            previous_keywords: previous.keyword_count(),
            current_keywords,
            keywords_added: current_keywords as i64 - previous.keyword_count() as i64,
            previous_domains: previous.domain_count(),
            current_domains,
            generation,
            source: description,
            reloaded_at,
        })
    }

    pub fn state(&self) -> StoreState {
        if self.reload_lock.is_locked() {
            StoreState::Reloading
        } else {
            StoreState::Ready
        }
    }

    /// Number of successful reloads since the store was opened.
    pub fn generation(&self) -> u64 {
        self.generation.load(Ordering::Acquire)
    }

    pub fn source(&self) -> DictionarySource {
        self.source.read().clone()
    }
}
