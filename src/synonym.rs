//! Synonym dictionary: configuration schema, validated snapshots and the
//! hot-reloadable store that publishes them.
//!
//! # Examples
//!
//! ```
//! use tenderex::synonym::{DictionarySource, SynonymStore};
//!
//! let yaml = r#"
//! domains:
//!   networking:
//!     priority: 5
//!     keywords:
//!       lan:
//!         phrases: [local area network, ethernet]
//!         anti_patterns: [land development]
//! "#;
//!
//! let store = SynonymStore::open(DictionarySource::yaml(yaml)).unwrap();
//! let snapshot = store.snapshot();
//! let lan: Vec<_> = snapshot.candidates("lan").collect();
//! assert_eq!(lan[0].domain.name(), "networking");
//! ```

pub mod dictionary;
pub mod document;
pub mod quality;
pub mod source;
pub mod stats;
pub mod store;

pub use dictionary::{Candidate, Domain, KeywordMatch, SynonymDictionary, SynonymEntry};
pub use document::{ConfigFormat, SynonymDocument};
pub use quality::{QualityRating, QualityReport};
pub use source::DictionarySource;
pub use stats::DictionaryStats;
pub use store::{ReloadReport, StoreState, SynonymStore};
