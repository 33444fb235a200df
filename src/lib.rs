//! # tenderex
//!
//! Keyword expansion and domain classification for government tender search.
//!
//! ## Features
//!
//! - Multi-domain synonym dictionary loaded from YAML or JSON
//! - Hot reload with atomic snapshot swap
//! - Deterministic resolution of ambiguous acronyms
//! - Anti-pattern filtering of false-positive matches
//! - FTS5 match expression builder

pub mod analysis;
pub mod anti_pattern;
pub mod cli;
pub mod config;
pub mod error;
pub mod expansion;
pub mod synonym;

pub mod prelude {
    pub use crate::anti_pattern::{AntiPatternFilter, MatchMode, should_suppress};
    pub use crate::config::EngineConfig;
    pub use crate::error::{ConfigError, Result, TenderexError};
    pub use crate::expansion::{ExpansionEngine, ExpansionResult};
    pub use crate::synonym::{DictionarySource, SynonymDictionary, SynonymStore};
}

// Version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
