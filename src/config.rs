//! Engine configuration.

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::anti_pattern::MatchMode;
use crate::error::{Result, TenderexError};
use crate::expansion::{DEFAULT_AMBIGUITY_CAP, DEFAULT_MAX_EXPANSIONS};
use crate::synonym::{ConfigFormat, DictionarySource};

/// Configuration for the expansion engine and the binary.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct EngineConfig {
    /// Synonym dictionary file, YAML or JSON.
    pub dictionary_path: PathBuf,

    /// Phrase cap applied when a caller does not pass one.
    pub default_max_expansions: usize,

    /// Confidence ceiling for keywords found in more than one domain.
    pub ambiguity_cap: f64,

    /// How anti-patterns are matched against candidate text.
    pub match_mode: MatchMode,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            dictionary_path: PathBuf::from("resources/synonyms.yaml"),
            default_max_expansions: DEFAULT_MAX_EXPANSIONS,
            ambiguity_cap: DEFAULT_AMBIGUITY_CAP,
            match_mode: MatchMode::default(),
        }
    }
}

impl EngineConfig {
    /// Load a configuration file, JSON or YAML by extension.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let format = ConfigFormat::from_path(path)?;
        let text = fs::read_to_string(path).map_err(|e| {
            TenderexError::Io(std::io::Error::new(
                e.kind(),
                format!("failed to read config file '{}': {}", path.display(), e),
            ))
        })?;
        let config: EngineConfig = format.parse(&text)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        if self.default_max_expansions == 0 {
            return Err(TenderexError::invalid_argument(
                "default_max_expansions must be at least 1",
            ));
        }
        if !(self.ambiguity_cap > 0.0 && self.ambiguity_cap <= DEFAULT_AMBIGUITY_CAP) {
            return Err(TenderexError::invalid_argument(format!(
                "ambiguity_cap must be in (0, {DEFAULT_AMBIGUITY_CAP}], got {}",
                self.ambiguity_cap
            )));
        }
        Ok(())
    }

    pub fn dictionary_source(&self) -> DictionarySource {
        DictionarySource::file(&self.dictionary_path)
    }
}
