//! Serde schema of the synonym configuration document.
//!
//! The document is an external data contract. It is parsed into the loose
//! types below and only then validated into [`SynonymDictionary`]; nothing
//! outside this module sees the raw shape.
//!
//! [`SynonymDictionary`]: crate::synonym::SynonymDictionary

use std::fmt;
use std::marker::PhantomData;
use std::path::Path;

use serde::de::{Deserializer, MapAccess, Visitor};
use serde::ser::{SerializeMap, Serializer};
use serde::{Deserialize, Serialize};

use crate::error::{ConfigError, Result, TenderexError};

/// Serialization format of a configuration document.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ConfigFormat {
    Yaml,
    Json,
}

impl ConfigFormat {
    /// Pick the format from a file extension (`yaml`, `yml` or `json`).
    pub fn from_path(path: &Path) -> std::result::Result<Self, ConfigError> {
        let extension = path
            .extension()
            .and_then(|ext| ext.to_str())
            .map(str::to_ascii_lowercase)
            .unwrap_or_default();

        match extension.as_str() {
            "yaml" | "yml" => Ok(ConfigFormat::Yaml),
            "json" => Ok(ConfigFormat::Json),
            _ => Err(ConfigError::UnsupportedFormat(extension)),
        }
    }

    /// Deserialize `text` in this format.
    pub fn parse<T: for<'de> Deserialize<'de>>(self, text: &str) -> Result<T> {
        Ok(match self {
            ConfigFormat::Yaml => serde_yaml::from_str(text)?,
            ConfigFormat::Json => serde_json::from_str(text)?,
        })
    }
}

/// Mapping that keeps document order and duplicate keys.
///
/// `HashMap` would silently keep the last of two identical keys; validation
/// needs to see both to reject them.
#[derive(Debug, Clone, PartialEq)]
pub struct Entries<T>(pub Vec<(String, T)>);

impl<T> Default for Entries<T> {
    fn default() -> Self {
        Entries(Vec::new())
    }
}

impl<T> Entries<T> {
    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &T)> {
        self.0.iter().map(|(key, value)| (key.as_str(), value))
    }
}

impl<T> FromIterator<(String, T)> for Entries<T> {
    fn from_iter<I: IntoIterator<Item = (String, T)>>(iter: I) -> Self {
        Entries(iter.into_iter().collect())
    }
}

impl<T> IntoIterator for Entries<T> {
    type Item = (String, T);
    type IntoIter = std::vec::IntoIter<(String, T)>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}

impl<'de, T: Deserialize<'de>> Deserialize<'de> for Entries<T> {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        struct EntriesVisitor<T>(PhantomData<T>);

        impl<'de, T: Deserialize<'de>> Visitor<'de> for EntriesVisitor<T> {
            type Value = Entries<T>;

            fn expecting(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
                formatter.write_str("a mapping")
            }

            fn visit_unit<E>(self) -> std::result::Result<Self::Value, E> {
                Ok(Entries::default())
            }

            fn visit_map<A: MapAccess<'de>>(
                self,
                mut map: A,
            ) -> std::result::Result<Self::Value, A::Error> {
                let mut entries = Vec::with_capacity(map.size_hint().unwrap_or(0));
                while let Some((key, value)) = map.next_entry::<String, T>()? {
                    entries.push((key, value));
                }
                Ok(Entries(entries))
            }
        }

        deserializer.deserialize_map(EntriesVisitor(PhantomData))
    }
}

impl<T: Serialize> Serialize for Entries<T> {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.0.len()))?;
        for (key, value) in &self.0 {
            map.serialize_entry(key, value)?;
        }
        map.end()
    }
}

/// Top-level synonym document.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SynonymDocument {
    #[serde(default)]
    pub version: Option<String>,
    #[serde(default)]
    pub domains: Entries<DomainDocument>,
}

impl SynonymDocument {
    pub fn parse(text: &str, format: ConfigFormat) -> Result<Self> {
        if text.trim().is_empty() {
            return Err(TenderexError::malformed("document is empty"));
        }
        format.parse(text)
    }
}

fn default_priority() -> i64 {
    1
}

fn default_weight() -> f64 {
    1.0
}

/// One domain block.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct DomainDocument {
    #[serde(default = "default_priority")]
    pub priority: i64,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub keywords: Entries<KeywordDocument>,
}

/// One keyword, either the full form or a bare phrase list.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(untagged)]
pub enum KeywordDocument {
    Missing,
    Phrases(Vec<String>),
    Detailed(KeywordDetails),
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct KeywordDetails {
    #[serde(default, alias = "expansions")]
    pub phrases: Vec<String>,
    #[serde(default)]
    pub anti_patterns: Vec<String>,
    #[serde(default = "default_weight")]
    pub weight: f64,
}

impl KeywordDocument {
    /// Flatten both forms into `(phrases, anti_patterns, weight)`.
    pub fn into_parts(self) -> (Vec<String>, Vec<String>, f64) {
        match self {
            KeywordDocument::Missing => (Vec::new(), Vec::new(), default_weight()),
            KeywordDocument::Phrases(phrases) => (phrases, Vec::new(), default_weight()),
            KeywordDocument::Detailed(details) => {
                (details.phrases, details.anti_patterns, details.weight)
            }
        }
    }
}
