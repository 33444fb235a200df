//! Where a synonym dictionary is read from.

use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};

use crate::error::{Result, TenderexError};

use super::document::{ConfigFormat, SynonymDocument};

/// Configuration source for [`SynonymDictionary::load`].
///
/// [`SynonymDictionary::load`]: crate::synonym::SynonymDictionary::load
#[derive(Debug, Clone, PartialEq)]
pub enum DictionarySource {
    /// A YAML or JSON file, format chosen by extension.
    File(PathBuf),
    /// An in-memory document, mostly for tests and embedding.
    Inline { format: ConfigFormat, content: String },
}

impl DictionarySource {
    pub fn file<P: AsRef<Path>>(path: P) -> Self {
        DictionarySource::File(path.as_ref().to_path_buf())
    }

    pub fn yaml<S: Into<String>>(content: S) -> Self {
        DictionarySource::Inline {
            format: ConfigFormat::Yaml,
            content: content.into(),
        }
    }

    pub fn json<S: Into<String>>(content: S) -> Self {
        DictionarySource::Inline {
            format: ConfigFormat::Json,
            content: content.into(),
        }
    }

    /// Read and parse the document. No validation happens here.
    pub fn read_document(&self) -> Result<SynonymDocument> {
        match self {
            DictionarySource::File(path) => {
                let format = ConfigFormat::from_path(path)?;
                let content = fs::read_to_string(path).map_err(|e| {
                    TenderexError::Io(std::io::Error::new(
                        e.kind(),
                        format!("failed to read synonym file '{}': {}", path.display(), e),
                    ))
                })?;
                SynonymDocument::parse(&content, format)
            }
            DictionarySource::Inline { format, content } => {
                SynonymDocument::parse(content, *format)
            }
        }
    }
}

impl fmt::Display for DictionarySource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DictionarySource::File(path) => write!(f, "{}", path.display()),
            DictionarySource::Inline { format, .. } => write!(f, "<inline {format:?}>"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_read_missing_file() {
        let source = DictionarySource::file("does/not/exist.yaml");
        match source.read_document() {
            Err(TenderexError::Io(e)) => assert!(e.to_string().contains("exist.yaml")),
            other => panic!("expected I/O error, got {other:?}"),
        }
    }

    #[test]
    fn test_display() {
        assert_eq!(DictionarySource::file("a/b.yaml").to_string(), "a/b.yaml");
        assert_eq!(DictionarySource::json("{}").to_string(), "<inline Json>");
    }

    #[test]
    fn test_inline_json() {
        let doc = DictionarySource::json(r#"{"version": "3", "domains": {}}"#)
            .read_document()
            .unwrap();
        assert_eq!(doc.version.as_deref(), Some("3"));
        assert!(doc.domains.is_empty());
    }
}
