//! Error types for the tenderex library.
//!
//! Every fallible operation returns [`TenderexError`]. Load and reload of the
//! synonym configuration are the only places where domain errors originate;
//! they are reported as [`ConfigError`] so an operator can see exactly which
//! domain or keyword was rejected. Query-time code paths never fail.
//!
//! # Examples
//!
//! ```
//! use tenderex::error::{ConfigError, Result, TenderexError};
//!
//! fn reject() -> Result<()> {
//!     Err(ConfigError::EmptyPhrases {
//!         domain: "networking".to_string(),
//!         keyword: "lan".to_string(),
//!     }
//!     .into())
//! }
//!
//! assert!(matches!(reject(), Err(TenderexError::Config(_))));
//! ```

use std::io;

use thiserror::Error;

/// The main error type for tenderex operations.
#[derive(Error, Debug)]
pub enum TenderexError {
    /// I/O errors (reading a configuration source, writing CLI output)
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// Synonym configuration rejected at load or reload time
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// JSON serialization/deserialization errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// YAML serialization/deserialization errors
    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    /// Invalid caller-supplied argument
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    /// Generic error for other cases
    #[error("Error: {0}")]
    Other(String),
}

/// Validation failures raised while building a dictionary snapshot.
///
/// A reload that fails with any of these leaves the previous snapshot in
/// effect.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ConfigError {
    #[error("configuration document is malformed: {0}")]
    Malformed(String),

    #[error("unsupported configuration format '{0}' (expected yaml, yml or json)")]
    UnsupportedFormat(String),

    #[error("domain name is empty")]
    EmptyDomainName,

    #[error("domain '{0}' is defined more than once")]
    DuplicateDomain(String),

    /// Priorities start at 1. A zero priority would give every entry of the
    /// domain a zero weight, and an ambiguous keyword could then resolve with
    /// zero confidence.
    #[error("domain '{domain}' has a priority of {priority}; priorities must be at least 1")]
    InvalidPriority { domain: String, priority: i64 },

    #[error("domain '{domain}' contains a keyword '{raw}' that is empty after normalization")]
    EmptyKeyword { domain: String, raw: String },

    #[error("keyword '{keyword}' is defined more than once in domain '{domain}'")]
    DuplicateKeyword { domain: String, keyword: String },

    #[error("keyword '{keyword}' in domain '{domain}' has no expansion phrases")]
    EmptyPhrases { domain: String, keyword: String },

    #[error("keyword '{keyword}' in domain '{domain}' has a blank expansion phrase")]
    BlankPhrase { domain: String, keyword: String },

    #[error("keyword '{keyword}' in domain '{domain}' has a blank anti-pattern")]
    BlankAntiPattern { domain: String, keyword: String },

    #[error("keyword '{keyword}' in domain '{domain}' has weight {weight}; weights must be finite and positive")]
    InvalidWeight {
        domain: String,
        keyword: String,
        weight: f64,
    },
}

/// Result type alias for operations that may fail with TenderexError.
pub type Result<T> = std::result::Result<T, TenderexError>;

impl TenderexError {
    /// Create a new invalid argument error.
    pub fn invalid_argument<S: Into<String>>(msg: S) -> Self {
        TenderexError::InvalidArgument(msg.into())
    }

    /// Create a new generic error.
    pub fn other<S: Into<String>>(msg: S) -> Self {
        TenderexError::Other(msg.into())
    }

    /// Create a malformed-configuration error.
    pub fn malformed<S: Into<String>>(msg: S) -> Self {
        TenderexError::Config(ConfigError::Malformed(msg.into()))
    }

    /// Whether this error came from configuration validation.
    pub fn is_config(&self) -> bool {
        matches!(
            self,
            TenderexError::Config(_) | TenderexError::Json(_) | TenderexError::Yaml(_)
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_construction() {
        let error = TenderexError::invalid_argument("max must be positive");
        assert_eq!(error.to_string(), "Invalid argument: max must be positive");

        let error = TenderexError::malformed("expected a mapping");
        assert_eq!(
            error.to_string(),
            "Configuration error: configuration document is malformed: expected a mapping"
        );
    }

    #[test]
    fn test_config_error_names_location() {
        let error: TenderexError = ConfigError::DuplicateKeyword {
            domain: "cloud".to_string(),
            keyword: "api".to_string(),
        }
        .into();

        assert!(error.is_config());
        assert_eq!(
            error.to_string(),
            "Configuration error: keyword 'api' is defined more than once in domain 'cloud'"
        );
    }

    #[test]
    fn test_io_error_conversion() {
        let io_error = io::Error::new(io::ErrorKind::NotFound, "File not found");
        let error = TenderexError::from(io_error);

        match error {
            TenderexError::Io(_) => {} // Expected
            _ => panic!("Expected IO error variant"),
        }
        assert!(!TenderexError::other("x").is_config());
    }
}
