//! Keyword expansion and domain classification.
//!
//! [`ExpansionEngine::expand`] normalizes a raw query, looks it up in the
//! current dictionary snapshot, lets the [`DomainResolver`] pick a domain
//! when several contain the keyword, and returns the winning entry's phrases
//! truncated to the requested cap.

pub mod engine;
pub mod match_query;
pub mod resolver;
pub mod result;

pub use engine::{DEFAULT_MAX_EXPANSIONS, ExpansionEngine, UNKNOWN_DOMAIN, clamp_max_expansions};
pub use match_query::build_match_expression;
pub use resolver::{DEFAULT_AMBIGUITY_CAP, DomainResolver, Resolution};
pub use result::ExpansionResult;
