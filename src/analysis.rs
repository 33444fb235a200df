//! Text analysis for keyword lookup and candidate filtering.
//!
//! - [`normalizer`] folds raw user input onto dictionary keys.
//! - [`phrase`] tokenizes candidate text for whole-phrase anti-pattern checks.

pub mod normalizer;
pub mod phrase;

pub use normalizer::normalize;
