//! Command line argument parsing for the tenderex CLI using clap.

use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};
use serde::{Deserialize, Serialize};

use crate::anti_pattern::MatchMode;

/// tenderex - keyword expansion and domain classification for tender search
#[derive(Parser, Debug, Clone)]
#[command(name = "tenderex")]
#[command(about = "Keyword expansion and domain classification for tender search")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(long_about = None)]
pub struct TenderexArgs {
    /// Verbosity level (0=quiet, 1=normal, 2=verbose, 3=debug)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Quiet mode (overrides verbose)
    #[arg(short, long)]
    pub quiet: bool,

    /// Output format
    #[arg(short = 'f', long = "format", default_value = "human")]
    pub output_format: OutputFormat,

    /// Pretty-print JSON output
    #[arg(long)]
    pub pretty: bool,

    /// Synonym dictionary file (YAML or JSON), overrides the config file
    #[arg(short, long, env = "TENDEREX_DICTIONARY", value_name = "FILE")]
    pub dictionary: Option<PathBuf>,

    /// Engine configuration file (YAML or JSON)
    #[arg(short, long, env = "TENDEREX_CONFIG", value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Command,
}

impl TenderexArgs {
    /// Get the effective verbosity level
    pub fn verbosity(&self) -> u8 {
        if self.quiet {
            0
        } else {
            match self.verbose {
                0 => 1,
                n => n,
            }
        }
    }
}

/// Available CLI commands
#[derive(Subcommand, Debug, Clone)]
pub enum Command {
    /// Expand a keyword into search phrases
    Expand(ExpandArgs),

    /// Check candidate texts against a keyword's anti-patterns
    Suppress(SuppressArgs),

    /// Print the FTS5 MATCH expression for a keyword
    #[command(name = "match-query")]
    MatchQuery(MatchQueryArgs),

    /// List dictionary keywords
    Keywords(KeywordsArgs),

    /// Search keywords and phrases
    Search(SearchArgs),

    /// Show dictionary statistics
    Stats,

    /// Review dictionary quality
    Validate(ValidateArgs),
}

/// Arguments for expanding a keyword
#[derive(Parser, Debug, Clone)]
pub struct ExpandArgs {
    /// Keyword to expand
    #[arg(value_name = "KEYWORD")]
    pub keyword: String,

    /// Maximum number of phrases (values below 1 count as 1)
    #[arg(short = 'n', long, allow_hyphen_values = true)]
    pub max_expansions: Option<i64>,

    /// Also print the FTS5 MATCH expression
    #[arg(long)]
    pub fts: bool,
}

/// Arguments for anti-pattern checks
#[derive(Parser, Debug, Clone)]
pub struct SuppressArgs {
    /// Keyword whose anti-patterns apply
    #[arg(value_name = "KEYWORD")]
    pub keyword: String,

    /// Candidate texts, e.g. tender titles
    #[arg(value_name = "TEXT", required = true)]
    pub texts: Vec<String>,

    /// Matching mode (defaults to the configured one)
    #[arg(short, long)]
    pub mode: Option<MatchModeArg>,
}

/// Arguments for building a match expression
#[derive(Parser, Debug, Clone)]
pub struct MatchQueryArgs {
    /// Keyword to expand
    #[arg(value_name = "KEYWORD")]
    pub keyword: String,

    /// Maximum number of phrases (values below 1 count as 1)
    #[arg(short = 'n', long, allow_hyphen_values = true)]
    pub max_expansions: Option<i64>,
}

/// Arguments for listing keywords
#[derive(Parser, Debug, Clone)]
pub struct KeywordsArgs {
    /// Only list keywords of this domain
    #[arg(long)]
    pub domain: Option<String>,
}

/// Arguments for keyword search
#[derive(Parser, Debug, Clone)]
pub struct SearchArgs {
    /// Text to look for in keywords and phrases
    #[arg(value_name = "QUERY")]
    pub query: String,

    /// Maximum number of results to return
    #[arg(short, long, default_value = "20")]
    pub limit: usize,
}

/// Arguments for the quality review
#[derive(Parser, Debug, Clone)]
pub struct ValidateArgs {
    /// Exit with an error if any issue is found
    #[arg(long)]
    pub strict: bool,
}

/// Anti-pattern matching modes available in CLI
#[derive(ValueEnum, Debug, Clone, Copy, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MatchModeArg {
    /// Case-insensitive substring
    Substring,
    /// Whole-word phrase
    Phrase,
}

impl From<MatchModeArg> for MatchMode {
    fn from(mode: MatchModeArg) -> Self {
        match mode {
            MatchModeArg::Substring => MatchMode::Substring,
            MatchModeArg::Phrase => MatchMode::Phrase,
        }
    }
}

/// Output formats
#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// Human-readable output
    Human,
    /// JSON output
    Json,
    /// YAML output
    Yaml,
}
