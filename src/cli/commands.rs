//! Command implementations for the tenderex CLI.

use std::sync::Arc;

use log::{info, warn};

use crate::anti_pattern::MatchMode;
use crate::cli::args::*;
use crate::cli::output::*;
use crate::config::EngineConfig;
use crate::error::{Result, TenderexError};
use crate::expansion::{ExpansionEngine, clamp_max_expansions};
use crate::synonym::SynonymStore;

/// Execute a CLI command.
pub fn execute_command(args: TenderexArgs) -> Result<()> {
    let config = resolve_config(&args)?;
    let engine = open_engine(&config)?;

    match &args.command {
        Command::Expand(expand_args) => expand_keyword(expand_args, &engine, &args),
        Command::Suppress(suppress_args) => {
            check_suppression(suppress_args, &engine, config.match_mode, &args)
        }
        Command::MatchQuery(match_args) => match_query(match_args, &engine, &args),
        Command::Keywords(keywords_args) => list_keywords(keywords_args, &engine, &args),
        Command::Search(search_args) => search_keywords(search_args, &engine, &args),
        Command::Stats => show_stats(&engine, &args),
        Command::Validate(validate_args) => validate_dictionary(validate_args, &engine, &args),
    }
}

/// Config file (if any) with command line overrides applied.
pub fn resolve_config(args: &TenderexArgs) -> Result<EngineConfig> {
    let mut config = match &args.config {
        Some(path) => {
            info!("Loading config from {}", path.display());
            EngineConfig::from_file(path)?
        }
        None => EngineConfig::default(),
    };
    if let Some(dictionary) = &args.dictionary {
        config.dictionary_path = dictionary.clone();
    }
    Ok(config)
}

fn open_engine(config: &EngineConfig) -> Result<ExpansionEngine> {
    let store = SynonymStore::open(config.dictionary_source())?;
    Ok(ExpansionEngine::with_config(Arc::new(store), config))
}

fn cap(engine: &ExpansionEngine, requested: Option<i64>) -> usize {
    requested
        .map(clamp_max_expansions)
        .unwrap_or_else(|| engine.default_max_expansions())
}

/// Expand a keyword.
fn expand_keyword(args: &ExpandArgs, engine: &ExpansionEngine, cli_args: &TenderexArgs) -> Result<()> {
    let result = engine.expand(&args.keyword, cap(engine, args.max_expansions));
    let match_expression = if args.fts {
        result.match_expression()
    } else {
        None
    };

    output_result(
        "Keyword expansion",
        &ExpansionOutput {
            expansion_count: result.expansion_count(),
            result,
            match_expression,
        },
        cli_args,
    )
}

/// Check candidate texts against the keyword's anti-patterns.
fn check_suppression(
    args: &SuppressArgs,
    engine: &ExpansionEngine,
    default_mode: MatchMode,
    cli_args: &TenderexArgs,
) -> Result<()> {
    let mode = args.mode.map(MatchMode::from).unwrap_or(default_mode);
    let result = engine.expand_default(&args.keyword);
    if !result.is_match() {
        warn!("Keyword '{}' is not in the dictionary, nothing to suppress", args.keyword);
    }

    let filter = result.filter(mode);
    let verdicts = args
        .texts
        .iter()
        .map(|text| {
            let matched_pattern = filter.matched_pattern(text).map(str::to_string);
            SuppressionVerdict {
                text: text.clone(),
                suppressed: matched_pattern.is_some(),
                matched_pattern,
            }
        })
        .collect();

    output_result(
        "Anti-pattern check",
        &SuppressionReport {
            keyword: result.normalized_query,
            domain: result.domain,
            mode,
            anti_patterns: result.anti_patterns,
            verdicts,
        },
        cli_args,
    )
}

/// Print the FTS5 match expression for a keyword.
fn match_query(args: &MatchQueryArgs, engine: &ExpansionEngine, cli_args: &TenderexArgs) -> Result<()> {
    let result = engine.expand(&args.keyword, cap(engine, args.max_expansions));

    output_result(
        "FTS5 match expression",
        &MatchQueryOutput {
            match_expression: result.match_expression(),
            query: result.query,
            domain: result.domain,
        },
        cli_args,
    )
}

/// List keywords, optionally for a single domain.
fn list_keywords(args: &KeywordsArgs, engine: &ExpansionEngine, cli_args: &TenderexArgs) -> Result<()> {
    let dictionary = engine.store().snapshot();
    let keywords: Vec<String> = match &args.domain {
        Some(domain) => {
            if dictionary.domain(domain).is_none() {
                warn!("Unknown domain '{domain}'");
            }
            dictionary.domain_keywords(domain)
        }
        None => dictionary.keywords(),
    }
    .into_iter()
    .map(str::to_string)
    .collect();

    output_result(
        "Keywords",
        &KeywordList {
            domain: args.domain.clone(),
            count: keywords.len(),
            keywords,
        },
        cli_args,
    )
}

/// Search keywords and phrases.
fn search_keywords(args: &SearchArgs, engine: &ExpansionEngine, cli_args: &TenderexArgs) -> Result<()> {
    let matches = engine.store().snapshot().search_keywords(&args.query, args.limit);

    output_result(
        "Keyword search",
        &KeywordSearchResults {
            query: args.query.clone(),
            count: matches.len(),
            matches,
        },
        cli_args,
    )
}

/// Show dictionary statistics.
fn show_stats(engine: &ExpansionEngine, cli_args: &TenderexArgs) -> Result<()> {
    let stats = engine.store().snapshot().stats();
    output_result("Dictionary statistics", &stats, cli_args)
}

/// Review dictionary quality.
fn validate_dictionary(
    args: &ValidateArgs,
    engine: &ExpansionEngine,
    cli_args: &TenderexArgs,
) -> Result<()> {
    let report = engine.store().snapshot().quality_report();
    output_result("Dictionary quality", &report, cli_args)?;

    if args.strict && !report.issues.is_empty() {
        return Err(TenderexError::other(format!(
            "dictionary has {} quality issues",
            report.issues.len()
        )));
    }
    Ok(())
}
