use std::fs;
use std::path::Path;
use std::sync::Arc;
use std::thread;

use tempfile::TempDir;

use tenderex::anti_pattern::{AntiPatternFilter, MatchMode, should_suppress};
use tenderex::error::{ConfigError, Result, TenderexError};
use tenderex::expansion::{ExpansionEngine, ExpansionResult};
use tenderex::synonym::{DictionarySource, QualityReport, StoreState, SynonymStore};

const NETWORKING: &str = r#"
version: "1.0"
domains:
  networking:
    priority: 9
    keywords:
      lan:
        phrases: [local area network, layer 2 switch, vlan, ethernet]
        anti_patterns: [land development, landline]
  cloud:
    priority: 10
    keywords:
      api: [application programming interface, rest api]
  government:
    priority: 3
    keywords:
      api: [application]
"#;

const MISSING_PHRASES: &str = r#"
domains:
  networking:
    keywords:
      lan:
        anti_patterns: [land development]
      wan: [wide area network]
"#;

fn write(dir: &Path, name: &str, content: &str) -> std::path::PathBuf {
    let path = dir.join(name);
    fs::write(&path, content).unwrap();
    path
}

fn engine_from(path: &Path) -> Result<ExpansionEngine> {
    let store = SynonymStore::open(DictionarySource::file(path))?;
    Ok(ExpansionEngine::new(Arc::new(store)))
}

#[test]
fn expand_returns_all_phrases_for_unambiguous_keyword() -> Result<()> {
    let dir = TempDir::new()?;
    let engine = engine_from(&write(dir.path(), "synonyms.yaml", NETWORKING))?;

    let result = engine.expand("LAN", 5);
    assert_eq!(
        result.phrases,
        vec!["local area network", "layer 2 switch", "vlan", "ethernet"]
    );
    assert_eq!(result.domain, "networking");
    assert_eq!(result.confidence, 1.0);
    Ok(())
}

#[test]
fn expand_truncates_in_dictionary_order() -> Result<()> {
    let dir = TempDir::new()?;
    let engine = engine_from(&write(dir.path(), "synonyms.yaml", NETWORKING))?;

    let result = engine.expand("lan", 2);
    assert_eq!(result.phrases, vec!["local area network", "layer 2 switch"]);
    Ok(())
}

#[test]
fn expand_unknown_keyword_degrades_gracefully() -> Result<()> {
    let dir = TempDir::new()?;
    let engine = engine_from(&write(dir.path(), "synonyms.yaml", NETWORKING))?;

    let result = engine.expand("zzznotaword", 5);
    assert!(result.phrases.is_empty());
    assert_eq!(result.domain, "unknown");
    assert_eq!(result.confidence, 0.0);
    assert_eq!(result.query, "zzznotaword");
    Ok(())
}

#[test]
fn expand_ambiguous_keyword_prefers_higher_priority() -> Result<()> {
    let dir = TempDir::new()?;
    let engine = engine_from(&write(dir.path(), "synonyms.yaml", NETWORKING))?;

    let result = engine.expand("api", 5);
    assert_eq!(result.domain, "cloud");
    assert!((result.confidence - 10.0 / 13.0).abs() < 1e-9);
    assert!(result.confidence > 0.0 && result.confidence <= 0.99);
    Ok(())
}

#[test]
fn failed_reload_keeps_serving_previous_snapshot() -> Result<()> {
    let dir = TempDir::new()?;
    let good = write(dir.path(), "synonyms.yaml", NETWORKING);
    let bad = write(dir.path(), "broken.yaml", MISSING_PHRASES);
    let engine = engine_from(&good)?;

    let err = engine
        .store()
        .reload(DictionarySource::file(&bad))
        .unwrap_err();
    assert!(err.is_config());
    assert!(matches!(
        err,
        TenderexError::Config(ConfigError::EmptyPhrases { .. })
    ));

    assert_eq!(engine.store().generation(), 0);
    assert_eq!(engine.store().state(), StoreState::Ready);
    let result = engine.expand("lan", 5);
    assert_eq!(result.domain, "networking");
    assert_eq!(result.phrases.len(), 4);
    Ok(())
}

#[test]
fn reload_from_rewritten_file_publishes_new_snapshot() -> Result<()> {
    let dir = TempDir::new()?;
    let path = write(dir.path(), "synonyms.yaml", NETWORKING);
    let engine = engine_from(&path)?;

    fs::write(
        &path,
        "domains:\n  networking:\n    keywords:\n      lan: [local area network]\n      waf: [web application firewall]\n",
    )?;
    let report = engine.store().reload_current()?;
    assert_eq!(report.previous_keywords, 2);
    assert_eq!(report.current_keywords, 2);
    assert_eq!(report.previous_domains, 3);
    assert_eq!(report.current_domains, 1);
    assert_eq!(report.generation, 1);

    assert_eq!(engine.expand("waf", 5).phrases, vec!["web application firewall"]);
    assert_eq!(engine.expand("api", 5), ExpansionResult::unknown("api", "api"));
    Ok(())
}

#[test]
fn json_dictionary_loads_like_yaml() -> Result<()> {
    let dir = TempDir::new()?;
    let json = r#"{
        "domains": {
            "security": {
                "priority": 9,
                "keywords": {
                    "waf": {"expansions": ["web application firewall"], "anti_patterns": ["waffle"]}
                }
            }
        }
    }"#;
    let engine = engine_from(&write(dir.path(), "synonyms.json", json))?;

    let result = engine.expand(" WAF ", 5);
    assert_eq!(result.domain, "security");
    assert_eq!(result.anti_patterns, vec!["waffle"]);
    Ok(())
}

#[test]
fn readers_see_whole_snapshots_during_reloads() -> Result<()> {
    let one = "domains:\n  a:\n    keywords:\n      lan: [one]\n";
    let two = "domains:\n  b:\n    keywords:\n      lan: [two]\n";
    let store = Arc::new(SynonymStore::open(DictionarySource::yaml(one))?);
    let engine = ExpansionEngine::new(store.clone());

    let readers: Vec<_> = (0..4)
        .map(|_| {
            let engine = engine.clone();
            thread::spawn(move || {
                for _ in 0..500 {
                    let result = engine.expand("lan", 5);
                    let consistent = (result.domain == "a" && result.phrases == ["one"])
                        || (result.domain == "b" && result.phrases == ["two"]);
                    assert!(consistent, "torn read: {result:?}");
                }
            })
        })
        .collect();

    for i in 0..50 {
        let next = if i % 2 == 0 { two } else { one };
        store.reload(DictionarySource::yaml(next))?;
    }
    for reader in readers {
        reader.join().unwrap();
    }
    assert_eq!(store.generation(), 50);
    Ok(())
}

#[test]
fn anti_patterns_filter_search_candidates() -> Result<()> {
    let dir = TempDir::new()?;
    let engine = engine_from(&write(dir.path(), "synonyms.yaml", NETWORKING))?;
    let result = engine.expand("lan", 5);

    assert!(should_suppress(
        "tender for land development project",
        &result.anti_patterns
    ));
    assert!(!should_suppress(
        "procurement of local area network switches",
        &result.anti_patterns
    ));

    let titles = vec![
        "Supply of LAN switches",
        "Landline rental for district office",
        "Land development of plot 7",
    ];
    let kept = result
        .filter(MatchMode::Substring)
        .retain_unsuppressed(titles, |t| *t);
    assert_eq!(kept, vec!["Supply of LAN switches"]);

    let phrase = AntiPatternFilter::phrase(&result.anti_patterns);
    assert!(phrase.should_suppress("LAND-DEVELOPMENT authority"));
    Ok(())
}

#[test]
fn match_expression_orders_phrases_for_fts() -> Result<()> {
    let dir = TempDir::new()?;
    let engine = engine_from(&write(dir.path(), "synonyms.yaml", NETWORKING))?;

    let expression = engine.expand("lan", 5).match_expression();
    assert_eq!(
        expression.as_deref(),
        Some(r#""local area network" OR "layer 2 switch" OR vlan OR ethernet"#)
    );
    Ok(())
}

#[test]
fn bundled_dictionary_is_valid() -> Result<()> {
    let path = Path::new(env!("CARGO_MANIFEST_DIR")).join("resources/synonyms.yaml");
    let engine = engine_from(&path)?;

    let lan = engine.expand("lan", 5);
    assert_eq!(lan.domain, "networking");
    assert!(lan.anti_patterns.iter().any(|p| p == "land development"));

    let api = engine.expand("api", 5);
    assert_eq!(api.domain, "cloud");
    assert!(api.confidence < 1.0);

    let report = QualityReport::review(&engine.store().snapshot());
    assert!(report.issues.is_empty(), "{:?}", report.issues);
    Ok(())
}
