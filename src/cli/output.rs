//! Output formatting for CLI commands.

use serde::{Deserialize, Serialize};

use crate::anti_pattern::MatchMode;
use crate::cli::args::{OutputFormat, TenderexArgs};
use crate::error::Result;
use crate::expansion::ExpansionResult;
use crate::synonym::KeywordMatch;

/// Result structure for keyword expansion.
#[derive(Debug, Serialize, Deserialize)]
pub struct ExpansionOutput {
    #[serde(flatten)]
    pub result: ExpansionResult,
    pub expansion_count: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub match_expression: Option<String>,
}

/// One candidate text checked against anti-patterns.
#[derive(Debug, Serialize, Deserialize)]
pub struct SuppressionVerdict {
    pub text: String,
    pub suppressed: bool,
    pub matched_pattern: Option<String>,
}

/// Result structure for anti-pattern checks.
#[derive(Debug, Serialize, Deserialize)]
pub struct SuppressionReport {
    pub keyword: String,
    pub domain: String,
    pub mode: MatchMode,
    pub anti_patterns: Vec<String>,
    pub verdicts: Vec<SuppressionVerdict>,
}

/// Result structure for match expressions.
#[derive(Debug, Serialize, Deserialize)]
pub struct MatchQueryOutput {
    pub query: String,
    pub domain: String,
    pub match_expression: Option<String>,
}

/// Result structure for keyword listings.
#[derive(Debug, Serialize, Deserialize)]
pub struct KeywordList {
    pub domain: Option<String>,
    pub count: usize,
    pub keywords: Vec<String>,
}

/// Result structure for keyword search.
#[derive(Debug, Serialize, Deserialize)]
pub struct KeywordSearchResults {
    pub query: String,
    pub count: usize,
    pub matches: Vec<KeywordMatch>,
}

/// Output a result in the specified format.
pub fn output_result<T: Serialize>(message: &str, result: &T, args: &TenderexArgs) -> Result<()> {
    match args.output_format {
        OutputFormat::Human => output_human(message, result, args),
        OutputFormat::Json => output_json(result, args),
        OutputFormat::Yaml => output_yaml(result),
    }
}

/// Output in human-readable format.
fn output_human<T: Serialize>(message: &str, result: &T, args: &TenderexArgs) -> Result<()> {
    if args.verbosity() > 1 {
        println!("{message}");
        println!();
    }

    let value = serde_json::to_value(result)?;
    for line in render_human(&value, 0) {
        println!("{line}");
    }
    Ok(())
}

/// Render a JSON value as indented `key: value` lines.
fn render_human(value: &serde_json::Value, indent: usize) -> Vec<String> {
    let spaces = "  ".repeat(indent);
    let mut lines = Vec::new();

    match value {
        serde_json::Value::Object(obj) => {
            for (key, val) in obj {
                if is_nested(val) {
                    lines.push(format!("{spaces}{key}:"));
                    lines.extend(render_human(val, indent + 1));
                } else {
                    lines.push(format!("{spaces}{key}: {}", format_value(val)));
                }
            }
        }
        serde_json::Value::Array(arr) if arr.iter().any(is_nested) => {
            for (i, item) in arr.iter().enumerate() {
                lines.push(format!("{spaces}[{}]", i + 1));
                lines.extend(render_human(item, indent + 1));
            }
        }
        _ => lines.push(format!("{spaces}{}", format_value(value))),
    }
    lines
}

fn is_nested(value: &serde_json::Value) -> bool {
    match value {
        serde_json::Value::Object(_) => true,
        serde_json::Value::Array(arr) => arr.iter().any(|v| v.is_object() || v.is_array()),
        _ => false,
    }
}

/// Output in JSON format.
fn output_json<T: Serialize>(result: &T, args: &TenderexArgs) -> Result<()> {
    let json = if args.pretty {
        serde_json::to_string_pretty(result)?
    } else {
        serde_json::to_string(result)?
    };

    println!("{json}");
    Ok(())
}

/// Output in YAML format.
fn output_yaml<T: Serialize>(result: &T) -> Result<()> {
    let yaml = serde_yaml::to_string(result)?;
    print!("{yaml}");
    Ok(())
}

/// Format a JSON value for display.
fn format_value(value: &serde_json::Value) -> String {
    match value {
        serde_json::Value::String(s) => s.clone(),
        serde_json::Value::Number(n) => n.to_string(),
        serde_json::Value::Bool(b) => b.to_string(),
        serde_json::Value::Array(arr) => {
            let formatted_values = arr.iter().map(format_value).collect::<Vec<_>>().join(", ");
            format!("[{formatted_values}]")
        }
        serde_json::Value::Object(_) => "[object]".to_string(),
        serde_json::Value::Null => "-".to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_format_value() {
        assert_eq!(format_value(&json!("lan")), "lan");
        assert_eq!(format_value(&json!(0.5)), "0.5");
        assert_eq!(format_value(&json!(["vlan", "ethernet"])), "[vlan, ethernet]");
        assert_eq!(format_value(&serde_json::Value::Null), "-");
    }

    #[test]
    fn test_render_human_nests() {
        let value = json!({
            "query": "lan",
            "matches": [{"keyword": "lan", "domain": "networking"}],
        });
        let lines = render_human(&value, 0);
        assert_eq!(
            lines,
            vec![
                "matches:",
                "  [1]",
                "    domain: networking",
                "    keyword: lan",
                "query: lan",
            ]
        );
    }

    #[test]
    fn test_expansion_output_keeps_field_names() {
        let output = ExpansionOutput {
            result: ExpansionResult::unknown("zzz", "zzz"),
            expansion_count: 0,
            match_expression: None,
        };
        let value = serde_json::to_value(&output).unwrap();
        assert_eq!(value["domain"], "unknown");
        assert_eq!(value["normalized_query"], "zzz");
        assert!(value.get("match_expression").is_none());
    }
}
