//! Nova rule file discovery and parsing.
//!
//! Only the pieces the metadata validator needs are parsed: the rule name from
//! the `rule <name>` declaration and the key/value pairs of the `meta:`
//! section. Rule logic bodies (`keywords:`, `condition:`, and friends) are
//! skipped entirely. A file that cannot be read or parsed becomes a parse
//! failure for that file alone and never aborts the run.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use tracing::warn;
use walkdir::WalkDir;

/// A successfully parsed rule: its declared name and raw metadata mapping.
#[derive(Debug, Clone)]
pub struct NovaRule {
    pub name: String,
    pub meta: BTreeMap<String, String>,
}

/// A rule file the loader could not turn into a [`NovaRule`].
pub type ParseFailure = (PathBuf, String);

/// Recursively collect `.nov` files under `dir`, sorted by path so report
/// ordering is deterministic.
#[must_use]
pub fn discover_rule_files(dir: &Path) -> Vec<PathBuf> {
    let mut files = Vec::new();
    for entry in WalkDir::new(dir).follow_links(false) {
        match entry {
            Ok(entry)
                if entry.file_type().is_file()
                    && entry.path().extension().is_some_and(|ext| ext == "nov") =>
            {
                files.push(entry.into_path());
            }
            Ok(_) => {}
            Err(err) => warn!(error = %err, "skipping unreadable directory entry"),
        }
    }
    files.sort();
    files
}

/// Parse rule name and `meta:` pairs out of Nova rule source.
///
/// The meta section runs from the `meta:` header to the next section header
/// or the closing brace. Values may be double-quoted; quotes are stripped.
/// Blank lines and `//` comments are ignored. A rule without a meta section
/// parses fine with an empty mapping; the validator then reports every
/// required field as missing.
pub fn parse_rule_source(source: &str) -> Result<NovaRule, String> {
    let mut name: Option<String> = None;
    let mut meta = BTreeMap::new();
    let mut in_meta = false;

    for (idx, raw) in source.lines().enumerate() {
        let line = raw.trim();
        if line.is_empty() || line.starts_with("//") {
            continue;
        }

        if name.is_none() {
            if let Some(rest) = line.strip_prefix("rule ") {
                let rule_name = rest.trim_end_matches('{').trim();
                if rule_name.is_empty() {
                    return Err(format!("missing rule name at line {}", idx + 1));
                }
                name = Some(rule_name.to_string());
            }
            continue;
        }

        if is_section_header(line) {
            in_meta = line == "meta:";
            continue;
        }

        if in_meta && line != "{" && line != "}" {
            let Some((key, value)) = line.split_once('=') else {
                return Err(format!("malformed meta entry at line {}", idx + 1));
            };
            meta.insert(key.trim().to_string(), unquote(value.trim()).to_string());
        }
    }

    name.map(|name| NovaRule { name, meta })
        .ok_or_else(|| "no rule declaration found".to_string())
}

/// Load every discovered rule file, pairing successes with parse failures.
#[must_use]
pub fn load_all(dir: &Path) -> (Vec<(PathBuf, NovaRule)>, Vec<ParseFailure>) {
    let mut rules = Vec::new();
    let mut failures = Vec::new();

    for path in discover_rule_files(dir) {
        match std::fs::read_to_string(&path) {
            Ok(source) => match parse_rule_source(&source) {
                Ok(rule) => rules.push((path, rule)),
                Err(message) => failures.push((path, message)),
            },
            Err(err) => failures.push((path, err.to_string())),
        }
    }

    (rules, failures)
}

fn is_section_header(line: &str) -> bool {
    line.strip_suffix(':')
        .is_some_and(|head| !head.is_empty() && head.chars().all(|c| c.is_ascii_lowercase() || c == '_'))
}

fn unquote(value: &str) -> &str {
    value
        .strip_prefix('"')
        .and_then(|v| v.strip_suffix('"'))
        .unwrap_or(value)
}
