//! Run aggregation and report rendering.
//!
//! Drives the rule loader over the rules directory, validates every parsed
//! rule, records every parse failure, and classifies the whole run. Message
//! ordering follows the sorted discovery order, so two runs over unchanged
//! input produce byte-identical reports.

use std::path::Path;

use serde::Serialize;
use tracing::info;

use crate::error::{NovalintError, Result};
use crate::metadata::{RuleMetadata, RuleStatus, validate_metadata};
use crate::output;
use crate::parser;
use crate::taxonomy::Taxonomy;

/// Policy switches for a validation run.
#[derive(Debug, Clone, Copy, Default)]
pub struct RunOptions {
    /// Promote warnings to errors before classification.
    pub strict: bool,
    /// Record passing rules in the report.
    pub verbose: bool,
}

/// Aggregated outcome of a validation run.
#[derive(Debug, Clone, Default, Serialize)]
pub struct RunSummary {
    /// Rules that passed (including passed-with-warnings).
    pub passed: usize,
    /// Rule failures plus parse failures.
    pub failed: usize,
    /// Rules that passed with warnings.
    pub warned: usize,
    /// Successfully parsed rules.
    pub total_rules: usize,
    /// Files the loader could not parse.
    pub parse_error_count: usize,
    /// Failure lines, one per error.
    pub failures: Vec<String>,
    /// Warning lines, one per warning.
    pub warnings: Vec<String>,
    /// Pass lines; populated only when `verbose` is set.
    pub passes: Vec<String>,
}

impl RunSummary {
    /// Overall success: no rule failed and nothing failed to parse.
    #[must_use]
    pub fn success(&self) -> bool {
        self.failed == 0
    }

    /// Nothing to validate at all: a configuration error, not a vacuous pass.
    #[must_use]
    pub fn nothing_found(&self) -> bool {
        self.total_rules == 0 && self.parse_error_count == 0
    }
}

/// Validate every rule under `rules_dir` against the taxonomy.
pub fn run_validation(
    rules_dir: &Path,
    taxonomy: &Taxonomy,
    options: RunOptions,
) -> Result<RunSummary> {
    if !rules_dir.is_dir() {
        return Err(NovalintError::RulesDirNotFound(
            rules_dir.display().to_string(),
        ));
    }

    let (rules, parse_failures) = parser::load_all(rules_dir);
    info!(
        rules = rules.len(),
        parse_errors = parse_failures.len(),
        "loaded rule files"
    );

    let mut summary = RunSummary {
        total_rules: rules.len(),
        parse_error_count: parse_failures.len(),
        ..RunSummary::default()
    };

    if summary.nothing_found() {
        summary.failed = 1;
        summary.failures.push(format!(
            "No .nov rule files found in {}",
            rules_dir.display()
        ));
        return Ok(summary);
    }

    for (path, message) in &parse_failures {
        summary.failed += 1;
        summary.failures.push(format!(
            "{}: Parse error (skipped) - {message}",
            relative(path, rules_dir)
        ));
    }

    for (path, rule) in &rules {
        let location = relative(path, rules_dir);
        let meta = RuleMetadata::from_map(&rule.meta);
        let mut report = validate_metadata(&meta, taxonomy);
        if options.strict {
            report.apply_strict();
        }

        match report.status() {
            RuleStatus::Failed => {
                summary.failed += 1;
                for error in &report.errors {
                    summary
                        .failures
                        .push(format!("{location} -> {}: {error}", rule.name));
                }
                for warning in &report.warnings {
                    summary
                        .warnings
                        .push(format!("{location} -> {}: {warning}", rule.name));
                }
            }
            RuleStatus::PassedWithWarnings => {
                summary.warned += 1;
                summary.passed += 1;
                if options.verbose {
                    summary
                        .passes
                        .push(format!("{location} -> {}: metadata OK", rule.name));
                }
                for warning in &report.warnings {
                    summary
                        .warnings
                        .push(format!("{location} -> {}: {warning}", rule.name));
                }
            }
            RuleStatus::Passed => {
                summary.passed += 1;
                if options.verbose {
                    summary
                        .passes
                        .push(format!("{location} -> {}: metadata OK", rule.name));
                }
            }
        }
    }

    Ok(summary)
}

/// Render the summary as the grouped terminal report.
pub fn print_report(summary: &RunSummary) {
    if summary.nothing_found() {
        for message in &summary.failures {
            output::print_fail(message);
        }
        return;
    }

    output::print_header(&format!(
        "Metadata Validation: {} rule(s)",
        summary.total_rules
    ));

    print_section("FAILURES", &summary.failures, output::print_fail);
    print_section("WARNINGS", &summary.warnings, output::print_warn);
    print_section("PASSED", &summary.passes, output::print_pass);

    output::print_summary(summary.passed, summary.failed, summary.warned);
}

fn print_section(title: &str, messages: &[String], print_line: fn(&str)) {
    if messages.is_empty() {
        return;
    }
    println!("\n{}", "-".repeat(60));
    println!("  {title:^56}");
    println!("{}", "-".repeat(60));
    for message in messages {
        print_line(message);
    }
}

fn relative(path: &Path, root: &Path) -> String {
    path.strip_prefix(root).unwrap_or(path).display().to_string()
}
