//! Per-rule metadata validation.
//!
//! Takes the raw metadata mapping parsed out of a rule's `meta:` block,
//! projects it into a typed [`RuleMetadata`] record, and runs the full set of
//! checks: unknown fields, required-field presence, and field formats. All
//! findings are accumulated; validation never stops at the first problem and
//! never mutates its input.

use std::collections::BTreeMap;

use serde::Serialize;

use crate::taxonomy::Taxonomy;
use crate::validators::{
    VALID_SEVERITIES, is_uuid_v4, is_valid_category, is_valid_date, is_valid_severity,
};

/// Fields every rule must carry, in canonical reporting order.
pub const REQUIRED_FIELDS: [&str; 7] = [
    "description",
    "author",
    "severity",
    "uuid",
    "date",
    "version",
    "category",
];

/// Fields a rule may carry. Disjoint from [`REQUIRED_FIELDS`]; any key outside
/// the union of the two sets is an unknown-field error.
pub const OPTIONAL_FIELDS: [&str; 3] = ["reference", "hash", "modified"];

/// Typed view of a rule's metadata mapping.
///
/// One optional slot per known field, plus the unknown keys captured in sorted
/// order so reports stay deterministic.
#[derive(Debug, Clone, Default)]
pub struct RuleMetadata {
    pub description: Option<String>,
    pub author: Option<String>,
    pub severity: Option<String>,
    pub uuid: Option<String>,
    pub date: Option<String>,
    pub version: Option<String>,
    pub category: Option<String>,
    pub reference: Option<String>,
    pub hash: Option<String>,
    pub modified: Option<String>,
    /// Keys that are neither required nor optional fields, sorted.
    pub unknown: Vec<String>,
}

impl RuleMetadata {
    /// Project a raw metadata mapping into the typed record.
    #[must_use]
    pub fn from_map(map: &BTreeMap<String, String>) -> Self {
        let mut meta = Self::default();
        for (key, value) in map {
            let slot = match key.as_str() {
                "description" => &mut meta.description,
                "author" => &mut meta.author,
                "severity" => &mut meta.severity,
                "uuid" => &mut meta.uuid,
                "date" => &mut meta.date,
                "version" => &mut meta.version,
                "category" => &mut meta.category,
                "reference" => &mut meta.reference,
                "hash" => &mut meta.hash,
                "modified" => &mut meta.modified,
                _ => {
                    meta.unknown.push(key.clone());
                    continue;
                }
            };
            *slot = Some(value.clone());
        }
        meta
    }

    fn field(&self, name: &str) -> Option<&str> {
        match name {
            "description" => self.description.as_deref(),
            "author" => self.author.as_deref(),
            "severity" => self.severity.as_deref(),
            "uuid" => self.uuid.as_deref(),
            "date" => self.date.as_deref(),
            "version" => self.version.as_deref(),
            "category" => self.category.as_deref(),
            "reference" => self.reference.as_deref(),
            "hash" => self.hash.as_deref(),
            "modified" => self.modified.as_deref(),
            _ => None,
        }
    }

    /// The raw value of a field, or `None` when the field is absent or its
    /// trimmed value is empty.
    #[must_use]
    pub fn present(&self, name: &str) -> Option<&str> {
        self.field(name).filter(|v| !v.trim().is_empty())
    }
}

/// Classification of a single rule's validation outcome.
#[derive(Debug, Clone, Copy, Eq, PartialEq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum RuleStatus {
    Passed,
    PassedWithWarnings,
    Failed,
}

/// Ordered findings for one rule.
///
/// No check currently emits a warning, so `warnings` is always empty today;
/// the slot exists because strict mode and classification are defined over
/// both sequences. Current behavior, not a guarantee.
#[derive(Debug, Clone, Default, Eq, PartialEq)]
pub struct MetadataReport {
    pub errors: Vec<String>,
    pub warnings: Vec<String>,
}

impl MetadataReport {
    /// Strict mode: every warning becomes an error before classification.
    pub fn apply_strict(&mut self) {
        self.errors.append(&mut self.warnings);
    }

    #[must_use]
    pub fn status(&self) -> RuleStatus {
        if !self.errors.is_empty() {
            RuleStatus::Failed
        } else if !self.warnings.is_empty() {
            RuleStatus::PassedWithWarnings
        } else {
            RuleStatus::Passed
        }
    }
}

/// Validate one rule's metadata against the taxonomy.
///
/// Findings accumulate in a fixed order: unknown fields, missing required
/// fields, then format checks for `uuid`, `severity`, `category`, and `date`.
/// A format check is skipped when its field is absent or blank, because the
/// missing-field error already covers that root cause.
#[must_use]
pub fn validate_metadata(meta: &RuleMetadata, taxonomy: &Taxonomy) -> MetadataReport {
    let mut report = MetadataReport::default();

    for field in &meta.unknown {
        report
            .errors
            .push(format!("Unknown metadata field '{field}'"));
    }

    for field in REQUIRED_FIELDS {
        if meta.present(field).is_none() {
            report
                .errors
                .push(format!("Missing required field '{field}'"));
        }
    }

    if let Some(value) = meta.present("uuid") {
        if !is_uuid_v4(value) {
            report
                .errors
                .push(format!("Invalid UUID v4 format: '{value}'"));
        }
    }

    if let Some(value) = meta.present("severity") {
        if !is_valid_severity(value) {
            report.errors.push(format!(
                "Invalid severity '{value}'. Must be one of: {}",
                VALID_SEVERITIES.join(", ")
            ));
        }
    }

    if let Some(value) = meta.present("category") {
        if !is_valid_category(value, taxonomy) {
            report.errors.push(format!(
                "Invalid category '{value}'. Must match format 'category/subcategory' \
                 and exist in the category reference document."
            ));
        }
    }

    if let Some(value) = meta.present("date") {
        if !is_valid_date(value) {
            report
                .errors
                .push(format!("Invalid date format: '{value}'. Use YYYY-MM-DD."));
        }
    }

    report
}

#[cfg(test)]
mod tests {
    use super::*;

    fn meta(pairs: &[(&str, &str)]) -> RuleMetadata {
        let map: BTreeMap<String, String> = pairs
            .iter()
            .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
            .collect();
        RuleMetadata::from_map(&map)
    }

    fn valid_pairs() -> Vec<(&'static str, &'static str)> {
        vec![
            ("description", "Detects reflected XSS payloads"),
            ("author", "analyst"),
            ("severity", "high"),
            ("uuid", "f81d4fae-7dec-41d0-a765-00a0c91e6bf6"),
            ("date", "2024-05-01"),
            ("version", "1.0"),
            ("category", "web/xss"),
        ]
    }

    #[test]
    fn test_fields_are_disjoint_and_complete() {
        assert_eq!(REQUIRED_FIELDS.len(), 7);
        assert_eq!(OPTIONAL_FIELDS.len(), 3);
        for field in OPTIONAL_FIELDS {
            assert!(!REQUIRED_FIELDS.contains(&field));
        }
    }

    #[test]
    fn test_valid_metadata_passes() {
        let report = validate_metadata(&meta(&valid_pairs()), &Taxonomy::default());
        assert!(report.errors.is_empty());
        assert!(report.warnings.is_empty());
        assert_eq!(report.status(), RuleStatus::Passed);
    }

    #[test]
    fn test_optional_fields_accepted() {
        let mut pairs = valid_pairs();
        pairs.push(("reference", "https://example.com/advisory"));
        pairs.push(("hash", "abc123"));
        pairs.push(("modified", "2024-06-01"));
        let report = validate_metadata(&meta(&pairs), &Taxonomy::default());
        assert_eq!(report.status(), RuleStatus::Passed);
    }

    #[test]
    fn test_missing_uuid_and_unknown_key_no_duplicate_errors() {
        let mut pairs = valid_pairs();
        pairs.retain(|(k, _)| *k != "uuid");
        pairs.push(("owner", "someone"));
        let report = validate_metadata(&meta(&pairs), &Taxonomy::default());
        assert_eq!(
            report.errors,
            vec![
                "Unknown metadata field 'owner'".to_string(),
                "Missing required field 'uuid'".to_string(),
            ]
        );
    }

    #[test]
    fn test_blank_required_field_counts_as_missing() {
        let mut pairs = valid_pairs();
        pairs.retain(|(k, _)| *k != "date");
        pairs.push(("date", "   "));
        let report = validate_metadata(&meta(&pairs), &Taxonomy::default());
        assert_eq!(
            report.errors,
            vec!["Missing required field 'date'".to_string()]
        );
    }

    #[test]
    fn test_all_format_errors_accumulate() {
        let report = validate_metadata(
            &meta(&[
                ("description", "d"),
                ("author", "a"),
                ("severity", "urgent"),
                ("uuid", "nope"),
                ("date", "2024-5-1"),
                ("version", "1.0"),
                ("category", "web"),
            ]),
            &Taxonomy::default(),
        );
        assert_eq!(report.errors.len(), 4);
        assert!(report.errors[0].starts_with("Invalid UUID v4 format"));
        assert!(report.errors[1].starts_with("Invalid severity 'urgent'"));
        assert!(report.errors[1].contains("low, medium, high, critical"));
        assert!(report.errors[2].starts_with("Invalid category 'web'"));
        assert!(report.errors[3].starts_with("Invalid date format"));
    }

    #[test]
    fn test_category_membership_enforced_when_taxonomy_nonempty() {
        let taxonomy: Taxonomy = ["web/xss".to_string()].into_iter().collect();
        let mut pairs = valid_pairs();
        pairs.retain(|(k, _)| *k != "category");
        pairs.push(("category", "web/sqli"));
        let report = validate_metadata(&meta(&pairs), &taxonomy);
        assert_eq!(report.errors.len(), 1);
        assert!(report.errors[0].contains("web/sqli"));
    }

    #[test]
    fn test_unknown_keys_reported_in_sorted_order() {
        let mut pairs = valid_pairs();
        pairs.push(("zzz", "1"));
        pairs.push(("aaa", "2"));
        let report = validate_metadata(&meta(&pairs), &Taxonomy::default());
        assert_eq!(
            report.errors,
            vec![
                "Unknown metadata field 'aaa'".to_string(),
                "Unknown metadata field 'zzz'".to_string(),
            ]
        );
    }

    #[test]
    fn test_empty_metadata_reports_every_required_field() {
        let report = validate_metadata(&meta(&[]), &Taxonomy::default());
        assert_eq!(report.errors.len(), REQUIRED_FIELDS.len());
        for (error, field) in report.errors.iter().zip(REQUIRED_FIELDS) {
            assert_eq!(error, &format!("Missing required field '{field}'"));
        }
    }

    #[test]
    fn test_strict_promotes_warnings() {
        let mut report = MetadataReport {
            errors: vec![],
            warnings: vec!["soft finding".to_string()],
        };
        assert_eq!(report.status(), RuleStatus::PassedWithWarnings);
        report.apply_strict();
        assert!(report.warnings.is_empty());
        assert_eq!(report.errors, vec!["soft finding".to_string()]);
        assert_eq!(report.status(), RuleStatus::Failed);
    }

    #[test]
    fn test_validation_is_idempotent() {
        let meta = meta(&[("severity", "urgent"), ("owner", "x")]);
        let taxonomy = Taxonomy::default();
        let first = validate_metadata(&meta, &taxonomy);
        let second = validate_metadata(&meta, &taxonomy);
        assert_eq!(first, second);
    }
}
