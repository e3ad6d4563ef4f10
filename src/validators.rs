//! Field-level validators for rule metadata.
//!
//! Each validator is a pure predicate over a raw string value. Validators
//! never trim or normalize their input beyond what the check itself requires;
//! presence/emptiness handling is the metadata validator's job.

use std::sync::LazyLock;

use regex::Regex;
use uuid::Uuid;

use crate::taxonomy::Taxonomy;

/// Accepted values for the `severity` field (compared case-insensitively).
pub const VALID_SEVERITIES: [&str; 4] = ["low", "medium", "high", "critical"];

/// Grammar for a `category/subcategory` identifier: each segment starts with
/// a lowercase letter and continues with lowercase letters, digits,
/// underscores, or spaces; at least two `/`-separated segments.
static CATEGORY_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[a-z][a-z0-9_ ]*(/[a-z][a-z0-9_ ]*)+$").expect("valid regex"));

static DATE_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\d{4}-\d{2}-\d{2}$").expect("valid regex"));

/// Check that a string is a syntactically valid UUID whose version nibble is 4.
///
/// Any parse failure or a non-v4 version (v1, v3, v5, nil) returns `false`.
#[must_use]
pub fn is_uuid_v4(value: &str) -> bool {
    Uuid::parse_str(value).is_ok_and(|u| u.get_version_num() == 4)
}

/// Check that a string is one of the accepted severity values, ignoring case.
#[must_use]
pub fn is_valid_severity(value: &str) -> bool {
    VALID_SEVERITIES
        .iter()
        .any(|s| value.eq_ignore_ascii_case(s))
}

/// Check a category value against the `category/subcategory` grammar and,
/// when the taxonomy is non-empty, against taxonomy membership.
///
/// The value is lower-cased before both checks. An empty taxonomy means no
/// membership constraint: the format check alone decides.
#[must_use]
pub fn is_valid_category(value: &str, taxonomy: &Taxonomy) -> bool {
    let lowered = value.to_lowercase();
    if !CATEGORY_PATTERN.is_match(&lowered) {
        return false;
    }
    taxonomy.is_empty() || taxonomy.contains(&lowered)
}

/// Check that a string matches the `YYYY-MM-DD` shape.
///
/// This is a format check only: calendar validity is not verified, so
/// `2023-02-30` is accepted. Known limitation, kept deliberately.
#[must_use]
pub fn is_valid_date(value: &str) -> bool {
    DATE_PATTERN.is_match(value)
}
