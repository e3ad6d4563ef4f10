//! Category taxonomy loaded from a markdown reference document.
//!
//! The reference document (conventionally `CATEGORIES.md`) lists the canonical
//! `category/subcategory` identifiers as inline code spans. Everything else in
//! the document is ignored. The taxonomy is built once per run and passed by
//! reference wherever category membership is checked.

use std::collections::BTreeSet;
use std::path::Path;
use std::sync::LazyLock;

use regex::Regex;
use tracing::debug;

/// Inline code span whose content matches the category grammar.
static CODE_SPAN_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"`([a-z][a-z0-9_ ]*(/[a-z][a-z0-9_ ]*)+)`").expect("valid regex")
});

/// Immutable set of canonical category identifiers, stored lower-cased.
///
/// An empty taxonomy means "no membership constraint": category values are
/// then checked against the grammar only.
#[derive(Debug, Clone, Default)]
pub struct Taxonomy {
    categories: BTreeSet<String>,
}

impl Taxonomy {
    /// Load the taxonomy from a markdown document.
    ///
    /// A missing or unreadable document yields an empty taxonomy; this loader
    /// never fails the run by itself.
    #[must_use]
    pub fn load(path: impl AsRef<Path>) -> Self {
        let path = path.as_ref();
        match std::fs::read_to_string(path) {
            Ok(content) => {
                let taxonomy = Self::parse(&content);
                debug!(
                    path = %path.display(),
                    categories = taxonomy.len(),
                    "loaded category taxonomy"
                );
                taxonomy
            }
            Err(err) => {
                debug!(
                    path = %path.display(),
                    error = %err,
                    "no category reference document; categories checked by format only"
                );
                Self::default()
            }
        }
    }

    /// Extract category identifiers from markdown text, line by line.
    /// Duplicates collapse; order is irrelevant.
    #[must_use]
    pub fn parse(content: &str) -> Self {
        let mut categories = BTreeSet::new();
        for line in content.lines() {
            for caps in CODE_SPAN_PATTERN.captures_iter(line) {
                categories.insert(caps[1].to_string());
            }
        }
        Self { categories }
    }

    /// Case-insensitive membership test.
    #[must_use]
    pub fn contains(&self, category: &str) -> bool {
        self.categories.contains(&category.to_lowercase())
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.categories.is_empty()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.categories.len()
    }
}

impl FromIterator<String> for Taxonomy {
    fn from_iter<I: IntoIterator<Item = String>>(iter: I) -> Self {
        Self {
            categories: iter.into_iter().map(|c| c.to_lowercase()).collect(),
        }
    }
}
