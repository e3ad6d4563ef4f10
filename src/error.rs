//! Error types for novalint.

use thiserror::Error;

/// Result type alias using [`NovalintError`].
pub type Result<T> = std::result::Result<T, NovalintError>;

/// Top-level error type.
///
/// Validation findings are never errors: they are collected per rule and
/// reported. This type covers only conditions that prevent a run from
/// producing a report at all.
#[derive(Debug, Error)]
pub enum NovalintError {
    /// I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// The rules directory does not exist or is not a directory
    #[error("rules directory not found: {0}")]
    RulesDirNotFound(String),
}
