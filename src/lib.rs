//! novalint - Metadata validation for Nova detection rules.
//!
//! Validates the `meta:` block of every `.nov` rule file under a directory,
//! enforcing required fields, rejecting unknown ones, and checking field
//! formats (UUID v4, severity, category taxonomy, date). Designed to run as a
//! CI gate: the process exits non-zero if any rule fails validation or any
//! rule file cannot be parsed.

pub mod cli;
pub mod error;
pub mod metadata;
pub mod output;
pub mod parser;
pub mod report;
pub mod taxonomy;
pub mod validators;

pub use error::{NovalintError, Result};
