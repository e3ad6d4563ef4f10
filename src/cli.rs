//! Command-line interface definition.

use std::path::PathBuf;

use clap::Parser;

/// Validate metadata of Nova rule files.
#[derive(Parser, Debug)]
#[command(name = "novalint", version, about)]
pub struct Cli {
    /// Directory containing .nov rule files
    #[arg(long, default_value = ".")]
    pub rules_dir: PathBuf,

    /// Path to the category reference document
    ///
    /// Defaults to CATEGORIES.md in the rules directory, falling back to its
    /// parent. A missing document disables the membership check; category
    /// values are then checked by format only.
    #[arg(long)]
    pub categories: Option<PathBuf>,

    /// Treat warnings as errors
    #[arg(long)]
    pub strict: bool,

    /// Show per-rule success messages
    #[arg(short, long)]
    pub verbose: bool,

    /// Print a machine-readable JSON summary instead of the report
    #[arg(long)]
    pub robot: bool,
}

impl Cli {
    /// Resolve the category reference document path.
    #[must_use]
    pub fn categories_path(&self) -> PathBuf {
        if let Some(path) = &self.categories {
            return path.clone();
        }
        let local = self.rules_dir.join("CATEGORIES.md");
        if local.is_file() {
            return local;
        }
        self.rules_dir
            .parent()
            .map_or(local, |parent| parent.join("CATEGORIES.md"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let cli = Cli::parse_from(["novalint"]);
        assert_eq!(cli.rules_dir, PathBuf::from("."));
        assert!(cli.categories.is_none());
        assert!(!cli.strict);
        assert!(!cli.verbose);
        assert!(!cli.robot);
    }

    #[test]
    fn test_all_flags_parse() {
        let cli = Cli::parse_from([
            "novalint",
            "--rules-dir",
            "rules",
            "--categories",
            "docs/CATEGORIES.md",
            "--strict",
            "-v",
            "--robot",
        ]);
        assert_eq!(cli.rules_dir, PathBuf::from("rules"));
        assert_eq!(cli.categories, Some(PathBuf::from("docs/CATEGORIES.md")));
        assert!(cli.strict);
        assert!(cli.verbose);
        assert!(cli.robot);
    }

    #[test]
    fn test_explicit_categories_path_wins() {
        let cli = Cli::parse_from(["novalint", "--categories", "/tmp/tax.md"]);
        assert_eq!(cli.categories_path(), PathBuf::from("/tmp/tax.md"));
    }

    #[test]
    fn test_categories_path_prefers_rules_dir() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("CATEGORIES.md"), "`web/xss`").unwrap();
        let cli = Cli::parse_from([
            "novalint",
            "--rules-dir",
            dir.path().to_str().unwrap(),
        ]);
        assert_eq!(cli.categories_path(), dir.path().join("CATEGORIES.md"));
    }
}
