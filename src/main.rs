//! novalint - Validate metadata of Nova rule files.

use std::process::ExitCode;

use anyhow::Context;
use clap::Parser;
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

use novalint::cli::Cli;
use novalint::output;
use novalint::report::{self, RunOptions, RunSummary};
use novalint::taxonomy::Taxonomy;

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_tracing();
    output::init_colors();

    match run(&cli) {
        Ok(summary) if summary.success() => ExitCode::SUCCESS,
        Ok(_) => ExitCode::FAILURE,
        Err(e) => {
            if cli.robot {
                let error_json = serde_json::json!({
                    "error": true,
                    "message": e.to_string(),
                });
                println!("{}", serde_json::to_string(&error_json).unwrap_or_default());
            } else {
                eprintln!("Error: {e:#}");
            }
            ExitCode::FAILURE
        }
    }
}

fn run(cli: &Cli) -> anyhow::Result<RunSummary> {
    let taxonomy = Taxonomy::load(cli.categories_path());

    let options = RunOptions {
        strict: cli.strict,
        verbose: cli.verbose,
    };
    let summary = report::run_validation(&cli.rules_dir, &taxonomy, options)
        .with_context(|| format!("validating rules under {}", cli.rules_dir.display()))?;

    if cli.robot {
        let summary_json = serde_json::json!({
            "passed": summary.passed,
            "failed": summary.failed,
            "warnings": summary.warned,
            "success": summary.success(),
        });
        println!(
            "{}",
            serde_json::to_string(&summary_json).unwrap_or_default()
        );
    } else {
        report::print_report(&summary);
    }

    Ok(summary)
}

fn init_tracing() {
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn,novalint=info"));

    tracing_subscriber::registry()
        .with(env_filter)
        .with(fmt::layer().with_writer(std::io::stderr))
        .init();
}
