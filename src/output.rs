//! Colored terminal output helpers for the validation report.
//!
//! Color is enabled only when stdout is a real terminal; `NO_COLOR` always
//! wins and `FORCE_COLOR` overrides TTY detection (useful when piping CI
//! output to a log viewer that understands ANSI).

use std::io::IsTerminal;

use colored::Colorize;

/// Decide whether colored output should be used.
#[must_use]
pub fn colors_enabled() -> bool {
    if std::env::var_os("NO_COLOR").is_some() {
        return false;
    }
    if std::env::var_os("FORCE_COLOR").is_some() {
        return true;
    }
    if !std::io::stdout().is_terminal() {
        return false;
    }
    std::env::var("TERM").map_or(true, |term| term != "dumb")
}

/// Apply the color decision process-wide. Call once at startup.
pub fn init_colors() {
    colored::control::set_override(colors_enabled());
}

pub fn print_pass(message: &str) {
    println!("{} {message}", "[PASS]".green().bold());
}

pub fn print_fail(message: &str) {
    println!("{} {message}", "[FAIL]".red().bold());
}

pub fn print_warn(message: &str) {
    println!("{} {message}", "[WARN]".yellow().bold());
}

pub fn print_header(text: &str) {
    println!("{}", "=".repeat(60));
    println!("  {}", text.bold());
    println!("{}", "=".repeat(60));
}

pub fn print_summary(passed: usize, failed: usize, warned: usize) {
    println!("\n{}", "-".repeat(60));
    let line = format!("Summary: {passed} passed, {failed} failed, {warned} warning(s)");
    if failed == 0 {
        println!("{}", line.green());
    } else {
        println!("{}", line.red());
    }
}
