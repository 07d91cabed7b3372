//! Terminal styling utilities for consistent CLI output

use crate::model::{RiskLevel, Severity};
use colored::Colorize;

/// Print an error message to stderr
pub fn error(msg: &str) {
    eprintln!("{} {}", "error:".red().bold(), msg);
}

/// Print a warning message to stderr
pub fn warning(msg: &str) {
    eprintln!("{} {}", "warning:".yellow().bold(), msg);
}

/// Print a success message to stdout
pub fn success(msg: &str) {
    println!("{} {}", "✓".green().bold(), msg);
}

/// Print a hint message to stderr (dimmed)
pub fn hint(msg: &str) {
    eprintln!("{} {}", "hint:".dimmed(), msg.dimmed());
}

/// Format a path for display (bright white)
pub fn path(p: &std::path::Path) -> String {
    p.display().to_string().bright_white().to_string()
}

/// Format a label-value pair for metrics display
pub fn metric(label: &str, value: impl std::fmt::Display) -> String {
    format!("  {}: {}", label.dimmed(), value.to_string().cyan())
}

/// Format a section header (for summaries, etc.)
pub fn section(title: &str) {
    println!("\n{}", title.bold());
}

/// Format a severity tag with its conventional color
pub fn severity(sev: Severity) -> String {
    let tag = format!("[{}]", sev);
    match sev {
        Severity::Critical | Severity::High => tag.red().bold().to_string(),
        Severity::Medium => tag.yellow().to_string(),
        Severity::Low | Severity::Info => tag.dimmed().to_string(),
    }
}

/// Format a risk level with its conventional color
pub fn risk(level: RiskLevel) -> String {
    let tag = level.to_string();
    match level {
        RiskLevel::Critical | RiskLevel::High => tag.red().bold().to_string(),
        RiskLevel::Medium => tag.yellow().to_string(),
        RiskLevel::Low => tag.green().to_string(),
    }
}
