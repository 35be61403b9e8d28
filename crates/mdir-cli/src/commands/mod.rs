//! Command implementations

mod assemble;
mod build;

pub use assemble::run_assemble;
pub use build::run_build;

use std::path::Path;

use colored::Colorize;

use mdir_core::{Config, RunReport};
use mdir_fs::NormalizedPath;

use crate::error::Result;

/// Load the config file, or fall back to defaults when none was given.
/// Any inconsistency here is fatal: a run never starts half-configured.
pub(crate) fn load_config(path: Option<&Path>) -> Result<Config> {
    match path {
        Some(path) => Ok(Config::load(&NormalizedPath::new(path))?),
        None => Ok(Config::default()),
    }
}

/// Print the post-run summary. Every skip carries its reason and every
/// backup/rename action is listed, so nothing destructive is silent.
pub(crate) fn print_report(report: &RunReport, json: bool) -> Result<()> {
    if json {
        println!("{}", serde_json::to_string_pretty(report)?);
        return Ok(());
    }

    if report.success() {
        println!(
            "{} {} file(s) processed, {} skipped",
            "OK".green().bold(),
            report.written.len(),
            report.skipped.len()
        );
    } else {
        println!(
            "{} {} file(s) processed, {} skipped, {} failed",
            "INCOMPLETE".red().bold(),
            report.written.len(),
            report.skipped.len(),
            report.failed.len()
        );
    }

    for written in &report.written {
        println!("   {} {}", "+".green(), written);
    }
    for action in &report.actions {
        println!("   {} {}", "*".cyan(), action);
    }
    for skip in &report.skipped {
        println!("   {} {} ({})", "-".yellow(), skip.target.cyan(), skip.reason);
    }
    for failure in &report.failed {
        println!("   {} {}: {}", "!".red(), failure.target.cyan(), failure.error);
    }

    Ok(())
}
