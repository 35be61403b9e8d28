//! Build command: manuscript -> directory tree

use std::path::Path;

use colored::Colorize;

use mdir_core::RunReport;
use mdir_fs::{NormalizedPath, io};

use crate::error::Result;

use super::{load_config, print_report};

/// Run the build command.
///
/// Only an unreadable manuscript or an invalid configuration aborts;
/// everything per-block ends up in the report.
pub fn run_build(
    manuscript: &Path,
    root: &Path,
    config_path: Option<&Path>,
    json: bool,
) -> Result<RunReport> {
    let config = load_config(config_path)?;
    let manuscript_path = NormalizedPath::new(manuscript);
    let text = io::read_text(&manuscript_path)?;

    if !json {
        println!(
            "{} Building {} into {}",
            "=>".blue().bold(),
            manuscript_path.as_str().cyan(),
            root.display().to_string().cyan()
        );
    }

    let report = mdir_core::build(&text, &NormalizedPath::new(root), &config)?;
    print_report(&report, json)?;
    Ok(report)
}
