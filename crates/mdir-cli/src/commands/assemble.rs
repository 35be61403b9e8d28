//! Assemble command: directory tree -> manuscript

use std::path::Path;

use colored::Colorize;

use mdir_core::RunReport;
use mdir_fs::{NormalizedPath, io};

use crate::error::{CliError, Result};

use super::{load_config, print_report};

/// Run the assemble command.
///
/// The manuscript being written is excluded from the walk, so a
/// manuscript living inside the root never folds into itself.
pub fn run_assemble(
    root: &Path,
    manuscript: &Path,
    config_path: Option<&Path>,
    json: bool,
) -> Result<RunReport> {
    let config = load_config(config_path)?;

    let root = std::fs::canonicalize(root)
        .map_err(|_| CliError::user(format!("cannot read root directory: {}", root.display())))?;
    let root = NormalizedPath::new(&root);

    // The manuscript only needs canonicalizing when it already exists;
    // a fresh output file cannot be inside the walk anyway.
    let exclude = std::fs::canonicalize(manuscript).ok().map(NormalizedPath::new);

    if !json {
        println!(
            "{} Assembling {} into {}",
            "=>".blue().bold(),
            root.as_str().cyan(),
            manuscript.display().to_string().cyan()
        );
    }

    let (text, report) = mdir_core::assemble(&root, &config, exclude.as_ref())?;
    io::write_text(&NormalizedPath::new(manuscript), &text)?;
    print_report(&report, json)?;
    Ok(report)
}
