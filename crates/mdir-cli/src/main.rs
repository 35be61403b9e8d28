//! mdir CLI
//!
//! Two commands: `build` expands a manuscript into a directory tree,
//! `assemble` collapses a directory tree back into a manuscript.

mod cli;
mod commands;
mod error;

use clap::Parser;
use colored::Colorize;
use tracing::Level;
use tracing_subscriber::FmtSubscriber;

use cli::{Cli, Commands};
use error::Result;

fn main() {
    match run() {
        Ok(success) => {
            if !success {
                std::process::exit(1);
            }
        }
        Err(e) => {
            eprintln!("{}: {}", "error".red().bold(), e);
            std::process::exit(1);
        }
    }
}

fn run() -> Result<bool> {
    let cli = Cli::parse();

    if cli.verbose {
        let subscriber = FmtSubscriber::builder()
            .with_max_level(Level::DEBUG)
            .with_target(true)
            .finish();
        tracing::subscriber::set_global_default(subscriber)
            .expect("Failed to set tracing subscriber");
        tracing::debug!("Verbose mode enabled");
    }

    let report = match cli.command {
        Commands::Build {
            manuscript,
            root,
            config,
            json,
        } => commands::run_build(&manuscript, &root, config.as_deref(), json)?,
        Commands::Assemble {
            root,
            manuscript,
            config,
            json,
        } => commands::run_assemble(&root, &manuscript, config.as_deref(), json)?,
    };

    Ok(report.success())
}
