//! CLI argument parsing using clap derive

use std::path::PathBuf;

use clap::{Parser, Subcommand};

/// mdir - Expand a manuscript into files, or collapse files into a manuscript
#[derive(Parser, Debug)]
#[command(name = "mdir")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// The command to run
    #[command(subcommand)]
    pub command: Commands,
}

/// Available commands
#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum Commands {
    /// Expand a manuscript's fenced blocks into files under a root
    ///
    /// Examples:
    ///   mdir build notes.md ./out
    ///   mdir build notes.md ./out --config mdir.toml
    Build {
        /// Manuscript file to read
        manuscript: PathBuf,

        /// Directory to create files under
        root: PathBuf,

        /// Configuration file (TOML); defaults apply when omitted
        #[arg(short, long)]
        config: Option<PathBuf>,

        /// Output the run report as JSON for scripting
        #[arg(long)]
        json: bool,
    },

    /// Collapse a directory tree into a single manuscript
    ///
    /// Examples:
    ///   mdir assemble ./src notes.md
    ///   mdir assemble . notes.md --config mdir.toml
    Assemble {
        /// Directory to read files from
        root: PathBuf,

        /// Manuscript file to write
        manuscript: PathBuf,

        /// Configuration file (TOML); defaults apply when omitted
        #[arg(short, long)]
        config: Option<PathBuf>,

        /// Output the run report as JSON for scripting
        #[arg(long)]
        json: bool,
    },
}
