//! Error types for mdir-core

use std::path::PathBuf;

/// Result type for mdir-core operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur in mdir-core operations.
///
/// Only configuration problems and the inability to read the manuscript
/// or the root are run-fatal; everything per-block or per-file is
/// accumulated into the run report instead.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// A run never starts with an inconsistent configuration.
    #[error("Invalid configuration: {message}")]
    ConfigInvalid { message: String },

    #[error("Failed to parse config at {path}: {message}")]
    ConfigParse { path: PathBuf, message: String },

    /// Filesystem error from mdir-fs
    #[error(transparent)]
    Fs(#[from] mdir_fs::Error),
}
