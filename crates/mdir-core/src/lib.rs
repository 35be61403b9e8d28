//! Build and assemble orchestration for mdir
//!
//! Ties the pure fence model (`mdir-fence`) and the filesystem layer
//! (`mdir-fs`) into the two run directions:
//!
//! - **build**: manuscript text -> scanned blocks -> resolved names ->
//!   conflict-checked filesystem writes
//! - **assemble**: filtered directory walk -> re-indented file contents ->
//!   manuscript text
//!
//! Per-block and per-file problems accumulate in a [`RunReport`]; only an
//! invalid configuration or an unreadable manuscript/root stops a run.

pub mod assembler;
pub mod builder;
pub mod config;
pub mod conflict;
pub mod error;
pub mod inject;
pub mod report;
pub mod rules;

pub use assembler::assemble;
pub use builder::build;
pub use config::Config;
pub use conflict::{ConflictPolicy, WriteAction};
pub use error::{Error, Result};
pub use report::{Failure, RunReport, Skip};
pub use rules::RuleSet;
