//! Filesystem abstraction for mdir
//!
//! Provides normalized path handling with root containment, safe I/O
//! operations, the filter engine, and the filtered directory walk used
//! by assembly.

pub mod error;
pub mod filter;
pub mod io;
pub mod path;
pub mod walk;

pub use error::{Error, Result};
pub use filter::{FilterConfig, FilterKind, admits};
pub use path::NormalizedPath;
pub use walk::{Rejection, WalkOutcome, collect_files, is_binary};
