//! Manuscript fence model for mdir
//!
//! Provides the pure, filesystem-free half of the engine: scanning
//! manuscript text into a segment sequence, the indentation algebra used
//! when blocks move between the manuscript and standalone files, and the
//! naming-convention resolver that maps a block to its target path.

pub mod block;
pub mod indent;
pub mod lang;
pub mod naming;
pub mod scanner;

pub use block::{Block, INDENT_WIDTH, Segment};
pub use indent::{shift_left, shift_right};
pub use lang::{comment_token, ext_for_language, language_for_ext};
pub use naming::{NamingConvention, ResolvedTarget, resolve};
pub use scanner::{blocks, scan};
