//! Naming-convention resolver.
//!
//! Maps a block to its target relative path under exactly one of three
//! conventions. The convention is fixed for a whole run; resolution never
//! falls through from one convention to another, so manuscripts stay
//! internally consistent. A block that resolves to nothing is nameless
//! and subject to the caller's nameless policy.

use std::sync::LazyLock;

use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::block::Block;

/// Where a block's target path is declared.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NamingConvention {
    /// Path is the tag on the opening delimiter line.
    OnFence,
    /// Path is extracted from the nearest non-empty plain-text line
    /// before the block.
    BeforeFence,
    /// Path is extracted from the first body line when that line is a
    /// comment; the line is then excluded from the content written to
    /// disk.
    AfterFence,
}

/// A successful resolution: the relative path and whether the first body
/// line carried the name and must be stripped before writing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedTarget {
    pub path: String,
    pub strip_first_line: bool,
}

/// Token that looks like a file path with an extension, optionally
/// preceded by drive/directory components. Segments do not admit
/// spaces, so surrounding prose never leaks into the extracted path.
static PATH_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?:[a-zA-Z]:)?(?:[\\/])?(?:[\w.-]+[\\/])*[\w.-]+\.\w+")
        .expect("invalid path pattern")
});

/// Comment tokens recognized when the name rides on the first body line.
const NAME_COMMENT_TOKENS: &[&str] = &["#", "//", ";"];

/// Resolves a block's target path, or `None` when the block is nameless
/// under the active convention.
pub fn resolve(
    block: &Block,
    preceding_line: Option<&str>,
    convention: NamingConvention,
) -> Option<ResolvedTarget> {
    match convention {
        NamingConvention::OnFence => resolve_on_fence(block),
        NamingConvention::BeforeFence => resolve_before_fence(preceding_line),
        NamingConvention::AfterFence => resolve_after_fence(block),
    }
}

/// The tag is a path only when it carries a separator or an extension;
/// a bare language name (`py`, `rust`) stays a tag.
fn resolve_on_fence(block: &Block) -> Option<ResolvedTarget> {
    let tag = block.tag.as_deref()?;
    if tag.contains('/') || tag.contains('\\') || looks_like_filename(tag) {
        return Some(ResolvedTarget {
            path: normalize(tag),
            strip_first_line: false,
        });
    }
    None
}

fn resolve_before_fence(preceding_line: Option<&str>) -> Option<ResolvedTarget> {
    let line = preceding_line?;
    let path = extract_path(line)?;
    Some(ResolvedTarget {
        path: normalize(&path),
        strip_first_line: false,
    })
}

fn resolve_after_fence(block: &Block) -> Option<ResolvedTarget> {
    let first = block.body.first()?.trim();
    let rest = NAME_COMMENT_TOKENS
        .iter()
        .find_map(|tok| first.strip_prefix(*tok))?;
    let path = extract_path(rest.trim())?;
    Some(ResolvedTarget {
        path: normalize(&path),
        strip_first_line: true,
    })
}

fn extract_path(text: &str) -> Option<String> {
    PATH_PATTERN.find(text).map(|m| m.as_str().to_string())
}

fn looks_like_filename(tag: &str) -> bool {
    PATH_PATTERN
        .find(tag)
        .is_some_and(|m| m.as_str() == tag.trim())
}

/// Light separator normalization; containment and `.` cleanup are the
/// filesystem layer's concern.
fn normalize(path: &str) -> String {
    path.trim().replace('\\', "/")
}
