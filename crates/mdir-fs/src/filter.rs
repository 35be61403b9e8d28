//! Inclusion/exclusion rules for files, directories, and extensions.
//!
//! Evaluation order per kind: system entries first, then the include
//! list (which, when non-empty, is authoritative and the exclude list is
//! not consulted), then the exclude list, and finally the always-active
//! partial-name layer.

use serde::{Deserialize, Serialize};

/// What kind of candidate is being tested.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FilterKind {
    File,
    Directory,
    Extension,
}

/// Immutable filter rule snapshot, taken once per run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FilterConfig {
    pub extensions_include: Vec<String>,
    pub extensions_exclude: Vec<String>,
    pub dirs_include: Vec<String>,
    pub dirs_exclude: Vec<String>,
    pub files_include: Vec<String>,
    pub files_exclude: Vec<String>,
    pub partial_include: Vec<String>,
    pub partial_exclude: Vec<String>,
    /// When true, an excluded directory excludes its whole subtree;
    /// otherwise each level is tested on its literal name alone.
    pub include_nested: bool,
    /// Admit entries whose names begin with `.` or `_`.
    pub include_system: bool,
}

impl Default for FilterConfig {
    fn default() -> Self {
        Self {
            extensions_include: Vec::new(),
            extensions_exclude: Vec::new(),
            dirs_include: Vec::new(),
            dirs_exclude: Vec::new(),
            files_include: Vec::new(),
            files_exclude: Vec::new(),
            partial_include: Vec::new(),
            partial_exclude: Vec::new(),
            include_nested: true,
            include_system: false,
        }
    }
}

/// System entries are dotfiles and underscore-prefixed names.
fn is_system(name: &str) -> bool {
    name.starts_with('.') || name.starts_with('_')
}

/// Decides whether a candidate passes the configured rules.
///
/// For `File` and `Directory` the candidate is the entry name; for
/// `Extension` it is the extension without the dot.
pub fn admits(candidate: &str, kind: FilterKind, config: &FilterConfig) -> bool {
    if is_system(candidate) && !config.include_system {
        tracing::debug!(candidate, "rejected: system entry");
        return false;
    }

    let (include, exclude) = match kind {
        FilterKind::File => (&config.files_include, &config.files_exclude),
        FilterKind::Directory => (&config.dirs_include, &config.dirs_exclude),
        FilterKind::Extension => (&config.extensions_include, &config.extensions_exclude),
    };

    let matches = |list: &[String]| match kind {
        // Extensions compare case-insensitively; names are literal.
        FilterKind::Extension => list.iter().any(|e| e.eq_ignore_ascii_case(candidate)),
        _ => list.iter().any(|e| e == candidate),
    };

    let admitted = if !include.is_empty() {
        matches(include)
    } else {
        !matches(exclude)
    };
    if !admitted {
        tracing::debug!(candidate, ?kind, "rejected: include/exclude lists");
        return false;
    }

    // Partial-name layer applies to names, not extensions.
    if kind != FilterKind::Extension && !passes_partials(candidate, config) {
        tracing::debug!(candidate, ?kind, "rejected: partial-name rules");
        return false;
    }

    true
}

fn passes_partials(name: &str, config: &FilterConfig) -> bool {
    let lower = name.to_ascii_lowercase();
    if !config.partial_include.is_empty()
        && !config
            .partial_include
            .iter()
            .any(|p| lower.contains(&p.to_ascii_lowercase()))
    {
        return false;
    }
    !config
        .partial_exclude
        .iter()
        .any(|p| lower.contains(&p.to_ascii_lowercase()))
}
