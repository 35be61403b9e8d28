//! Filtered directory traversal with a stable ordering.

use std::fs;

use crate::filter::{FilterConfig, FilterKind, admits};
use crate::{Error, NormalizedPath, Result};

/// Result of a filtered walk: admitted files plus every rejection, so
/// filter skips stay traceable in the run report.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct WalkOutcome {
    /// Relative paths of admitted files, sorted lexicographically.
    pub admitted: Vec<String>,
    /// Relative paths rejected by a filter, with the reason.
    pub rejected: Vec<Rejection>,
}

/// A single filter rejection.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Rejection {
    pub path: String,
    pub reason: String,
}

/// Collects all admitted files under `root`, sorted lexicographically
/// for deterministic assembly output.
///
/// Directory admission follows the nesting rule: with `include_nested`
/// an excluded directory prunes its whole subtree; without it the walk
/// still descends and each level is judged on its own name, only the
/// excluded directory's immediate files being skipped. Binary files are
/// never admitted.
pub fn collect_files(root: &NormalizedPath, config: &FilterConfig) -> Result<WalkOutcome> {
    let mut outcome = WalkOutcome::default();
    walk_dir(root, "", config, true, &mut outcome)?;
    outcome.admitted.sort();
    Ok(outcome)
}

fn walk_dir(
    dir: &NormalizedPath,
    rel_prefix: &str,
    config: &FilterConfig,
    collect_here: bool,
    out: &mut WalkOutcome,
) -> Result<()> {
    let native = dir.to_native();
    let mut entries: Vec<_> = fs::read_dir(&native)
        .map_err(|e| Error::io(&native, e))?
        .collect::<std::io::Result<_>>()
        .map_err(|e| Error::io(&native, e))?;
    entries.sort_by_key(|e| e.file_name());

    for entry in entries {
        let name = entry.file_name().to_string_lossy().to_string();
        let child = dir.join(&name);
        let rel = if rel_prefix.is_empty() {
            name.clone()
        } else {
            format!("{rel_prefix}/{name}")
        };

        let file_type = entry.file_type().map_err(|e| Error::io(entry.path(), e))?;

        if file_type.is_dir() {
            let admitted = admits(&name, FilterKind::Directory, config);
            if admitted {
                walk_dir(&child, &rel, config, true, out)?;
            } else if !config.include_nested {
                out.reject(&rel, "directory excluded, descending per config");
                walk_dir(&child, &rel, config, false, out)?;
            } else {
                out.reject(&rel, "directory excluded");
            }
            continue;
        }

        if !collect_here || !file_type.is_file() {
            continue;
        }
        if !admits(&name, FilterKind::File, config) {
            out.reject(&rel, "file name excluded");
            continue;
        }
        let ext = child.extension().unwrap_or_default();
        if !admits(&ext, FilterKind::Extension, config) {
            out.reject(&rel, "extension excluded");
            continue;
        }
        if is_binary(&child)? {
            out.reject(&rel, "binary file");
            continue;
        }
        out.admitted.push(rel);
    }
    Ok(())
}

impl WalkOutcome {
    fn reject(&mut self, path: &str, reason: &str) {
        tracing::debug!(path, reason, "filter rejected");
        self.rejected.push(Rejection {
            path: path.to_string(),
            reason: reason.to_string(),
        });
    }
}

/// Sniffs the first kilobyte for bytes that do not occur in text files.
/// A NUL byte is an immediate verdict.
pub fn is_binary(path: &NormalizedPath) -> Result<bool> {
    use std::io::Read;

    let native = path.to_native();
    let mut file = fs::File::open(&native).map_err(|e| Error::io(&native, e))?;
    let mut chunk = [0u8; 1024];
    let read = file.read(&mut chunk).map_err(|e| Error::io(&native, e))?;

    Ok(chunk[..read].iter().any(|&b| !is_text_byte(b)))
}

fn is_text_byte(b: u8) -> bool {
    matches!(b, 7..=10 | 12 | 13 | 27 | 0x20..=0x7e | 0x80..)
}
