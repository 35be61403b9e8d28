//! Conflict resolution for build targets that already hold content.
//!
//! Destructive overwrite is never silent: whichever policy runs, the
//! prior content remains recoverable afterwards, as a commented span, a
//! sibling file, or a backup copy. The policy is a closed enum switched
//! once per run.

use serde::{Deserialize, Serialize};

use mdir_fence::comment_token;
use mdir_fs::{NormalizedPath, io};

use crate::Result;
use crate::inject;

/// Write strategy for an occupied target path.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ConflictPolicy {
    /// New content first, prior content below it, commented out.
    PrependAndComment,
    /// Write the new content to `base(N).ext`; original untouched.
    AppendNumberToFilename,
    /// Write the new content to `path.oN`; original untouched.
    AppendNumberedExtension,
    /// Move the original into a sibling `backup/` directory, then write
    /// the new content at the vacated path.
    MoveToBackupDir,
}

/// What the resolver did, for the run report.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WriteAction {
    /// Merged content written at the original path.
    Merged { path: NormalizedPath },
    /// New content landed at an alternative sibling path.
    Renamed { path: NormalizedPath },
    /// Original relocated, new content at the original path.
    BackedUp {
        path: NormalizedPath,
        backup: NormalizedPath,
    },
    /// Injection found an unambiguous span and merged in place.
    Injected { path: NormalizedPath },
}

impl WriteAction {
    /// The path holding the new content.
    pub fn written_path(&self) -> &NormalizedPath {
        match self {
            WriteAction::Merged { path }
            | WriteAction::Renamed { path }
            | WriteAction::BackedUp { path, .. }
            | WriteAction::Injected { path } => path,
        }
    }
}

/// Resolves a write against an occupied target. Only called when
/// `target` already holds content.
pub fn resolve(
    target: &NormalizedPath,
    new_content: &str,
    existing: &str,
    policy: ConflictPolicy,
    attempt_injection: bool,
) -> Result<WriteAction> {
    let token = comment_token(&target.extension().unwrap_or_default());

    if attempt_injection {
        match inject::merge(existing, new_content, token) {
            Some(merged) => {
                io::write_text(target, &merged)?;
                return Ok(WriteAction::Injected {
                    path: target.clone(),
                });
            }
            None => {
                tracing::debug!(target = %target, "no unambiguous injection span, using policy");
            }
        }
    }

    match policy {
        ConflictPolicy::PrependAndComment => {
            let merged = format!(
                "{}\n\n{}",
                new_content.trim_end_matches('\n'),
                comment_out(existing, token)
            );
            io::write_text(target, &merged)?;
            Ok(WriteAction::Merged {
                path: target.clone(),
            })
        }
        ConflictPolicy::AppendNumberToFilename => {
            let path = numbered_filename(target);
            io::write_text(&path, new_content)?;
            Ok(WriteAction::Renamed { path })
        }
        ConflictPolicy::AppendNumberedExtension => {
            let path = numbered_extension(target);
            io::write_text(&path, new_content)?;
            Ok(WriteAction::Renamed { path })
        }
        ConflictPolicy::MoveToBackupDir => {
            let backup = backup_destination(target);
            io::move_file(target, &backup)?;
            io::write_text(target, new_content)?;
            Ok(WriteAction::BackedUp {
                path: target.clone(),
                backup,
            })
        }
    }
}

/// Prefixes every non-empty line with the line-comment token.
pub fn comment_out(content: &str, token: &str) -> String {
    content
        .lines()
        .map(|line| {
            if line.trim().is_empty() {
                line.to_string()
            } else {
                format!("{token} {line}")
            }
        })
        .collect::<Vec<_>>()
        .join("\n")
}

/// Smallest N >= 1 such that `base(N).ext` does not exist.
fn numbered_filename(path: &NormalizedPath) -> NormalizedPath {
    let (stem, ext) = path.split_extension();
    let dir = path.parent();
    let mut n = 1;
    loop {
        let name = match &ext {
            Some(ext) => format!("{stem}({n}).{ext}"),
            None => format!("{stem}({n})"),
        };
        let candidate = match &dir {
            Some(dir) => dir.join(&name),
            None => NormalizedPath::new(&name),
        };
        if !candidate.exists() {
            return candidate;
        }
        n += 1;
    }
}

/// Smallest N >= 1 such that `path.oN` does not exist.
fn numbered_extension(path: &NormalizedPath) -> NormalizedPath {
    let mut n = 1;
    loop {
        let candidate = NormalizedPath::new(format!("{}.o{}", path.as_str(), n));
        if !candidate.exists() {
            return candidate;
        }
        n += 1;
    }
}

/// Free slot for the displaced file inside the sibling `backup/`
/// directory, numbering on collision.
fn backup_destination(path: &NormalizedPath) -> NormalizedPath {
    let name = path.file_name().unwrap_or("file").to_string();
    let backup_dir = match path.parent() {
        Some(parent) => parent.join("backup"),
        None => NormalizedPath::new("backup"),
    };
    let plain = backup_dir.join(&name);
    if !plain.exists() {
        return plain;
    }
    numbered_filename(&plain)
}
