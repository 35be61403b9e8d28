//! Materializes a manuscript into a directory tree.
//!
//! Depth-0 blocks become files; their bodies are shifted one indent unit
//! left so nested fences read naturally inside the written file. Every
//! skip and failure is recorded and the run continues; only an invalid
//! configuration stops a build before it starts.

use mdir_fence::{self as fence, Segment, ext_for_language, shift_left};
use mdir_fs::{NormalizedPath, io};

use crate::config::Config;
use crate::conflict::{self, WriteAction};
use crate::report::RunReport;
use crate::{Error, Result};

/// Builds the manuscript's depth-0 blocks into files under `root`.
pub fn build(manuscript: &str, root: &NormalizedPath, config: &Config) -> Result<RunReport> {
    let rules = config.rule_set()?;

    std::fs::create_dir_all(root.to_native())
        .map_err(|e| Error::Fs(mdir_fs::Error::io(root.to_native(), e)))?;

    let mut report = RunReport::default();
    let mut preceding: Option<String> = None;

    for segment in fence::scan(manuscript) {
        match segment {
            Segment::Text(lines) => {
                preceding = lines
                    .iter()
                    .rev()
                    .find(|l| !l.trim().is_empty())
                    .map(|l| l.to_string());
            }
            Segment::Block(block) => {
                let preceding_line = preceding.take();
                if block.depth != 0 {
                    report.skip(
                        block.tag.as_deref().unwrap_or("(untagged)"),
                        "indented fence outside any parent block",
                    );
                    continue;
                }
                build_block(&block, preceding_line.as_deref(), root, config, &rules, &mut report);
            }
        }
    }

    Ok(report)
}

fn build_block(
    block: &fence::Block,
    preceding_line: Option<&str>,
    root: &NormalizedPath,
    config: &Config,
    rules: &crate::rules::RuleSet,
    report: &mut RunReport,
) {
    let label = block.tag.clone().unwrap_or_else(|| "(untagged)".to_string());

    if let Some(reason) = rules.content_reason(block) {
        report.skip(&label, reason);
        return;
    }

    let resolved = fence::resolve(block, preceding_line, config.file_naming_convention);
    let (rel_path, strip_first_line) = match resolved {
        Some(target) => (target.path, target.strip_first_line),
        None if rules.nameless => {
            report.skip(&label, "nameless");
            return;
        }
        None => (synthesize_name(block, root), false),
    };

    if rules.rejects_extensionless(&rel_path) {
        report.skip(&rel_path, "no file extension");
        return;
    }

    let target = match root.join_contained(&rel_path) {
        Ok(target) => target,
        Err(e) => {
            report.fail(&rel_path, e);
            return;
        }
    };

    if rules.conflicts && target.exists() {
        report.skip(&rel_path, "target already exists");
        return;
    }
    if rules.new && !target.exists() {
        report.skip(&rel_path, "target does not exist yet");
        return;
    }

    let body: &[String] = if strip_first_line {
        &block.body[1..]
    } else {
        &block.body
    };
    let content = render_body(body);

    let result = if target.exists() {
        write_conflicted(&target, &rel_path, &content, config, report)
    } else {
        io::write_text(&target, &content)
            .map(|_| rel_path.clone())
            .map_err(Error::from)
    };

    match result {
        Ok(written) => {
            tracing::debug!(path = %written, "wrote block");
            report.written.push(written);
        }
        Err(e) => report.fail(&rel_path, e),
    }
}

fn write_conflicted(
    target: &NormalizedPath,
    rel_path: &str,
    content: &str,
    config: &Config,
    report: &mut RunReport,
) -> Result<String> {
    let existing = io::read_text(target)?;
    let action = conflict::resolve(
        target,
        content,
        &existing,
        config.handle_file_conflicts,
        config.attempt_injection,
    )?;

    match &action {
        WriteAction::Merged { .. } => {
            report.action(format!("{rel_path}: prior content commented below new content"));
        }
        WriteAction::Renamed { path } => {
            report.action(format!(
                "{rel_path}: occupied, wrote {} instead",
                path.file_name().unwrap_or("?")
            ));
        }
        WriteAction::BackedUp { backup, .. } => {
            report.action(format!("{rel_path}: prior content moved to {}", backup.as_str()));
        }
        WriteAction::Injected { .. } => {
            report.action(format!("{rel_path}: injected, displaced span commented in place"));
        }
    }

    Ok(describe_written(action, rel_path))
}

fn describe_written(action: WriteAction, rel_path: &str) -> String {
    match action {
        WriteAction::Renamed { path } => {
            // Report the sibling actually holding the new content.
            match (rel_path.rsplit_once('/'), path.file_name()) {
                (Some((dir, _)), Some(name)) => format!("{dir}/{name}"),
                (None, Some(name)) => name.to_string(),
                _ => rel_path.to_string(),
            }
        }
        _ => rel_path.to_string(),
    }
}

/// Body lines joined for writing, one indent unit removed from every
/// complete nested fence span. Empty bodies become empty files.
fn render_body(body: &[String]) -> String {
    if body.is_empty() {
        return String::new();
    }
    let mut content = shift_left(body).join("\n");
    content.push('\n');
    content
}

/// Smallest non-colliding `N.ext` for a nameless block, `N.txt` when
/// the fence has no tag at all.
fn synthesize_name(block: &fence::Block, root: &NormalizedPath) -> String {
    let ext = block
        .tag
        .as_deref()
        .map(ext_for_language)
        .unwrap_or_else(|| "txt".to_string());
    let mut n = 1;
    loop {
        let name = format!("{n}.{ext}");
        if !root.join(&name).exists() {
            return name;
        }
        n += 1;
    }
}
