//! Collapses a directory tree into a single manuscript.
//!
//! Admitted files are enumerated in a stable order, each file's embedded
//! fences are shifted one indent unit right, and the whole file is
//! wrapped in a depth-0 fence named per the active convention. The
//! optional leading material (directory tree, filter snapshot) is
//! informational only: both blocks are nameless, so a default rebuild
//! ignores them, and their absence is never an error.

use mdir_fence::{NamingConvention, comment_token, language_for_ext, shift_right};
use mdir_fs::{NormalizedPath, io, walk};

use crate::config::Config;
use crate::report::RunReport;
use crate::{Error, Result};

/// Assembles the admitted files under `root` into manuscript text.
///
/// `exclude` names a file that must never be folded into the manuscript,
/// typically the manuscript itself when it lives inside `root`.
pub fn assemble(
    root: &NormalizedPath,
    config: &Config,
    exclude: Option<&NormalizedPath>,
) -> Result<(String, RunReport)> {
    config.validate()?;

    let outcome = walk::collect_files(root, &config.filter).map_err(Error::Fs)?;
    let mut report = RunReport::default();
    for rejection in outcome.rejected {
        report.skip(rejection.path, rejection.reason);
    }

    let files: Vec<String> = outcome
        .admitted
        .into_iter()
        .filter(|rel| match exclude {
            Some(excluded) => root.join(rel).as_str() != excluded.as_str(),
            None => true,
        })
        .collect();

    let mut sections: Vec<String> = vec!["# Generated Manuscript\n".to_string()];

    if config.output_directory_tree {
        let root_name = root.file_name().unwrap_or(".").to_string();
        sections.push("# Directory Structure\n".to_string());
        sections.push(format!("```\n{}\n```\n", render_tree(&root_name, &files)));
        sections.push("# Active Filters\n".to_string());
        sections.push(format!("```\n{}```\n", filter_snapshot(config)));
        sections.push("# File Contents\n".to_string());
    }

    for rel in &files {
        let path = root.join(rel);
        match io::read_text(&path) {
            Ok(content) => {
                sections.push(format_block(rel, &content, config.file_naming_convention));
                report.written.push(rel.clone());
            }
            Err(e) => report.fail(rel, e),
        }
    }

    Ok((sections.join("\n"), report))
}

/// Wraps one file as a depth-0 fenced block. The content's own fences
/// gain one indent unit so a later build restores them exactly.
fn format_block(rel_path: &str, content: &str, convention: NamingConvention) -> String {
    let ext = NormalizedPath::new(rel_path).extension().unwrap_or_default();
    let language = language_for_ext(&ext);

    let lines: Vec<String> = content.lines().map(|l| l.to_string()).collect();
    let mut body = shift_right(&lines);
    while body.last().is_some_and(|l| l.trim().is_empty()) {
        body.pop();
    }

    let mut out: Vec<String> = Vec::with_capacity(body.len() + 4);
    match convention {
        NamingConvention::OnFence => out.push(format!("```{rel_path}")),
        NamingConvention::BeforeFence => {
            out.push(rel_path.to_string());
            out.push(format!("```{language}"));
        }
        NamingConvention::AfterFence => {
            out.push(format!("```{language}"));
            out.push(format!("{} {}", comment_token(&ext), rel_path));
        }
    }
    out.extend(body);
    out.push("```".to_string());
    out.push(String::new());
    out.join("\n")
}

/// Serialized snapshot of the active filter rules, informational only.
fn filter_snapshot(config: &Config) -> String {
    toml::to_string_pretty(&config.filter).unwrap_or_default()
}

/// Cosmetic tree listing over the admitted relative paths. Directories
/// sort before files at each level, matching the traversal people see
/// in the manuscript body.
fn render_tree(root_name: &str, files: &[String]) -> String {
    let split: Vec<Vec<&str>> = files
        .iter()
        .map(|f| f.split('/').collect::<Vec<_>>())
        .collect();
    let refs: Vec<&[&str]> = split.iter().map(|v| v.as_slice()).collect();

    let mut lines = vec![root_name.to_string()];
    render_level(&refs, "", &mut lines);
    lines.join("\n")
}

fn render_level(paths: &[&[&str]], prefix: &str, lines: &mut Vec<String>) {
    use std::collections::BTreeMap;

    let mut dirs: BTreeMap<&str, Vec<&[&str]>> = BTreeMap::new();
    let mut leaves: Vec<&str> = Vec::new();
    for path in paths {
        match path {
            [name] => leaves.push(name),
            [dir, rest @ ..] => dirs.entry(dir).or_default().push(rest),
            [] => {}
        }
    }

    let total = dirs.len() + leaves.len();
    let mut index = 0;
    for (dir, children) in &dirs {
        index += 1;
        let last = index == total;
        lines.push(format!("{}{}{}", prefix, connector(last), dir));
        let child_prefix = format!("{}{}", prefix, if last { "    " } else { "│   " });
        render_level(children, &child_prefix, lines);
    }
    for leaf in &leaves {
        index += 1;
        lines.push(format!("{}{}{}", prefix, connector(index == total), leaf));
    }
}

fn connector(last: bool) -> &'static str {
    if last { "└── " } else { "├── " }
}
