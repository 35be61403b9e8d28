//! End-to-end integration tests across the fence, fs, and core crates.
//!
//! These exercise the complete flow on a fixture manuscript: build into
//! a tree, verify the tree, assemble it back, rebuild, and compare the
//! two trees byte for byte.

use std::fs;
use std::path::Path;

use pretty_assertions::assert_eq;
use tempfile::TempDir;

use mdir_core::{Config, assemble, build};
use mdir_fs::NormalizedPath;

fn fixture(name: &str) -> String {
    let path = Path::new(env!("CARGO_MANIFEST_DIR"))
        .join("../../test-fixtures/manuscripts")
        .join(name);
    fs::read_to_string(path).unwrap()
}

fn fixture_config() -> Config {
    Config {
        blocks_ignored: vec!["none".to_string()],
        output_directory_tree: false,
        ..Config::default()
    }
}

/// Every file under `root` as (relative path, content), sorted.
fn tree_snapshot(root: &Path) -> Vec<(String, String)> {
    fn walk(dir: &Path, root: &Path, out: &mut Vec<(String, String)>) {
        for entry in fs::read_dir(dir).unwrap() {
            let path = entry.unwrap().path();
            if path.is_dir() {
                walk(&path, root, out);
            } else {
                let rel = path
                    .strip_prefix(root)
                    .unwrap()
                    .to_string_lossy()
                    .replace('\\', "/");
                out.push((rel, fs::read_to_string(&path).unwrap()));
            }
        }
    }
    let mut out = Vec::new();
    walk(root, root, &mut out);
    out.sort();
    out
}

#[test]
fn fixture_manuscript_builds_expected_tree() {
    let manuscript = fixture("sample.md");
    let out = TempDir::new().unwrap();

    let report = build(&manuscript, &NormalizedPath::new(out.path()), &fixture_config()).unwrap();
    assert!(report.success());
    assert_eq!(
        report.written,
        vec!["src/lib.rs", "docs/guide.md", "config/app.toml"]
    );

    // The embedded fence lost one indent unit inside the written file,
    // and no standalone snippet file appeared.
    let guide = fs::read_to_string(out.path().join("docs/guide.md")).unwrap();
    assert!(guide.contains("```examples/snippet.py\nprint(\"embedded\")\n```"));
    assert!(!out.path().join("examples").exists());
}

#[test]
fn build_assemble_build_yields_identical_trees() {
    let manuscript = fixture("sample.md");
    let config = fixture_config();

    let first = TempDir::new().unwrap();
    let report = build(&manuscript, &NormalizedPath::new(first.path()), &config).unwrap();
    assert!(report.success());

    let (assembled, report) = assemble(&NormalizedPath::new(first.path()), &config, None).unwrap();
    assert!(report.success());

    let second = TempDir::new().unwrap();
    let report = build(&assembled, &NormalizedPath::new(second.path()), &config).unwrap();
    assert!(report.success());

    assert_eq!(tree_snapshot(first.path()), tree_snapshot(second.path()));
}

#[test]
fn assembled_manuscript_is_a_fixed_point() {
    let manuscript = fixture("sample.md");
    let config = fixture_config();

    let tree = TempDir::new().unwrap();
    build(&manuscript, &NormalizedPath::new(tree.path()), &config).unwrap();

    let (first_pass, _) = assemble(&NormalizedPath::new(tree.path()), &config, None).unwrap();

    let rebuilt = TempDir::new().unwrap();
    build(&first_pass, &NormalizedPath::new(rebuilt.path()), &config).unwrap();
    let (second_pass, _) = assemble(&NormalizedPath::new(rebuilt.path()), &config, None).unwrap();

    assert_eq!(first_pass, second_pass);
}

#[test]
fn assembled_manuscript_scans_into_expected_blocks() {
    let manuscript = fixture("sample.md");
    let config = fixture_config();

    let tree = TempDir::new().unwrap();
    build(&manuscript, &NormalizedPath::new(tree.path()), &config).unwrap();
    let (assembled, _) = assemble(&NormalizedPath::new(tree.path()), &config, None).unwrap();

    let blocks = mdir_fence::blocks(&assembled);
    assert_eq!(blocks.len(), 3);
    assert!(blocks.iter().all(|b| b.depth == 0));
    let tags: Vec<_> = blocks.iter().map(|b| b.tag.as_deref().unwrap()).collect();
    assert_eq!(tags, vec!["config/app.toml", "docs/guide.md", "src/lib.rs"]);
    // The embedded snippet fence stayed a child, not a fourth block.
    let guide = &blocks[1];
    assert_eq!(guide.children.len(), 1);
    assert_eq!(guide.children[0].tag.as_deref(), Some("examples/snippet.py"));
}

#[test]
fn fixture_config_parses_and_validates() {
    let temp = TempDir::new().unwrap();
    let path = temp.path().join("mdir.toml");
    fs::write(&path, fixture("mdir.toml")).unwrap();

    let config = Config::load(&NormalizedPath::new(&path)).unwrap();
    assert!(!config.output_directory_tree);
    assert_eq!(config.blocks_ignored, vec!["none"]);
}

#[test]
fn repeated_builds_under_numbering_accumulate_safely() {
    let manuscript = fixture("sample.md");
    let config = Config {
        handle_file_conflicts: mdir_core::ConflictPolicy::AppendNumberToFilename,
        ..fixture_config()
    };

    let out = TempDir::new().unwrap();
    let root = NormalizedPath::new(out.path());
    build(&manuscript, &root, &config).unwrap();
    build(&manuscript, &root, &config).unwrap();
    let report = build(&manuscript, &root, &config).unwrap();
    assert!(report.success());

    // Three runs: original, (1), (2) - nothing overwritten.
    assert!(out.path().join("src/lib.rs").exists());
    assert!(out.path().join("src/lib(1).rs").exists());
    assert!(out.path().join("src/lib(2).rs").exists());
    let originals = fs::read_to_string(out.path().join("src/lib.rs")).unwrap();
    let third = fs::read_to_string(out.path().join("src/lib(2).rs")).unwrap();
    assert_eq!(originals, third);
}
