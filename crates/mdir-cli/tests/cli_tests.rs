//! End-to-end CLI tests for the mdir binary.

use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

fn mdir() -> Command {
    Command::cargo_bin("mdir").unwrap()
}

#[test]
fn build_creates_files_and_exits_zero() {
    let temp = TempDir::new().unwrap();
    let manuscript = temp.path().join("notes.md");
    std::fs::write(&manuscript, "```one.py\nprint(1)\nprint(2)\nprint(3)\n```\n").unwrap();
    let out = temp.path().join("out");

    mdir()
        .arg("build")
        .arg(&manuscript)
        .arg(&out)
        .assert()
        .success()
        .stdout(predicate::str::contains("one.py"));

    assert_eq!(
        std::fs::read_to_string(out.join("one.py")).unwrap(),
        "print(1)\nprint(2)\nprint(3)\n"
    );
}

#[test]
fn build_missing_manuscript_fails() {
    let temp = TempDir::new().unwrap();
    mdir()
        .arg("build")
        .arg(temp.path().join("absent.md"))
        .arg(temp.path().join("out"))
        .assert()
        .failure()
        .stderr(predicate::str::contains("error"));
}

#[test]
fn assemble_writes_manuscript() {
    let temp = TempDir::new().unwrap();
    let src = temp.path().join("src");
    std::fs::create_dir_all(&src).unwrap();
    std::fs::write(src.join("one.py"), "print(1)\n").unwrap();
    let manuscript = temp.path().join("notes.md");

    mdir()
        .arg("assemble")
        .arg(&src)
        .arg(&manuscript)
        .assert()
        .success();

    let text = std::fs::read_to_string(&manuscript).unwrap();
    assert!(text.contains("```one.py"));
    assert!(text.contains("print(1)"));
}

#[test]
fn assemble_excludes_manuscript_inside_root() {
    let temp = TempDir::new().unwrap();
    std::fs::write(temp.path().join("one.py"), "print(1)\n").unwrap();
    let manuscript = temp.path().join("notes.md");
    std::fs::write(&manuscript, "old manuscript contents\n").unwrap();

    mdir()
        .arg("assemble")
        .arg(temp.path())
        .arg(&manuscript)
        .assert()
        .success();

    let text = std::fs::read_to_string(&manuscript).unwrap();
    assert!(text.contains("```one.py"));
    assert!(!text.contains("old manuscript contents"));
}

#[test]
fn invalid_config_is_fatal_before_any_write() {
    let temp = TempDir::new().unwrap();
    let manuscript = temp.path().join("notes.md");
    std::fs::write(&manuscript, "```one.py\nprint(1)\n```\n").unwrap();
    let config = temp.path().join("mdir.toml");
    std::fs::write(&config, r#"blocks_ignored = ["bogus_rule"]"#).unwrap();
    let out = temp.path().join("out");

    mdir()
        .arg("build")
        .arg(&manuscript)
        .arg(&out)
        .arg("--config")
        .arg(&config)
        .assert()
        .failure()
        .stderr(predicate::str::contains("bogus_rule"));

    assert!(!out.exists(), "no writes before config validation");
}

#[test]
fn json_report_is_machine_readable() {
    let temp = TempDir::new().unwrap();
    let manuscript = temp.path().join("notes.md");
    std::fs::write(&manuscript, "```one.py\nprint(1)\n```\n").unwrap();
    let config = temp.path().join("mdir.toml");
    std::fs::write(&config, r#"blocks_ignored = ["none"]"#).unwrap();

    let output = mdir()
        .arg("build")
        .arg(&manuscript)
        .arg(temp.path().join("out"))
        .arg("--config")
        .arg(&config)
        .arg("--json")
        .output()
        .unwrap();

    assert!(output.status.success());
    let report: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(report["written"][0], "one.py");
}

#[test]
fn round_trip_through_the_binary() {
    let temp = TempDir::new().unwrap();
    let src = temp.path().join("project");
    std::fs::create_dir_all(src.join("sub")).unwrap();
    std::fs::write(src.join("a.txt"), "alpha\n").unwrap();
    std::fs::write(src.join("sub/b.txt"), "beta\n").unwrap();
    let config = temp.path().join("mdir.toml");
    std::fs::write(
        &config,
        "blocks_ignored = [\"none\"]\noutput_directory_tree = false\n",
    )
    .unwrap();

    let manuscript = temp.path().join("notes.md");
    mdir()
        .arg("assemble")
        .arg(&src)
        .arg(&manuscript)
        .arg("--config")
        .arg(&config)
        .assert()
        .success();

    let rebuilt = temp.path().join("rebuilt");
    mdir()
        .arg("build")
        .arg(&manuscript)
        .arg(&rebuilt)
        .arg("--config")
        .arg(&config)
        .assert()
        .success();

    assert_eq!(
        std::fs::read_to_string(rebuilt.join("a.txt")).unwrap(),
        "alpha\n"
    );
    assert_eq!(
        std::fs::read_to_string(rebuilt.join("sub/b.txt")).unwrap(),
        "beta\n"
    );
}
