//! End-to-end tests for the obvault CLI.
//!
//! Tests invoke the `obvault` binary as a subprocess against a temporary vault.

use std::path::Path;
use std::process::{Command, Output};

use tempfile::TempDir;

fn obvault(vault: &Path) -> Command {
    let mut cmd = Command::new(env!("CARGO_BIN_EXE_obvault"));
    cmd.arg("--vault").arg(vault).env_remove("OBSIDIAN_VAULT_PATH");
    cmd
}

fn run(vault: &Path, args: &[&str]) -> Output {
    obvault(vault).args(args).output().unwrap()
}

fn stdout(output: &Output) -> String {
    String::from_utf8_lossy(&output.stdout).to_string()
}

fn write(vault: &Path, path: &str, content: &str) {
    let output = run(vault, &["write", path, "--content", content]);
    assert!(
        output.status.success(),
        "write failed: {}",
        String::from_utf8_lossy(&output.stderr)
    );
}

#[test]
fn e2e_creates_missing_vault_root() {
    let dir = TempDir::new().unwrap();
    let vault = dir.path().join("Documents").join("Obsidian");
    let output = run(&vault, &["list"]);
    assert!(output.status.success());
    assert!(vault.is_dir());
    assert_eq!(stdout(&output).trim(), "[]");
}

#[test]
fn e2e_write_appends_extension_and_reads_back() {
    let dir = TempDir::new().unwrap();
    let output = run(dir.path(), &["write", "inbox/idea", "--content", "# Idea\nbody"]);
    assert!(output.status.success());
    assert!(stdout(&output).contains("Note saved successfully: inbox/idea"));
    assert!(dir.path().join("inbox").join("idea.md").is_file());

    let output = run(dir.path(), &["read", "inbox/idea.md"]);
    assert!(output.status.success());
    assert_eq!(stdout(&output), "# Idea\nbody");
}

#[test]
fn e2e_read_body_skips_frontmatter() {
    let dir = TempDir::new().unwrap();
    write(dir.path(), "fm.md", "---\ntitle: Foo\n---\nbody text\n");
    let output = run(dir.path(), &["read", "fm.md", "--body"]);
    assert_eq!(stdout(&output), "body text\n");
}

#[test]
fn e2e_read_missing_prints_sentinel() {
    let dir = TempDir::new().unwrap();
    let output = run(dir.path(), &["read", "missing.md"]);
    assert!(!output.status.success());
    assert!(stdout(&output).contains("Note not found: missing.md"));
}

#[test]
fn e2e_traversal_is_rejected() {
    let dir = TempDir::new().unwrap();
    let vault = dir.path().join("vault");
    std::fs::create_dir_all(&vault).unwrap();
    std::fs::write(dir.path().join("outside.md"), "secret").unwrap();

    let output = run(&vault, &["read", "../outside.md"]);
    assert!(!output.status.success());
    assert!(!stdout(&output).contains("secret"));
    assert!(String::from_utf8_lossy(&output.stderr).contains("invalid path"));
}

#[test]
fn e2e_list_returns_sorted_records() {
    let dir = TempDir::new().unwrap();
    write(dir.path(), "zeta", "z");
    write(dir.path(), "projects/alpha", "a");

    let output = run(dir.path(), &["list"]);
    let notes: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    let notes = notes.as_array().unwrap();
    assert_eq!(notes.len(), 2);
    assert_eq!(notes[0]["path"], "projects/alpha.md");
    assert_eq!(notes[0]["name"], "alpha");
    assert_eq!(notes[1]["path"], "zeta.md");

    let output = run(dir.path(), &["list", "projects"]);
    let notes: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(notes.as_array().unwrap().len(), 1);
}

#[test]
fn e2e_search_reports_matching_lines() {
    let dir = TempDir::new().unwrap();
    write(dir.path(), "greeting", "hello world\nbye");
    write(dir.path(), "other", "nothing here");

    let output = run(dir.path(), &["search", "Hello"]);
    assert!(output.status.success());
    let results: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(results.as_array().unwrap().len(), 1);
    assert_eq!(results[0]["path"], "greeting.md");
    assert_eq!(results[0]["matches"][0]["line_number"], 1);
    assert_eq!(results[0]["matches"][0]["content"], "hello world");
}

#[test]
fn e2e_meta_prints_frontmatter() {
    let dir = TempDir::new().unwrap();
    write(dir.path(), "foo.md", "---\ntitle: Foo\ntags: [a, b]\n---\nbody");
    write(dir.path(), "plain.md", "no frontmatter");

    let output = run(dir.path(), &["meta", "foo.md"]);
    let meta: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(meta, serde_json::json!({"title": "Foo", "tags": ["a", "b"]}));

    let output = run(dir.path(), &["meta", "plain.md"]);
    let meta: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(meta, serde_json::json!({}));

    let output = run(dir.path(), &["meta", "missing.md"]);
    assert!(!output.status.success());
    assert!(stdout(&output).contains("Note not found: missing.md"));
}

#[test]
fn e2e_delete_twice() {
    let dir = TempDir::new().unwrap();
    write(dir.path(), "gone.md", "bye");

    let output = run(dir.path(), &["rm", "gone.md"]);
    assert!(output.status.success());
    assert!(stdout(&output).contains("Note deleted successfully: gone.md"));

    let output = run(dir.path(), &["rm", "gone.md"]);
    assert!(!output.status.success());
    assert!(stdout(&output).contains("Failed to delete note or note not found: gone.md"));
}

#[test]
fn e2e_readonly_refuses_mutation() {
    let dir = TempDir::new().unwrap();
    write(dir.path(), "keep.md", "keep");

    let output = run(dir.path(), &["--readonly", "write", "new.md", "--content", "x"]);
    assert!(!output.status.success());
    assert!(!dir.path().join("new.md").exists());

    let output = run(dir.path(), &["--readonly", "rm", "keep.md"]);
    assert!(!output.status.success());
    assert!(dir.path().join("keep.md").exists());

    let output = run(dir.path(), &["--readonly", "read", "keep.md"]);
    assert!(output.status.success());
    assert_eq!(stdout(&output), "keep");
}

#[test]
fn e2e_write_accepts_content_starting_with_dash() {
    let dir = TempDir::new().unwrap();
    let output = run(dir.path(), &["write", "todo", "--content", "- item one\n- item two"]);
    assert!(
        output.status.success(),
        "write failed: {}",
        String::from_utf8_lossy(&output.stderr)
    );

    let output = run(dir.path(), &["read", "todo.md"]);
    assert_eq!(stdout(&output), "- item one\n- item two");
}

#[cfg(unix)]
#[test]
fn e2e_write_failure_reports_reason_on_stderr() {
    let dir = TempDir::new().unwrap();
    std::fs::create_dir_all(dir.path().join("taken.md")).unwrap();

    let output = run(dir.path(), &["write", "taken.md", "--content", "x"]);
    assert!(!output.status.success());
    assert!(stdout(&output).contains("Failed to save note: taken.md"));
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("os error"), "missing reason: {stderr}");
    assert!(dir.path().join("taken.md").is_dir());
}

#[cfg(unix)]
#[test]
fn e2e_symlink_out_of_vault_is_rejected() {
    let dir = TempDir::new().unwrap();
    let vault = dir.path().join("vault");
    let outside = dir.path().join("outside");
    std::fs::create_dir_all(&vault).unwrap();
    std::fs::create_dir_all(&outside).unwrap();
    std::fs::write(outside.join("secret.md"), "secret").unwrap();
    std::os::unix::fs::symlink(&outside, vault.join("linked")).unwrap();

    let output = run(&vault, &["read", "linked/secret.md"]);
    assert!(!output.status.success());
    assert!(!stdout(&output).contains("secret"));

    let output = run(&vault, &["write", "linked/planted", "--content", "x"]);
    assert!(!output.status.success());
    assert!(!outside.join("planted.md").exists());
}
