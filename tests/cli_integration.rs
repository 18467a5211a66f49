//! Integration tests for the `floaty` CLI.
//!
//! Each test points `floaty` at a temp data directory, runs it as a
//! subprocess, and verifies stdout and/or the stored items.json.

use std::fs;
use std::path::{Path, PathBuf};
use std::process::Command;

/// Get the path to the built `floaty` binary.
fn floaty_bin() -> PathBuf {
    // cargo test builds to target/debug/
    let mut path = std::env::current_exe().unwrap();
    path.pop(); // remove test binary name
    path.pop(); // remove deps/
    path.push("floaty");
    path
}

/// Run `floaty` against `dir`, return (stdout, stderr, success).
fn run_floaty(dir: &Path, args: &[&str]) -> (String, String, bool) {
    let output = Command::new(floaty_bin())
        .arg("--data-dir")
        .arg(dir)
        .args(args)
        // Keep the developer's own config out of the way
        .env("XDG_CONFIG_HOME", dir.join("config"))
        .env_remove("FLOATY_LOG")
        .output()
        .expect("failed to run floaty");

    let stdout = String::from_utf8_lossy(&output.stdout).to_string();
    let stderr = String::from_utf8_lossy(&output.stderr).to_string();
    (stdout, stderr, output.status.success())
}

/// Run `floaty` expecting success, return stdout.
fn run_floaty_ok(dir: &Path, args: &[&str]) -> String {
    let (stdout, stderr, success) = run_floaty(dir, args);
    if !success {
        panic!(
            "floaty {:?} failed:\nstdout: {}\nstderr: {}",
            args, stdout, stderr
        );
    }
    stdout
}

fn read_items(dir: &Path) -> serde_json::Value {
    let text = fs::read_to_string(dir.join("items.json")).unwrap();
    serde_json::from_str(&text).unwrap()
}

#[test]
fn test_list_empty_store() {
    let tmp = tempfile::TempDir::new().unwrap();
    let out = run_floaty_ok(tmp.path(), &["list"]);
    assert_eq!(out, "");
    assert!(!tmp.path().join("items.json").exists());
}

#[test]
fn test_add_then_list() {
    let tmp = tempfile::TempDir::new().unwrap();
    let out = run_floaty_ok(tmp.path(), &["add", "Buy", "milk"]);
    assert_eq!(out.trim(), "1. [ ] Buy milk");
    run_floaty_ok(tmp.path(), &["add", "  Call mom  "]);

    let out = run_floaty_ok(tmp.path(), &["list"]);
    assert_eq!(out, "1. [ ] Buy milk\n2. [ ] Call mom\n");
}

#[test]
fn test_store_format() {
    let tmp = tempfile::TempDir::new().unwrap();
    run_floaty_ok(tmp.path(), &["add", "Buy milk"]);
    let items = read_items(tmp.path());
    let first = &items[0];
    assert_eq!(first["text"], "Buy milk");
    assert_eq!(first["isDone"], false);
    assert!(first["id"].as_str().is_some_and(|id| id.len() == 26));
}

#[test]
fn test_done_toggles() {
    let tmp = tempfile::TempDir::new().unwrap();
    run_floaty_ok(tmp.path(), &["add", "Buy milk"]);
    let out = run_floaty_ok(tmp.path(), &["done", "1"]);
    assert_eq!(out.trim(), "1. [x] Buy milk");
    assert_eq!(read_items(tmp.path())[0]["isDone"], true);

    run_floaty_ok(tmp.path(), &["done", "1"]);
    assert_eq!(read_items(tmp.path())[0]["isDone"], false);
}

#[test]
fn test_rm_shifts_later_items() {
    let tmp = tempfile::TempDir::new().unwrap();
    for text in ["a", "b", "c"] {
        run_floaty_ok(tmp.path(), &["add", text]);
    }
    let out = run_floaty_ok(tmp.path(), &["rm", "2"]);
    assert_eq!(out.trim(), "2. [ ] b");
    let out = run_floaty_ok(tmp.path(), &["list"]);
    assert_eq!(out, "1. [ ] a\n2. [ ] c\n");
}

#[test]
fn test_list_json() {
    let tmp = tempfile::TempDir::new().unwrap();
    run_floaty_ok(tmp.path(), &["add", "Buy milk"]);
    run_floaty_ok(tmp.path(), &["done", "1"]);
    let out = run_floaty_ok(tmp.path(), &["list", "--json"]);
    let json: serde_json::Value = serde_json::from_str(&out).unwrap();
    assert_eq!(json[0]["position"], 1);
    assert_eq!(json[0]["text"], "Buy milk");
    assert_eq!(json[0]["isDone"], true);
}

#[test]
fn test_add_caps_at_ten() {
    let tmp = tempfile::TempDir::new().unwrap();
    for i in 0..10 {
        run_floaty_ok(tmp.path(), &["add", &format!("item {}", i)]);
    }
    let (_, stderr, success) = run_floaty(tmp.path(), &["add", "one too many"]);
    assert!(!success);
    assert!(stderr.contains("the list is full"));
    assert_eq!(read_items(tmp.path()).as_array().unwrap().len(), 10);
}

#[test]
fn test_bad_position_fails() {
    let tmp = tempfile::TempDir::new().unwrap();
    run_floaty_ok(tmp.path(), &["add", "a"]);
    let (_, stderr, success) = run_floaty(tmp.path(), &["rm", "5"]);
    assert!(!success);
    assert!(stderr.contains("error: no item at position 5"));
}

#[test]
fn test_damaged_store_is_left_alone() {
    let tmp = tempfile::TempDir::new().unwrap();
    fs::write(tmp.path().join("items.json"), "{not json").unwrap();
    let (_, stderr, success) = run_floaty(tmp.path(), &["add", "Buy milk"]);
    assert!(!success);
    assert!(stderr.contains("could not parse"));
    assert_eq!(
        fs::read_to_string(tmp.path().join("items.json")).unwrap(),
        "{not json"
    );
}

#[test]
fn test_log_file_written() {
    let tmp = tempfile::TempDir::new().unwrap();
    run_floaty_ok(tmp.path(), &["add", "Buy milk"]);
    assert!(tmp.path().join("floaty.log").exists());
}
