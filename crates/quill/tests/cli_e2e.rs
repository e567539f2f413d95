#![allow(deprecated)]

use assert_cmd::cargo::cargo_bin;
use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;
use std::path::PathBuf;
use tempfile::TempDir;

struct Env {
    temp: TempDir,
}

impl Env {
    fn new() -> Self {
        let temp = TempDir::new().unwrap();
        fs::create_dir_all(temp.path().join("data")).unwrap();
        fs::create_dir_all(temp.path().join("scratch")).unwrap();
        fs::create_dir_all(temp.path().join("home")).unwrap();
        Self { temp }
    }

    fn root(&self) -> PathBuf {
        self.temp.path().join("data")
    }

    /// A `quill` invocation isolated from the user's data and config.
    fn quill(&self) -> Command {
        let home = self.temp.path().join("home");
        let mut cmd = Command::new(cargo_bin("quill"));
        cmd.env("QUILL_ROOT", self.root())
            .env("QUILL_SCRATCH_DIR", self.temp.path().join("scratch"))
            .env("HOME", &home)
            .env("XDG_CONFIG_HOME", home.join(".config"))
            .env_remove("QUILL_EDITOR")
            .env_remove("QUILL_SLUG_MAX_LENGTH");
        cmd
    }

    fn stdout(&self, args: &[&str]) -> String {
        let output = self.quill().args(args).assert().success().get_output().clone();
        String::from_utf8(output.stdout).unwrap()
    }
}

fn last_line(s: &str) -> PathBuf {
    PathBuf::from(s.lines().last().unwrap().trim())
}

#[test]
fn test_new_commit_show_workflow() {
    let env = Env::new();

    // 1. Create without an editor; the buffer path is the last line
    let out = env.stdout(&["new", "article", "--no-editor"]);
    assert!(out.contains("Created article"));
    let buffer = last_line(&out);
    assert!(buffer.starts_with(env.temp.path().join("scratch")));
    assert!(env.root().join(".lock").is_file());

    // 2. `path` reports the same buffer
    assert_eq!(last_line(&env.stdout(&["path"])), buffer);

    // 3. Edit and commit from a separate invocation
    fs::write(&buffer, "---\ntitle: Test\n---\nHello").unwrap();
    env.quill()
        .arg("commit")
        .assert()
        .success()
        .stdout(predicate::str::contains("as test"));
    assert!(!env.root().join(".lock").exists());
    assert!(!buffer.exists());

    // 4. Show by type/slug
    let json = env.stdout(&["show", "article/test", "--output", "json"]);
    let value: serde_json::Value = serde_json::from_str(&json).unwrap();
    assert_eq!(value["content"]["title"], "Test");
    assert_eq!(value["content"]["text"], "Hello");

    // 5. List shows it
    env.quill()
        .args(["list", "--type", "article"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Test"));
}

#[test]
fn test_second_edit_is_refused_until_unlocked() {
    let env = Env::new();
    env.stdout(&["new", "page", "--no-editor"]);

    env.quill()
        .args(["new", "note", "--no-editor"])
        .assert()
        .failure()
        .code(1)
        .stderr(predicate::str::starts_with("Error:"))
        .stderr(predicate::str::contains("locked"));

    env.quill().args(["unlock", "--force"]).assert().success();
    env.quill()
        .arg("status")
        .assert()
        .success()
        .stdout(predicate::str::contains("No edit in progress"));
    env.stdout(&["new", "note", "--no-editor"]);
}

#[test]
fn test_corrupted_lock_is_reported_and_cleared() {
    let env = Env::new();
    fs::write(env.root().join(".lock"), "garbage").unwrap();

    env.quill()
        .arg("status")
        .assert()
        .success()
        .stdout(predicate::str::contains("unlock --force"));
    env.quill().arg("commit").assert().failure();

    env.quill().args(["unlock", "--force"]).assert().success();
    assert!(!env.root().join(".lock").exists());
}

#[test]
fn test_discard_keeps_placeholder() {
    let env = Env::new();
    env.stdout(&["new", "page", "--no-editor"]);
    env.quill().arg("discard").assert().success();

    let json = env.stdout(&["list", "--output", "json"]);
    let value: serde_json::Value = serde_json::from_str(&json).unwrap();
    assert_eq!(value.as_array().unwrap().len(), 1);
    assert_eq!(value[0]["content"]["title"], ".");
}

#[test]
fn test_unknown_selector_fails() {
    let env = Env::new();
    env.quill()
        .args(["show", "page/missing"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("not found"));
    env.quill()
        .args(["new", "post", "--no-editor"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Unknown resource type"));
}

#[test]
fn test_id_generation() {
    let env = Env::new();
    let out = env.stdout(&["id", "--at", "1700000000000", "--count", "2"]);
    let ids: Vec<&str> = out.lines().collect();
    assert_eq!(ids.len(), 2);
    assert!(ids.iter().all(|id| id.len() == 12));
    assert_eq!(ids[0][..9], ids[1][..9]);
    assert!(ids[0] < ids[1]);
}

#[test]
fn test_reindex_and_config() {
    let env = Env::new();
    env.quill()
        .arg("reindex")
        .assert()
        .success()
        .stdout(predicate::str::contains("Rebuilt"));

    fs::write(env.root().join("quill.toml"), "slug_max_length = 20\n").unwrap();
    env.quill()
        .arg("config")
        .assert()
        .success()
        .stdout(predicate::str::contains("slug_max_length = 20"));
}

#[cfg(unix)]
#[test]
fn test_new_with_editor_and_commit() {
    let env = Env::new();
    // `true` exits 0 without touching the buffer.
    env.quill()
        .env("QUILL_EDITOR", "true")
        .args(["new", "note", "--commit"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Committed note"));
    assert!(!env.root().join(".lock").exists());
}

#[cfg(unix)]
#[test]
fn test_failing_editor_keeps_edit_open() {
    let env = Env::new();
    env.quill()
        .env("QUILL_EDITOR", "false")
        .args(["new", "page"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("still open"));
    assert!(env.root().join(".lock").is_file());
}
