#![allow(dead_code)]

use assert_cmd::Command;
use assert_fs::TempDir;
use assert_fs::prelude::*;
use rstest::fixture;
use std::path::{Path, PathBuf};

#[fixture]
pub fn root_dir() -> TempDir {
    TempDir::new().expect("Failed to create temp dir")
}

/// Run real git, failing the test if it fails.
pub fn git(dir: &Path, args: &[&str]) -> String {
    let output = std::process::Command::new("git")
        .arg("-C")
        .arg(dir)
        .args([
            "-c",
            "user.name=Test User",
            "-c",
            "user.email=test@example.com",
            "-c",
            "commit.gpgsign=false",
        ])
        .args(args)
        .env("LC_ALL", "C")
        .env("GIT_CONFIG_GLOBAL", "/dev/null")
        .env("GIT_CONFIG_NOSYSTEM", "1")
        .output()
        .expect("Failed to run git");

    assert!(
        output.status.success(),
        "git {:?} failed: {}",
        args,
        String::from_utf8_lossy(&output.stderr)
    );
    String::from_utf8_lossy(&output.stdout).to_string()
}

/// `git init` with `main` as the initial branch and one commit.
pub fn init_repo(root: &TempDir, name: &str) -> PathBuf {
    let dir = root.child(name);
    dir.create_dir_all().expect("Failed to create repository dir");
    git(dir.path(), &["init", "-q"]);
    git(dir.path(), &["symbolic-ref", "HEAD", "refs/heads/main"]);
    commit_file(dir.path(), "README.md", "hello\n", "Initial commit");
    dir.path().canonicalize().expect("Failed to canonicalize repository dir")
}

pub fn commit_file(dir: &Path, file: &str, content: &str, message: &str) {
    std::fs::write(dir.join(file), content).expect("Failed to write file");
    git(dir, &["add", file]);
    git(dir, &["commit", "-q", "-m", message]);
}

pub fn run_git_meta(args: &[&str]) -> Command {
    let mut cmd = Command::cargo_bin("git-meta").expect("Failed to find git-meta binary");
    cmd.args(args)
        .env_remove("GIT_PATH")
        .env_remove("GIT_META_LOG")
        .env("GIT_CONFIG_GLOBAL", "/dev/null")
        .env("GIT_CONFIG_NOSYSTEM", "1");
    cmd
}

pub fn stdout_of(cmd: &mut Command) -> String {
    let assert = cmd.assert().success();
    String::from_utf8(assert.get_output().stdout.clone()).expect("stdout is not utf-8")
}
