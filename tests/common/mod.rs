#![allow(dead_code, deprecated)]

use assert_cmd::Command;
use tempfile::TempDir;

pub fn skillog_cmd() -> Command {
    let mut cmd = Command::cargo_bin("skillog").unwrap();
    cmd.env_remove("SKILLOG_ROOT");
    cmd.env_remove("SKILLOG_LOG");
    cmd
}

/// Initialized log root in a fresh temp directory
pub fn init_root() -> TempDir {
    let temp = TempDir::new().unwrap();
    skillog_cmd().arg("init").arg(temp.path()).assert().success();
    temp
}

/// Add an entry and return the id printed by `add`
pub fn add_entry(temp: &TempDir, skill: &str, hours: &str) -> String {
    let output = skillog_cmd()
        .current_dir(temp.path())
        .args(["add", "--skill", skill, "--hours", hours])
        .output()
        .unwrap();
    assert!(output.status.success(), "add failed: {:?}", output);

    let stdout = String::from_utf8(output.stdout).unwrap();
    stdout
        .trim()
        .strip_prefix("Added ")
        .expect("add prints the new id")
        .to_string()
}
