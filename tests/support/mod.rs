#![allow(dead_code)]

use std::fs;
use std::path::{Path, PathBuf};

use assert_cmd::Command;
use tempfile::TempDir;

/// Isolated data directory for driving the `tabboard` binary.
pub struct TestDir {
    dir: TempDir,
}

impl TestDir {
    pub fn new() -> Self {
        let dir = tempfile::tempdir().expect("failed to create tempdir");
        Self { dir }
    }

    pub fn path(&self) -> &Path {
        self.dir.path()
    }

    pub fn slot_path(&self, slot: &str) -> PathBuf {
        self.dir.path().join(format!("{slot}.json"))
    }

    pub fn write_slot(&self, slot: &str, contents: &str) -> std::io::Result<PathBuf> {
        let path = self.slot_path(slot);
        fs::write(&path, contents)?;
        Ok(path)
    }

    pub fn read_slot(&self, slot: &str) -> Option<String> {
        fs::read_to_string(self.slot_path(slot)).ok()
    }

    pub fn write_config(&self, contents: &str) -> std::io::Result<PathBuf> {
        let path = self.dir.path().join("tabboard.toml");
        fs::write(&path, contents)?;
        Ok(path)
    }

    pub fn cmd(&self) -> Command {
        let mut cmd = Command::cargo_bin("tabboard").expect("binary");
        cmd.env("TABBOARD_DATA_DIR", self.dir.path())
            .env_remove("TABBOARD_CONFIG")
            .env_remove("RUST_LOG");
        cmd
    }

    /// Run with `--json` and parse the envelope printed on stdout.
    pub fn json(&self, args: &[&str]) -> serde_json::Value {
        let output = self
            .cmd()
            .arg("--json")
            .args(args)
            .output()
            .expect("run tabboard");
        serde_json::from_slice(&output.stdout).expect("json envelope")
    }
}
