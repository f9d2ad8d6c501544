//! Common test utilities for rusky integration tests.
//!
//! Provides `TestEnv` for isolated test environments that don't read or
//! write the user's `~/.config/rusky/` directory.

#![allow(dead_code)]

use assert_cmd::Command;
use std::fs;
use std::path::{Path, PathBuf};
pub use tempfile::TempDir;

/// A test environment with isolated project and config directories.
///
/// Each `TestEnv` creates two temporary directories:
/// - `repo_dir`: Acts as the project root (it contains a `.git` directory)
/// - `config_dir`: Holds the system config (via `RUSKY_CONFIG_DIR` env var)
///
/// The `rusky()` method returns a `Command` that sets the environment
/// per-invocation, making tests parallel-safe.
pub struct TestEnv {
    pub repo_dir: TempDir,
    pub config_dir: TempDir,
}

impl TestEnv {
    /// Create a new test environment with isolated directories.
    pub fn new() -> Self {
        let env = Self {
            repo_dir: TempDir::new().unwrap(),
            config_dir: TempDir::new().unwrap(),
        };
        fs::create_dir(env.repo_dir.path().join(".git")).unwrap();
        env
    }

    /// Get a Command for the rusky binary running in the project root.
    pub fn rusky(&self) -> Command {
        let mut cmd = Command::new(env!("CARGO_BIN_EXE_rusky"));
        cmd.current_dir(self.repo_dir.path());
        cmd.env("RUSKY_CONFIG_DIR", self.config_dir.path());
        cmd.env_remove("RUSKY_REPO");
        cmd.env_remove("RUSKY_FILE");
        cmd.env_remove("RUSKY_LOG");
        cmd
    }

    /// Get the path to the project directory.
    pub fn path(&self) -> &Path {
        self.repo_dir.path()
    }

    /// Get the path to the system config directory.
    pub fn config_path(&self) -> &Path {
        self.config_dir.path()
    }

    /// Path of the default item file.
    pub fn data_file(&self) -> PathBuf {
        self.path().join(".rusky.json")
    }

    /// Write a file below the project root, creating parent directories.
    pub fn write_file(&self, relative: &str, content: &str) -> PathBuf {
        let path = self.path().join(relative);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).unwrap();
        }
        fs::write(&path, content).unwrap();
        path
    }

    /// Add an item through the CLI.
    pub fn add(&self, description: &str) {
        self.rusky().args(["add", description]).assert().success();
    }

    /// Parse the item file.
    pub fn read_items(&self) -> serde_json::Value {
        let text = fs::read_to_string(self.data_file()).unwrap();
        serde_json::from_str(&text).unwrap()
    }
}

impl Default for TestEnv {
    fn default() -> Self {
        Self::new()
    }
}

/// Parse JSON from command output.
pub fn parse_json(output: &[u8]) -> serde_json::Value {
    let stdout = String::from_utf8_lossy(output);
    serde_json::from_str(stdout.trim()).unwrap()
}
