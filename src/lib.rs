//! Rusky - A technical debt tracking library.
//!
//! This library provides the core functionality for the `rusky` CLI tool,
//! including debt item management, JSON persistence, and codebase scanning
//! for TODO/FIXME-style markers.

pub mod cli;
pub mod commands;
pub mod config;
pub mod models;
pub mod scanner;
pub mod storage;
pub mod tui;

use std::path::PathBuf;

/// Test utilities for isolated test environments.
#[cfg(test)]
pub(crate) mod test_utils {
    use std::fs;
    use std::path::{Path, PathBuf};
    use tempfile::TempDir;

    use crate::commands::Manager;
    use crate::storage::JsonFileBackend;

    /// Test environment with an isolated project directory.
    pub struct TestEnv {
        /// Simulated project root
        pub repo_dir: TempDir,
    }

    impl TestEnv {
        pub fn new() -> Self {
            Self {
                repo_dir: TempDir::new().unwrap(),
            }
        }

        /// Get the path to the simulated project.
        pub fn path(&self) -> &Path {
            self.repo_dir.path()
        }

        /// Path of the item file inside the project.
        pub fn data_file(&self) -> PathBuf {
            self.path().join(crate::storage::DEFAULT_DATA_FILE)
        }

        /// Open a manager over the project's item file (DI-based).
        pub fn manager(&self) -> Manager<JsonFileBackend> {
            Manager::new(JsonFileBackend::new(self.data_file()))
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
    }

    impl Default for TestEnv {
        fn default() -> Self {
            Self::new()
        }
    }
}

/// Library-level error type for rusky operations.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Failed to parse {}: {source}", path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("Failed to resolve scan path {}: {source}", path.display())]
    ScanRoot {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Description cannot be empty")]
    EmptyDescription,

    #[error("Item not found: {0}")]
    NotFound(String),

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Config error: {0}")]
    Config(String),

    #[error("{0}")]
    Other(String),
}

/// Result type alias for rusky operations.
pub type Result<T> = std::result::Result<T, Error>;
