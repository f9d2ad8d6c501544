//! Storage layer for rusky data.
//!
//! This module handles persistence of the debt item collection.
//!
//! ## Storage Backends
//!
//! - **JSON file backend** (default): a single `.rusky.json` document in the
//!   project root, holding a version tag and the ordered item list.
//!
//! Every mutation is a full read-modify-write of the collection; see
//! [`StorageBackend`].

pub mod backend;
pub mod json_file;

pub use backend::StorageBackend;
pub use json_file::{CURRENT_VERSION, JsonFileBackend};

use std::path::{Path, PathBuf};

/// Default item file name, created in the project root.
pub const DEFAULT_DATA_FILE: &str = ".rusky.json";

/// Find the nearest ancestor of `start` (inclusive) containing a `.git` entry.
pub fn find_git_root(start: &Path) -> Option<PathBuf> {
    start
        .ancestors()
        .find(|dir| dir.join(".git").exists())
        .map(Path::to_path_buf)
}

/// Resolve the item file location. Relative names are taken from the project
/// root; absolute paths are used as-is.
pub fn resolve_data_file(project_root: &Path, data_file: &Path) -> PathBuf {
    if data_file.is_absolute() {
        data_file.to_path_buf()
    } else {
        project_root.join(data_file)
    }
}
