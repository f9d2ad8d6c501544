//! Command implementations for the rusky CLI.
//!
//! This module contains the business logic behind each CLI command:
//! - `manager` - The item `Manager` (add / complete / reopen / list / save)
//! - `items` - Result types for the item commands
//! - `scan` - Scan reports (summary, dry-run preview, bulk import)
//! - `config` - `config show` / `config set`
//!
//! Every result implements [`Output`] so `main` can print it either as JSON
//! or for humans.

pub mod config;
pub mod items;
pub mod manager;
pub mod scan;

pub use config::{ConfigSet, ConfigShow, config_set, config_show};
pub use items::{ItemAdded, ItemList, StatusChanged, StatusFilter, add, complete, list, reopen};
pub use manager::{Manager, StatusChange, find_index};
pub use scan::{MarkerCount, ScanMode, ScanReport, scan};

/// Command results that can be serialized to JSON or formatted for humans.
pub trait Output {
    /// Serialize to JSON string.
    fn to_json(&self) -> String;

    /// Format for human-readable output.
    fn to_human(&self) -> String;
}

/// Serialize a result, falling back to an empty object.
fn json_string<T: serde::Serialize>(value: &T) -> String {
    serde_json::to_string(value).unwrap_or_else(|_| "{}".to_string())
}
