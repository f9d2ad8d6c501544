//! Configuration management for rusky.
//!
//! Preferences live in KDL files:
//!
//! - System: `~/.config/rusky/config.kdl` (directory overridable with
//!   `RUSKY_CONFIG_DIR`)
//! - Project: `<project root>/.rusky.kdl`
//!
//! Keys:
//! - `output-format` - "human" or "json"
//! - `data-file` - item file, relative to the project root
//! - `preview-limit` - findings shown by `scan --dry-run`
//!
//! ## Precedence
//!
//! CLI flag > project config > system config > defaults.
//!
//! Use the [`resolver`] module for unified precedence resolution.

pub mod resolver;
pub mod schema;

pub use resolver::{
    CONFIG_DIR_ENV, ConfigOverrides, PROJECT_CONFIG_FILE, Resolved, ResolvedConfig, ValueSource,
    project_config_path, read_config, resolve_config, resolve_config_with, system_config_dir, system_config_path,
    write_config,
};
pub use schema::{CONFIG_KEYS, OutputFormat, RuskyConfig};
