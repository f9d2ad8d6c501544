//! Unified precedence resolution for configuration.
//!
//! ## Config Precedence (highest to lowest)
//!
//! 1. CLI flags (and the environment variables clap binds to them)
//! 2. Project config (`<project root>/.rusky.kdl`)
//! 3. System config (`~/.config/rusky/config.kdl`)
//! 4. Built-in defaults

use super::schema::{DEFAULT_PREVIEW_LIMIT, OutputFormat, RuskyConfig};
use crate::storage::DEFAULT_DATA_FILE;
use crate::{Error, Result};
use kdl::KdlDocument;
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

/// Environment variable overriding the system config directory.
pub const CONFIG_DIR_ENV: &str = "RUSKY_CONFIG_DIR";

/// Project-level config file name.
pub const PROJECT_CONFIG_FILE: &str = ".rusky.kdl";

/// System-level config file name.
pub const SYSTEM_CONFIG_FILE: &str = "config.kdl";

/// Tracks where a resolved value came from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValueSource {
    /// Value from CLI flag or its bound environment variable
    CliFlag,
    /// Value from the project's .rusky.kdl
    Project,
    /// Value from the system config.kdl
    System,
    /// Built-in default value
    Default,
}

impl std::fmt::Display for ValueSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ValueSource::CliFlag => write!(f, "cli"),
            ValueSource::Project => write!(f, "project"),
            ValueSource::System => write!(f, "system"),
            ValueSource::Default => write!(f, "default"),
        }
    }
}

/// A resolved value with its source.
#[derive(Debug, Clone)]
pub struct Resolved<T> {
    /// The resolved value
    pub value: T,
    /// Where the value came from
    pub source: ValueSource,
}

impl<T> Resolved<T> {
    pub fn new(value: T, source: ValueSource) -> Self {
        Self { value, source }
    }
}

/// Fully resolved configuration with source tracking.
#[derive(Debug, Clone)]
pub struct ResolvedConfig {
    /// Output format preference
    pub output_format: Resolved<OutputFormat>,
    /// Item file (as configured, not yet joined to the project root)
    pub data_file: Resolved<PathBuf>,
    /// Number of findings previewed by `scan --dry-run`
    pub preview_limit: Resolved<usize>,
}

impl Default for ResolvedConfig {
    fn default() -> Self {
        Self {
            output_format: Resolved::new(OutputFormat::Human, ValueSource::Default),
            data_file: Resolved::new(PathBuf::from(DEFAULT_DATA_FILE), ValueSource::Default),
            preview_limit: Resolved::new(DEFAULT_PREVIEW_LIMIT, ValueSource::Default),
        }
    }
}

impl ResolvedConfig {
    pub fn output_format(&self) -> OutputFormat {
        self.output_format.value
    }

    pub fn data_file(&self) -> &Path {
        &self.data_file.value
    }

    pub fn preview_limit(&self) -> usize {
        self.preview_limit.value
    }
}

/// CLI overrides for configuration resolution.
#[derive(Debug, Clone, Default)]
pub struct ConfigOverrides {
    /// Output format override from CLI flag
    pub output_format: Option<OutputFormat>,
    /// Item file override from CLI flag
    pub data_file: Option<PathBuf>,
}

impl ConfigOverrides {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_output_format(mut self, format: OutputFormat) -> Self {
        self.output_format = Some(format);
        self
    }

    pub fn with_data_file(mut self, path: impl Into<PathBuf>) -> Self {
        self.data_file = Some(path.into());
        self
    }
}

/// Directory holding the system config (and the browser log file).
pub fn system_config_dir() -> Option<PathBuf> {
    match std::env::var_os(CONFIG_DIR_ENV) {
        Some(dir) if !dir.is_empty() => Some(PathBuf::from(dir)),
        _ => dirs::config_dir().map(|dir| dir.join("rusky")),
    }
}

pub fn system_config_path() -> Option<PathBuf> {
    system_config_dir().map(|dir| dir.join(SYSTEM_CONFIG_FILE))
}

pub fn project_config_path(project_root: &Path) -> PathBuf {
    project_root.join(PROJECT_CONFIG_FILE)
}

/// Read a config file. A missing file is an empty config.
pub fn read_config(path: &Path) -> Result<RuskyConfig> {
    let text = match fs::read_to_string(path) {
        Ok(text) => text,
        Err(e) if e.kind() == ErrorKind::NotFound => return Ok(RuskyConfig::default()),
        Err(e) => return Err(e.into()),
    };

    let doc: KdlDocument = text
        .parse()
        .map_err(|e| Error::Config(format!("{}: {}", path.display(), e)))?;
    RuskyConfig::from_kdl(&doc).map_err(|e| Error::Config(format!("{}: {}", path.display(), e)))
}

/// Write a config file, creating its directory if needed.
pub fn write_config(path: &Path, config: &RuskyConfig) -> Result<()> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)?;
        }
    }
    fs::write(path, config.to_kdl().to_string())?;
    Ok(())
}

/// Resolve configuration with full precedence chain.
pub fn resolve_config(project_root: &Path, overrides: &ConfigOverrides) -> Result<ResolvedConfig> {
    resolve_config_with(project_root, system_config_path().as_deref(), overrides)
}

/// Resolve configuration against an explicit system config file (or none).
pub fn resolve_config_with(
    project_root: &Path,
    system_path: Option<&Path>,
    overrides: &ConfigOverrides,
) -> Result<ResolvedConfig> {
    let system_config = match system_path {
        Some(path) => read_config(path)?,
        None => RuskyConfig::default(),
    };
    let project_config = read_config(&project_config_path(project_root))?;

    Ok(merge(overrides, &project_config, &system_config))
}

fn merge(
    overrides: &ConfigOverrides,
    project: &RuskyConfig,
    system: &RuskyConfig,
) -> ResolvedConfig {
    let mut result = ResolvedConfig::default();

    if let Some(format) = overrides.output_format {
        result.output_format = Resolved::new(format, ValueSource::CliFlag);
    } else if let Some(format) = project.output_format {
        result.output_format = Resolved::new(format, ValueSource::Project);
    } else if let Some(format) = system.output_format {
        result.output_format = Resolved::new(format, ValueSource::System);
    }

    if let Some(ref path) = overrides.data_file {
        result.data_file = Resolved::new(path.clone(), ValueSource::CliFlag);
    } else if let Some(ref path) = project.data_file {
        result.data_file = Resolved::new(path.clone(), ValueSource::Project);
    } else if let Some(ref path) = system.data_file {
        result.data_file = Resolved::new(path.clone(), ValueSource::System);
    }

    if let Some(limit) = project.preview_limit {
        result.preview_limit = Resolved::new(limit, ValueSource::Project);
    } else if let Some(limit) = system.preview_limit {
        result.preview_limit = Resolved::new(limit, ValueSource::System);
    }

    result
}
