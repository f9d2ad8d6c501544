//! KDL schema definitions for config.kdl and .rusky.kdl.
//!
//! This module provides:
//! - Rust structs representing the KDL schema
//! - Serialization/deserialization to/from KDL format
//! - Validation functions

use kdl::{KdlDocument, KdlEntry, KdlNode, KdlValue};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Default number of findings shown by `scan --dry-run`.
pub const DEFAULT_PREVIEW_LIMIT: usize = 10;

/// Upper bound accepted for `preview-limit`.
pub const MAX_PREVIEW_LIMIT: usize = 1000;

/// Keys understood by the config files.
pub const CONFIG_KEYS: [&str; 3] = ["output-format", "data-file", "preview-limit"];

/// Output format preference for CLI commands.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// Human-readable output
    #[default]
    Human,
    /// JSON output (machine-readable)
    Json,
}

impl OutputFormat {
    /// Parse from string, case-insensitive.
    pub fn parse(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "json" => Some(OutputFormat::Json),
            "human" => Some(OutputFormat::Human),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            OutputFormat::Json => "json",
            OutputFormat::Human => "human",
        }
    }
}

impl std::fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// User preferences stored in KDL.
///
/// # KDL Schema
///
/// ```kdl
/// output-format "human"  // or "json"
/// data-file ".rusky.json"
/// preview-limit 10
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RuskyConfig {
    /// Default output format for CLI commands
    pub output_format: Option<OutputFormat>,

    /// Item file, relative to the project root unless absolute
    pub data_file: Option<PathBuf>,

    /// Findings shown by `scan --dry-run`
    pub preview_limit: Option<usize>,
}

impl RuskyConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// Validate the config values.
    ///
    /// Returns an error message if any value is invalid.
    pub fn validate(&self) -> Result<(), String> {
        if let Some(limit) = self.preview_limit {
            if limit == 0 || limit > MAX_PREVIEW_LIMIT {
                return Err(format!(
                    "preview-limit must be 1-{}, got {}",
                    MAX_PREVIEW_LIMIT, limit
                ));
            }
        }
        if let Some(ref path) = self.data_file {
            if path.as_os_str().is_empty() {
                return Err("data-file must not be empty".to_string());
            }
        }
        Ok(())
    }

    /// Parse config from a KDL document.
    ///
    /// Unknown nodes are ignored; known nodes with the wrong value type are
    /// reported as errors.
    pub fn from_kdl(doc: &KdlDocument) -> Result<Self, String> {
        let mut config = Self::new();

        if let Some(value) = first_value(doc, "output-format") {
            let s = value
                .as_string()
                .ok_or_else(|| "output-format must be a string".to_string())?;
            config.output_format = Some(
                OutputFormat::parse(s)
                    .ok_or_else(|| format!("output-format must be \"human\" or \"json\", got {:?}", s))?,
            );
        }

        if let Some(value) = first_value(doc, "data-file") {
            let s = value
                .as_string()
                .ok_or_else(|| "data-file must be a string".to_string())?;
            config.data_file = Some(PathBuf::from(s));
        }

        if let Some(value) = first_value(doc, "preview-limit") {
            let i = value
                .as_integer()
                .ok_or_else(|| "preview-limit must be an integer".to_string())?;
            config.preview_limit = Some(
                usize::try_from(i).map_err(|_| format!("preview-limit out of range: {}", i))?,
            );
        }

        config.validate()?;
        Ok(config)
    }

    /// Convert config to a KDL document.
    pub fn to_kdl(&self) -> KdlDocument {
        let mut doc = KdlDocument::new();

        if let Some(format) = self.output_format {
            let mut node = KdlNode::new("output-format");
            node.push(KdlEntry::new(KdlValue::String(format.as_str().to_string())));
            doc.nodes_mut().push(node);
        }

        if let Some(ref path) = self.data_file {
            let mut node = KdlNode::new("data-file");
            node.push(KdlEntry::new(KdlValue::String(
                path.to_string_lossy().into_owned(),
            )));
            doc.nodes_mut().push(node);
        }

        if let Some(limit) = self.preview_limit {
            let mut node = KdlNode::new("preview-limit");
            node.push(KdlEntry::new(KdlValue::Integer(limit as i128)));
            doc.nodes_mut().push(node);
        }

        doc.autoformat();
        doc
    }

    /// Set one key from its textual form, as given on the command line.
    pub fn set(&mut self, key: &str, value: &str) -> Result<(), String> {
        let mut next = self.clone();
        match key {
            "output-format" => {
                next.output_format = Some(OutputFormat::parse(value).ok_or_else(|| {
                    format!("output-format must be \"human\" or \"json\", got {:?}", value)
                })?);
            }
            "data-file" => next.data_file = Some(PathBuf::from(value)),
            "preview-limit" => {
                next.preview_limit = Some(
                    value
                        .parse()
                        .map_err(|_| format!("preview-limit must be a number, got {:?}", value))?,
                );
            }
            _ => {
                return Err(format!(
                    "unknown config key {:?} (expected one of: {})",
                    key,
                    CONFIG_KEYS.join(", ")
                ));
            }
        }
        next.validate()?;
        *self = next;
        Ok(())
    }
}

fn first_value<'a>(doc: &'a KdlDocument, name: &str) -> Option<&'a KdlValue> {
    doc.get(name)
        .and_then(|node| node.entries().first())
        .map(|entry| entry.value())
}
