//! `config show` and `config set`.

use super::{Output, json_string};
use crate::config::{
    ResolvedConfig, project_config_path, read_config, system_config_path, write_config,
};
use crate::{Error, Result};
use serde::Serialize;
use std::path::Path;

#[derive(Debug, Serialize)]
pub struct ConfigEntry {
    pub key: &'static str,
    pub value: String,
    pub source: String,
}

#[derive(Debug, Serialize)]
pub struct ConfigShow {
    pub entries: Vec<ConfigEntry>,
    pub project_file: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub system_file: Option<String>,
}

impl Output for ConfigShow {
    fn to_json(&self) -> String {
        json_string(self)
    }

    fn to_human(&self) -> String {
        let mut lines: Vec<String> = self
            .entries
            .iter()
            .map(|e| format!("{:<14} {:<24} ({})", e.key, e.value, e.source))
            .collect();
        lines.push(String::new());
        lines.push(format!("Project config: {}", self.project_file));
        match &self.system_file {
            Some(path) => lines.push(format!("System config:  {}", path)),
            None => lines.push("System config:  (no config directory)".to_string()),
        }
        lines.join("\n")
    }
}

/// Report the resolved configuration and where each value came from.
pub fn config_show(project_root: &Path, resolved: &ResolvedConfig) -> ConfigShow {
    let entries = vec![
        ConfigEntry {
            key: "output-format",
            value: resolved.output_format.value.to_string(),
            source: resolved.output_format.source.to_string(),
        },
        ConfigEntry {
            key: "data-file",
            value: resolved.data_file.value.display().to_string(),
            source: resolved.data_file.source.to_string(),
        },
        ConfigEntry {
            key: "preview-limit",
            value: resolved.preview_limit.value.to_string(),
            source: resolved.preview_limit.source.to_string(),
        },
    ];

    ConfigShow {
        entries,
        project_file: project_config_path(project_root).display().to_string(),
        system_file: system_config_path().map(|p| p.display().to_string()),
    }
}

#[derive(Debug, Serialize)]
pub struct ConfigSet {
    pub key: String,
    pub value: String,
    pub path: String,
}

impl Output for ConfigSet {
    fn to_json(&self) -> String {
        json_string(self)
    }

    fn to_human(&self) -> String {
        format!("Set {} = {} in {}", self.key, self.value, self.path)
    }
}

/// Validate and write one key to the project (or system) config file.
pub fn config_set(project_root: &Path, key: &str, value: &str, system: bool) -> Result<ConfigSet> {
    let path = if system {
        system_config_path()
            .ok_or_else(|| Error::Config("no system config directory available".to_string()))?
    } else {
        project_config_path(project_root)
    };

    let mut config = read_config(&path)?;
    config.set(key, value).map_err(Error::InvalidInput)?;
    write_config(&path, &config)?;

    tracing::debug!(key, path = %path.display(), "config updated");
    Ok(ConfigSet {
        key: key.to_string(),
        value: value.to_string(),
        path: path.display().to_string(),
    })
}
