use crate::common::config_files::{resolve_data_path, StorageLocation};
use crate::store::SNIPPETS_FILE;
use anyhow::Context;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::PathBuf;

pub const SETTINGS_FILE: &str = "settings.json";

#[derive(Debug, Serialize, Deserialize, Clone, Default, PartialEq)]
pub struct Settings {
    /// Where `snippets.json` lives when `snippets_file` is not set.
    #[serde(default)]
    pub snippets_location: StorageLocation,
    /// Explicit path to the snippet file. Overrides `snippets_location`.
    #[serde(default)]
    pub snippets_file: Option<String>,
    /// When enabled the application initialises the logger at debug level.
    /// Defaults to `false` when the field is missing in the settings file.
    #[serde(default)]
    pub debug_logging: bool,
    /// Optional file receiving a copy of the log output.
    #[serde(default)]
    pub log_file: Option<String>,
    /// Per-plugin settings keyed by plugin name.
    #[serde(default)]
    pub plugin_settings: HashMap<String, serde_json::Value>,
}

impl Settings {
    pub fn load(path: &str) -> anyhow::Result<Self> {
        let content = std::fs::read_to_string(path).unwrap_or_default();
        if content.trim().is_empty() {
            return Ok(Self::default());
        }
        serde_json::from_str(&content).with_context(|| format!("parse settings file {path}"))
    }

    pub fn save(&self, path: &str) -> anyhow::Result<()> {
        let json = serde_json::to_string_pretty(self)?;
        std::fs::write(path, json).with_context(|| format!("write settings file {path}"))?;
        Ok(())
    }

    /// Path of the snippet file these settings point at.
    pub fn snippets_path(&self) -> anyhow::Result<PathBuf> {
        if let Some(file) = &self.snippets_file {
            return Ok(PathBuf::from(file));
        }
        resolve_data_path(self.snippets_location, SNIPPETS_FILE)
    }

    pub fn log_path(&self) -> Option<PathBuf> {
        self.log_file.as_ref().map(PathBuf::from)
    }
}
