use anyhow::{anyhow, Context};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Directory name used under the platform config directory.
pub const APP_DIR_NAME: &str = "snippet_launcher";

/// Where the snippet file lives when no explicit path is configured.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StorageLocation {
    /// Beside the running executable.
    #[default]
    NextToExecutable,
    /// The user's configuration directory, e.g. `~/.config/snippet_launcher`.
    ConfigDir,
}

pub fn path_from_exe_path(exe_path: &Path, file_name: &str) -> anyhow::Result<PathBuf> {
    let parent = exe_path
        .parent()
        .ok_or_else(|| anyhow!("executable path has no parent: {}", exe_path.display()))?;
    Ok(parent.join(file_name))
}

pub fn path_in_config_dir(config_dir: &Path, file_name: &str) -> PathBuf {
    config_dir.join(APP_DIR_NAME).join(file_name)
}

/// Resolve `file_name` according to `location`.
pub fn resolve_data_path(location: StorageLocation, file_name: &str) -> anyhow::Result<PathBuf> {
    match location {
        StorageLocation::NextToExecutable => {
            let exe_path = std::env::current_exe().context("resolve current executable")?;
            path_from_exe_path(&exe_path, file_name)
        }
        StorageLocation::ConfigDir => {
            let dir = dirs_next::config_dir()
                .ok_or_else(|| anyhow!("no configuration directory on this platform"))?;
            Ok(path_in_config_dir(&dir, file_name))
        }
    }
}
