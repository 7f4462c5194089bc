//! User configuration and preferences

use crate::error::{LazyClaudeError, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq, Eq)]
#[serde(default)]
pub struct UserConfig {
    /// Global store root; `~` and `$VARS` are expanded
    pub global_root: Option<String>,
    /// Name of the managed directory inside each project
    pub project_subdir: Option<String>,
    /// Where to write the log file
    pub log_file: Option<String>,
}

impl UserConfig {
    /// Get the config file path (~/.config/lazyclaude/config.json)
    pub fn config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join("lazyclaude").join("config.json"))
    }

    /// Load config from the default location, or defaults if it doesn't exist
    pub fn load() -> Result<Self> {
        let path = Self::config_path().ok_or_else(|| {
            LazyClaudeError::ConfigError("Could not determine config directory".to_string())
        })?;
        Self::load_from(&path)
    }

    pub fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }

        let contents = fs::read_to_string(path).map_err(|e| {
            LazyClaudeError::ConfigError(format!("Failed to read config file: {}", e))
        })?;

        serde_json::from_str(&contents).map_err(|e| {
            LazyClaudeError::ConfigError(format!("Failed to parse config file: {}", e))
        })
    }

    /// Save config to the given path
    pub fn save_to(&self, path: &Path) -> Result<()> {
        // Create directory if it doesn't exist
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).map_err(|e| {
                LazyClaudeError::ConfigError(format!("Failed to create config directory: {}", e))
            })?;
        }

        let contents = serde_json::to_string_pretty(self).map_err(|e| {
            LazyClaudeError::ConfigError(format!("Failed to serialize config: {}", e))
        })?;

        fs::write(path, contents).map_err(|e| {
            LazyClaudeError::ConfigError(format!("Failed to write config file: {}", e))
        })?;

        Ok(())
    }
}
