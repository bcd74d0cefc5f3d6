//! Plugin registry - tracks enabled/disabled plugins

use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::path::Path;

use crate::error::PluginHostError;

/// Registry of enabled plugins
///
/// Stored as TOML in `~/.config/neoradar/plugins/registry.toml`
#[derive(Debug, Default, Serialize, Deserialize)]
pub struct PluginRegistry {
    /// Names of enabled plugins (directory names under a plugin dir)
    #[serde(default)]
    pub enabled: BTreeSet<String>,
}

impl PluginRegistry {
    /// Load registry from a TOML file
    ///
    /// Returns an empty registry if the file doesn't exist.
    pub fn load(path: &Path) -> Result<Self, PluginHostError> {
        if !path.exists() {
            return Ok(Self::default());
        }
        let content = std::fs::read_to_string(path)?;
        toml::from_str(&content).map_err(|e| PluginHostError::Registry(e.to_string()))
    }

    /// Save registry to a TOML file, creating parent directories
    pub fn save(&self, path: &Path) -> Result<(), PluginHostError> {
        let content =
            toml::to_string_pretty(self).map_err(|e| PluginHostError::Registry(e.to_string()))?;

        if let Some(parent) = path.parent().filter(|p| !p.exists()) {
            std::fs::create_dir_all(parent)?;
        }

        std::fs::write(path, content)?;
        Ok(())
    }

    pub fn is_enabled(&self, name: &str) -> bool {
        self.enabled.contains(name)
    }

    /// Returns `false` if the plugin was already enabled
    pub fn enable(&mut self, name: &str) -> bool {
        self.enabled.insert(name.to_string())
    }

    /// Returns `false` if the plugin was not enabled
    pub fn disable(&mut self, name: &str) -> bool {
        self.enabled.remove(name)
    }

    /// Enabled plugin names in sorted order
    pub fn enabled_plugins(&self) -> impl Iterator<Item = &str> {
        self.enabled.iter().map(String::as_str)
    }
}
