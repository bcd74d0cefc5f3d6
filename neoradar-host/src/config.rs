//! Host configuration.
//!
//! Layers, later ones overriding earlier ones field by field:
//!
//! 1. built-in defaults
//! 2. the user file, `$XDG_CONFIG_HOME/neoradar/host.toml`
//! 3. an explicit file passed by the caller
//!
//! ```toml
//! [plugins]
//! dirs = ["/opt/neoradar/plugins"]
//! allow_patch_mismatch = true
//!
//! [client]
//! name = "NeoRadar"
//! version = "1.0.3"
//!
//! [package]
//! path = "/home/me/Documents/NeoRadar/packages/UK"
//! ```

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use neoradar_sdk::ClientInformation;

use crate::error::PluginHostError;
use crate::host::PluginHostConfig;

pub const CONFIG_FILE_NAME: &str = "host.toml";
pub const DEFAULT_CLIENT_NAME: &str = "NeoRadar";

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RawPluginsSection {
    pub dirs: Option<Vec<PathBuf>>,
    pub allow_patch_mismatch: Option<bool>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RawClientSection {
    pub name: Option<String>,
    pub version: Option<String>,
    pub fdps_version: Option<String>,
    pub combined_version: Option<String>,
    pub documents_path: Option<PathBuf>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RawPackageSection {
    pub path: Option<PathBuf>,
}

/// One configuration file, every field optional
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RawHostConfig {
    #[serde(default)]
    pub plugins: RawPluginsSection,
    #[serde(default)]
    pub client: RawClientSection,
    #[serde(default)]
    pub package: RawPackageSection,
}

/// Final configuration with defaults applied
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct HostConfig {
    /// Directories searched for plugins, in order
    pub plugin_dirs: Vec<PathBuf>,
    pub allow_patch_mismatch: bool,
    pub package_path: PathBuf,
    pub client: ClientInformation,
}

impl HostConfig {
    /// Load defaults, then the user file, then `explicit` if given.
    ///
    /// A missing user file is skipped; a missing explicit file is an error.
    pub fn load(explicit: Option<&Path>) -> Result<Self, PluginHostError> {
        let mut raw = RawHostConfig::default();

        let user_path = Self::user_config_path();
        if user_path.exists() {
            raw = Self::merge_raw(raw, Self::read(&user_path)?);
        }

        if let Some(path) = explicit {
            raw = Self::merge_raw(raw, Self::read(path)?);
        }

        Ok(Self::finalize(raw))
    }

    pub fn user_config_path() -> PathBuf {
        neoradar_paths::config_dir().join(CONFIG_FILE_NAME)
    }

    fn read(path: &Path) -> Result<RawHostConfig, PluginHostError> {
        let contents = std::fs::read_to_string(path).map_err(|e| {
            PluginHostError::Config(format!("cannot read {}: {e}", path.display()))
        })?;
        toml::from_str(&contents)
            .map_err(|e| PluginHostError::Config(format!("{}: {e}", path.display())))
    }

    /// Overlay values override base only if explicitly set
    fn merge_raw(base: RawHostConfig, overlay: RawHostConfig) -> RawHostConfig {
        RawHostConfig {
            plugins: RawPluginsSection {
                dirs: overlay.plugins.dirs.or(base.plugins.dirs),
                allow_patch_mismatch: overlay
                    .plugins
                    .allow_patch_mismatch
                    .or(base.plugins.allow_patch_mismatch),
            },
            client: RawClientSection {
                name: overlay.client.name.or(base.client.name),
                version: overlay.client.version.or(base.client.version),
                fdps_version: overlay.client.fdps_version.or(base.client.fdps_version),
                combined_version: overlay
                    .client
                    .combined_version
                    .or(base.client.combined_version),
                documents_path: overlay.client.documents_path.or(base.client.documents_path),
            },
            package: RawPackageSection {
                path: overlay.package.path.or(base.package.path),
            },
        }
    }

    fn finalize(raw: RawHostConfig) -> Self {
        let client_version = raw
            .client
            .version
            .unwrap_or_else(|| env!("CARGO_PKG_VERSION").to_string());
        let fdps_version = raw
            .client
            .fdps_version
            .unwrap_or_else(|| client_version.clone());
        let combined_version = raw
            .client
            .combined_version
            .unwrap_or_else(|| format!("{client_version}/{fdps_version}"));
        let documents_path = raw
            .client
            .documents_path
            .unwrap_or_else(neoradar_paths::documents_dir);

        Self {
            plugin_dirs: raw
                .plugins
                .dirs
                .unwrap_or_else(|| vec![neoradar_paths::plugin_dir()]),
            allow_patch_mismatch: raw.plugins.allow_patch_mismatch.unwrap_or(true),
            package_path: raw
                .package
                .path
                .unwrap_or_else(|| documents_path.join("packages")),
            client: ClientInformation {
                client_name: raw
                    .client
                    .name
                    .unwrap_or_else(|| DEFAULT_CLIENT_NAME.to_string()),
                client_version,
                fdps_version,
                combined_version,
                documents_path,
            },
        }
    }

    /// Settings for [`PluginHost`](crate::PluginHost).
    ///
    /// The registry lives next to the user plugin directory.
    pub fn plugin_host_config(&self) -> PluginHostConfig {
        PluginHostConfig {
            plugin_dirs: self.plugin_dirs.clone(),
            registry_path: neoradar_paths::plugin_dir().join(crate::host::REGISTRY_FILE_NAME),
            client: self.client.clone(),
            allow_patch_mismatch: self.allow_patch_mismatch,
        }
    }
}

impl Default for HostConfig {
    fn default() -> Self {
        Self::finalize(RawHostConfig::default())
    }
}
