//! Plugin host error types

use std::path::PathBuf;
use thiserror::Error;

use neoradar_sdk::SdkVersion;

use crate::host::PluginState;
use crate::lifecycle::LifecycleState;

/// Errors that can occur in the plugin host
#[derive(Error, Debug)]
pub enum PluginHostError {
    /// Plugin directory not found
    #[error("Plugin directory not found: {path}")]
    PluginDirNotFound { path: PathBuf },

    /// Plugin library not found in directory
    #[error("Plugin library not found in {dir}")]
    LibraryNotFound { dir: PathBuf },

    /// Plugin was built against an SDK this host cannot run
    #[error("SDK version mismatch: host implements {host}, plugin was built against {plugin}")]
    SdkVersionMismatch { host: SdkVersion, plugin: SdkVersion },

    /// A version symbol returned a negative component
    #[error("Plugin reported an invalid SDK version: {major}.{minor}.{patch}")]
    InvalidSdkVersion { major: i32, minor: i32, patch: i32 },

    /// Failed to load dynamic library or resolve a symbol
    #[error("Failed to load plugin library: {0}")]
    LibraryLoad(#[from] libloading::Error),

    /// `CreatePluginInstance` returned a null pointer
    #[error("Plugin '{name}' returned a null instance")]
    NullInstance { name: String },

    /// A lifecycle call that the current state does not allow
    #[error("Plugin '{name}' cannot {operation} while {state}")]
    InvalidLifecycle {
        name: String,
        operation: &'static str,
        state: LifecycleState,
    },

    /// The plugin panicked inside a lifecycle call and was marked failed
    #[error("Plugin '{name}' panicked during {operation}")]
    Panicked {
        name: String,
        operation: &'static str,
    },

    /// A plugin with the same metadata name is already loaded
    #[error("Plugin '{name}' is already loaded")]
    AlreadyLoaded { name: String },

    /// Registry error (parsing, saving, etc.)
    #[error("Registry error: {0}")]
    Registry(String),

    /// Host configuration error
    #[error("Config error: {0}")]
    Config(String),

    /// The plugin is loaded but disabled or failed
    #[error("Plugin '{name}' is {state}")]
    Unavailable { name: String, state: PluginState },

    /// Plugin not found
    #[error("Plugin '{name}' not found")]
    NotFound { name: String },

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_plugin_dir_not_found_display() {
        let err = PluginHostError::PluginDirNotFound {
            path: PathBuf::from("/some/path"),
        };
        assert!(err.to_string().contains("/some/path"));
    }

    #[test]
    fn test_sdk_version_mismatch_display() {
        let err = PluginHostError::SdkVersionMismatch {
            host: SdkVersion::new(1, 0, 3),
            plugin: SdkVersion::new(2, 0, 0),
        };
        let msg = err.to_string();
        assert!(msg.contains("1.0.3"));
        assert!(msg.contains("2.0.0"));
    }

    #[test]
    fn test_invalid_lifecycle_display() {
        let err = PluginHostError::InvalidLifecycle {
            name: "scope".to_string(),
            operation: "initialize",
            state: LifecycleState::Active,
        };
        assert_eq!(err.to_string(), "Plugin 'scope' cannot initialize while active");
    }

    #[test]
    fn test_not_found_display() {
        let err = PluginHostError::NotFound {
            name: "test-plugin".to_string(),
        };
        assert!(err.to_string().contains("test-plugin"));
    }

    #[test]
    fn test_io_error_conversion() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "file not found");
        let err: PluginHostError = io_err.into();
        assert!(matches!(err, PluginHostError::Io(_)));
    }
}
