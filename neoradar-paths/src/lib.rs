//! Filesystem locations for NeoRadar.
//!
//! Host configuration and the plugin registry follow XDG paths on every
//! platform. The documents directory handed to plugins in
//! `ClientInformation` follows the platform's own documents folder, since
//! users browse it directly.

use std::path::PathBuf;

/// Get the NeoRadar config directory.
///
/// Returns `$XDG_CONFIG_HOME/neoradar` if set, otherwise `~/.config/neoradar`.
/// Host config, plugins and the plugin registry live here.
///
/// # Examples
///
/// ```
/// use neoradar_paths::config_dir;
///
/// let plugins = config_dir().join("plugins");
/// ```
pub fn config_dir() -> PathBuf {
    if let Ok(xdg_config) = std::env::var("XDG_CONFIG_HOME") {
        PathBuf::from(xdg_config).join("neoradar")
    } else if let Some(home) = dirs::home_dir() {
        home.join(".config/neoradar")
    } else {
        PathBuf::from(".config/neoradar")
    }
}

/// Get the NeoRadar data directory.
///
/// Returns `$XDG_DATA_HOME/neoradar` if set, otherwise `~/.local/share/neoradar`.
pub fn data_dir() -> PathBuf {
    if let Ok(xdg_data) = std::env::var("XDG_DATA_HOME") {
        PathBuf::from(xdg_data).join("neoradar")
    } else if let Some(home) = dirs::home_dir() {
        home.join(".local/share/neoradar")
    } else {
        PathBuf::from(".local/share/neoradar")
    }
}

/// Directory of user-installed plugins (`<config>/plugins`)
pub fn plugin_dir() -> PathBuf {
    config_dir().join("plugins")
}

/// Get the NeoRadar documents directory.
///
/// Returns `$NEORADAR_DOCUMENTS` if set, otherwise `NeoRadar` inside the
/// platform documents folder, falling back to the data directory.
pub fn documents_dir() -> PathBuf {
    if let Ok(dir) = std::env::var("NEORADAR_DOCUMENTS") {
        PathBuf::from(dir)
    } else if let Some(documents) = dirs::document_dir() {
        documents.join("NeoRadar")
    } else {
        data_dir().join("documents")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;

    #[test]
    #[serial]
    fn test_config_dir_ends_with_neoradar() {
        let path = config_dir();
        assert!(
            path.ends_with("neoradar"),
            "config_dir should end with 'neoradar'"
        );
    }

    #[test]
    #[serial]
    fn test_plugin_dir_is_under_config() {
        assert_eq!(plugin_dir(), config_dir().join("plugins"));
    }

    #[test]
    #[serial]
    fn test_config_dir_respects_xdg_env() {
        unsafe {
            std::env::set_var("XDG_CONFIG_HOME", "/tmp/test-config");
        }
        let path = config_dir();
        assert_eq!(path, PathBuf::from("/tmp/test-config/neoradar"));
        unsafe {
            std::env::remove_var("XDG_CONFIG_HOME");
        }
    }

    #[test]
    #[serial]
    fn test_data_dir_respects_xdg_env() {
        unsafe {
            std::env::set_var("XDG_DATA_HOME", "/tmp/test-data");
        }
        let path = data_dir();
        assert_eq!(path, PathBuf::from("/tmp/test-data/neoradar"));
        unsafe {
            std::env::remove_var("XDG_DATA_HOME");
        }
    }

    #[test]
    #[serial]
    fn test_documents_dir_override() {
        unsafe {
            std::env::set_var("NEORADAR_DOCUMENTS", "/tmp/test-docs");
        }
        assert_eq!(documents_dir(), PathBuf::from("/tmp/test-docs"));
        unsafe {
            std::env::remove_var("NEORADAR_DOCUMENTS");
        }
    }
}
