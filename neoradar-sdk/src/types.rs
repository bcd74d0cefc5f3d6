//! Plugin identity and host environment

use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::PathBuf;

/// Static identity a plugin reports to the host.
///
/// Returned by [`Plugin::metadata`](crate::Plugin::metadata) and handed back to
/// the plugin in `initialize`. Never changes for the life of an instance.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct PluginMetadata {
    /// Plugin name
    pub name: String,
    /// Plugin version (free-form, usually semver)
    pub version: String,
    /// Plugin author
    pub author: String,
}

impl PluginMetadata {
    /// Create metadata from its three parts
    pub fn new(
        name: impl Into<String>,
        version: impl Into<String>,
        author: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            version: version.into(),
            author: author.into(),
        }
    }
}

impl fmt::Display for PluginMetadata {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} v{} by {}", self.name, self.version, self.author)
    }
}

/// Identity and environment of the client application.
///
/// Supplied once at initialization; read-only to the plugin.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ClientInformation {
    /// Client application name
    pub client_name: String,
    /// Client application version
    pub client_version: String,
    /// Version of the flight data processing system
    pub fdps_version: String,
    /// Client and FDPS versions combined into one display string
    pub combined_version: String,
    /// Directory where the client keeps user documents (packages, plugin data)
    pub documents_path: PathBuf,
}

/// SDK version triple.
///
/// Exported by every plugin binary through the `GetPluginSDKVersion*` symbols so
/// a host can check compatibility before creating an instance.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct SdkVersion {
    pub major: u32,
    pub minor: u32,
    pub patch: u32,
}

impl SdkVersion {
    pub const fn new(major: u32, minor: u32, patch: u32) -> Self {
        Self {
            major,
            minor,
            patch,
        }
    }
}

impl fmt::Display for SdkVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}.{}", self.major, self.minor, self.patch)
    }
}
