//! SDK version compatibility between the host and a plugin binary.
//!
//! A plugin reports the SDK version it was built against through the
//! `GetPluginSDKVersion*` symbols. The host checks it before creating an
//! instance:
//!
//! - the major version must match
//! - the plugin's minor version must not be newer than the host's
//! - a different patch version loads, with a warning

use serde::Serialize;

use neoradar_sdk::{SDK_VERSION, SdkVersion};

/// Result of an SDK version check
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum VersionCheck {
    /// Versions are identical
    Compatible,
    /// Loadable, but the patch level differs
    PatchMismatch { host: SdkVersion, plugin: SdkVersion },
    /// Plugin must not be loaded
    Incompatible { host: SdkVersion, plugin: SdkVersion },
}

impl VersionCheck {
    /// Whether the plugin may be instantiated
    pub fn is_loadable(&self) -> bool {
        !matches!(self, Self::Incompatible { .. })
    }
}

/// Check a plugin's SDK version against the version this host implements.
///
/// # Example
///
/// ```
/// use neoradar_host::version::{check_sdk_compatibility, VersionCheck};
/// use neoradar_sdk::{SDK_VERSION, SdkVersion};
///
/// assert_eq!(check_sdk_compatibility(SDK_VERSION), VersionCheck::Compatible);
/// assert!(!check_sdk_compatibility(SdkVersion::new(9, 0, 0)).is_loadable());
/// ```
pub fn check_sdk_compatibility(plugin: SdkVersion) -> VersionCheck {
    check_against(SDK_VERSION, plugin)
}

pub(crate) fn check_against(host: SdkVersion, plugin: SdkVersion) -> VersionCheck {
    if plugin.major != host.major || plugin.minor > host.minor {
        VersionCheck::Incompatible { host, plugin }
    } else if plugin.minor == host.minor && plugin.patch != host.patch {
        VersionCheck::PatchMismatch { host, plugin }
    } else {
        VersionCheck::Compatible
    }
}

/// Convert the raw `c_int` components a plugin reports.
///
/// Returns `None` if any component is negative.
pub fn from_raw_components(major: i32, minor: i32, patch: i32) -> Option<SdkVersion> {
    Some(SdkVersion::new(
        u32::try_from(major).ok()?,
        u32::try_from(minor).ok()?,
        u32::try_from(patch).ok()?,
    ))
}
