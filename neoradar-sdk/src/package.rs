//! Package capability module

use std::path::PathBuf;

/// Access to the active sector package
pub trait PackageApi: Send + Sync {
    /// Filesystem path of the active package
    fn package_path(&self) -> PathBuf;
}
