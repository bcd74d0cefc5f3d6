use std::path::{Path, PathBuf};
use std::sync::RwLock;

use neoradar_sdk::package::PackageApi;

use super::{read, write};

/// Location of the active sector package
#[derive(Debug)]
pub struct PackageInfo {
    path: RwLock<PathBuf>,
}

impl PackageInfo {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: RwLock::new(path.into()),
        }
    }

    /// Switch to another package, e.g. after an AIRAC update
    pub fn set_path(&self, path: &Path) {
        *write(&self.path) = path.to_path_buf();
    }
}

impl PackageApi for PackageInfo {
    fn package_path(&self) -> PathBuf {
        read(&self.path).clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_set_path() {
        let package = PackageInfo::new("/packages/UK");
        package.set_path(Path::new("/packages/UK-2410"));
        assert_eq!(package.package_path(), PathBuf::from("/packages/UK-2410"));
    }
}
