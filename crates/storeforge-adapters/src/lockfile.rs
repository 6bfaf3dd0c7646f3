//! Composer lock file adapter implementing the `VersionSource` port.
//!
//! Reads `composer.lock` on every lookup rather than caching: the prepare
//! phase rewrites the lock file mid-run, and the install phase must see the
//! entries it added.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use serde::Deserialize;
use tracing::debug;

use storeforge_core::{
    application::{
        ports::{Filesystem, VersionSource},
        ApplicationError,
    },
    domain::PackageReference,
    error::StoreforgeResult,
};

/// The subset of `composer.lock` the version lookup needs.
#[derive(Debug, Deserialize)]
struct LockFile {
    #[serde(default)]
    packages: Vec<LockedPackage>,
    #[serde(default, rename = "packages-dev")]
    packages_dev: Vec<LockedPackage>,
}

#[derive(Debug, Deserialize)]
struct LockedPackage {
    name: String,
    version: String,
}

/// `VersionSource` backed by a project's `composer.lock`.
pub struct ComposerLockSource {
    filesystem: Arc<dyn Filesystem>,
    lock_path: PathBuf,
}

impl ComposerLockSource {
    /// Point at a lock file directly.
    pub fn new(filesystem: Arc<dyn Filesystem>, lock_path: impl Into<PathBuf>) -> Self {
        Self {
            filesystem,
            lock_path: lock_path.into(),
        }
    }

    /// Conventional location: `<project_root>/composer.lock`.
    pub fn for_project(filesystem: Arc<dyn Filesystem>, project_root: &Path) -> Self {
        Self::new(filesystem, project_root.join("composer.lock"))
    }

    fn load(&self) -> StoreforgeResult<LockFile> {
        if !self.filesystem.is_file(&self.lock_path) {
            return Err(ApplicationError::LockfileError {
                path: self.lock_path.clone(),
                reason: "File not found. Run the package manager first".into(),
            }
            .into());
        }
        let raw = self.filesystem.read_to_string(&self.lock_path)?;
        serde_json::from_str(&raw).map_err(|e| {
            ApplicationError::LockfileError {
                path: self.lock_path.clone(),
                reason: e.to_string(),
            }
            .into()
        })
    }
}

impl VersionSource for ComposerLockSource {
    fn installed_version(&self, package: &PackageReference) -> StoreforgeResult<Option<String>> {
        let lock = self.load()?;
        let wanted = package.to_string();

        let found = lock
            .packages
            .iter()
            .chain(lock.packages_dev.iter())
            .find(|p| p.name == wanted)
            .map(|p| p.version.clone());

        debug!(package = %wanted, version = ?found, "Lock file lookup");
        Ok(found)
    }
}

// ── tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use crate::filesystem::MemoryFilesystem;
    use storeforge_core::error::StoreforgeError;

    const LOCK: &str = r#"{
        "packages": [
            {"name": "acme/cms-plugin", "version": "v1.7.2", "source": {"type": "git"}},
            {"name": "acme/wishlist-plugin", "version": "2.0.0"}
        ],
        "packages-dev": [
            {"name": "acme/test-helper", "version": "0.3.1"}
        ]
    }"#;

    fn source(content: &str) -> ComposerLockSource {
        let fs = MemoryFilesystem::new();
        fs.seed_file("/app/composer.lock", content);
        ComposerLockSource::for_project(Arc::new(fs), Path::new("/app"))
    }

    fn pkg(s: &str) -> PackageReference {
        s.parse().unwrap()
    }

    #[test]
    fn finds_regular_packages() {
        let version = source(LOCK)
            .installed_version(&pkg("acme/cms-plugin"))
            .unwrap();
        assert_eq!(version.as_deref(), Some("v1.7.2"));
    }

    #[test]
    fn finds_dev_packages() {
        let version = source(LOCK)
            .installed_version(&pkg("acme/test-helper"))
            .unwrap();
        assert_eq!(version.as_deref(), Some("0.3.1"));
    }

    #[test]
    fn unknown_package_is_none_not_an_error() {
        let version = source(LOCK)
            .installed_version(&pkg("acme/unknown"))
            .unwrap();
        assert!(version.is_none());
    }

    #[test]
    fn missing_lock_file_is_a_lockfile_error() {
        let fs = MemoryFilesystem::new();
        let source = ComposerLockSource::for_project(Arc::new(fs), Path::new("/app"));
        let err = source.installed_version(&pkg("acme/cms-plugin")).unwrap_err();
        assert!(matches!(
            err,
            StoreforgeError::Application(ApplicationError::LockfileError { .. })
        ));
    }

    #[test]
    fn malformed_lock_file_is_a_lockfile_error() {
        let err = source("not json")
            .installed_version(&pkg("acme/cms-plugin"))
            .unwrap_err();
        assert!(matches!(
            err,
            StoreforgeError::Application(ApplicationError::LockfileError { .. })
        ));
    }
}
