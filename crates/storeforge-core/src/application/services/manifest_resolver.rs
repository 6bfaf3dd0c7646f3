//! Manifest resolution: map an installed plugin version to the manifest
//! directory that covers it.
//!
//! Manifests are laid out as `<base>/<vendor>/<name>/<major.minor>/manifest.json`.
//! Resolution picks the greatest `major.minor` directory that does not exceed
//! the installed version's own `major.minor`, so a manifest written for `1.5`
//! keeps serving `1.6` and `1.7` installs until a newer bracket is published.
//!
//! Resolution is deterministic and side-effect free: no retries, no fallback
//! versions, no best-guess matches.

use std::path::{Path, PathBuf};
use tracing::{debug, instrument};

use crate::{
    application::ports::{Filesystem, VersionSource},
    domain::{
        manifest::MANIFEST_FILE, normalize_installed, DomainError, Manifest, MinorVersion,
        PackageReference,
    },
    error::StoreforgeResult,
};

/// A successfully resolved manifest, with the evidence of how it was chosen.
#[derive(Debug, Clone, PartialEq)]
pub struct ResolvedManifest {
    pub package: PackageReference,
    /// Exact version string from the lock file.
    pub installed: String,
    /// `major.minor` floor target derived from `installed`.
    pub target: MinorVersion,
    /// Version directory that won the floor match.
    pub matched: MinorVersion,
    /// Full path of the manifest file that was loaded.
    pub path: PathBuf,
    pub manifest: Manifest,
}

/// Resolves and loads manifests for installed plugins.
pub struct ManifestResolver {
    versions: Box<dyn VersionSource>,
    filesystem: Box<dyn Filesystem>,
    base_dir: PathBuf,
}

impl ManifestResolver {
    /// Create a resolver rooted at `base_dir`, the directory holding
    /// per-package manifest trees.
    pub fn new(
        versions: Box<dyn VersionSource>,
        filesystem: Box<dyn Filesystem>,
        base_dir: impl Into<PathBuf>,
    ) -> Self {
        Self {
            versions,
            filesystem,
            base_dir: base_dir.into(),
        }
    }

    /// Resolve the manifest covering the installed version of `package`.
    ///
    /// Fails with a distinct domain error at each stage: unknown package
    /// directory, package not installed, unparseable installed version, or
    /// no bracket at or below the target.
    #[instrument(skip(self), fields(package = %package))]
    pub fn resolve(&self, package: &PackageReference) -> StoreforgeResult<ResolvedManifest> {
        let package_dir = self
            .base_dir
            .join(package.vendor())
            .join(package.name());

        if !self.filesystem.exists(&package_dir) {
            return Err(DomainError::UnsupportedPlugin {
                package: package.to_string(),
                base_dir: package_dir,
            }
            .into());
        }

        let installed = self
            .versions
            .installed_version(package)?
            .ok_or_else(|| DomainError::PackageNotInstalled {
                package: package.to_string(),
            })?;

        let target = normalize_installed(package, &installed)?;
        debug!(installed = %installed, target = %target, "Normalized installed version");

        let matched = self.floor_match(package, &package_dir, target)?;
        let path = package_dir.join(matched.to_string()).join(MANIFEST_FILE);
        let manifest = self.load(&path)?;

        debug!(matched = %matched, path = %path.display(), "Manifest resolved");

        Ok(ResolvedManifest {
            package: package.clone(),
            installed,
            target,
            matched,
            path,
            manifest,
        })
    }

    /// Load a manifest from an explicit path.
    ///
    /// Used when a preset pins a manifest directly instead of going through
    /// version resolution.
    pub fn load(&self, path: &Path) -> StoreforgeResult<Manifest> {
        if !self.filesystem.is_file(path) {
            return Err(DomainError::ManifestFileMissing {
                path: path.to_path_buf(),
            }
            .into());
        }
        let raw = self.filesystem.read_to_string(path)?;
        Ok(Manifest::from_json(path, &raw)?)
    }

    /// Pick the greatest candidate version <= `target` that actually has a
    /// manifest file behind it.
    ///
    /// Directory names that are not bare `major.minor` versions are ignored,
    /// not errors; a matching directory without a manifest file is skipped
    /// the same way. Exhausting the candidates is `NoManifestMatch`.
    fn floor_match(
        &self,
        package: &PackageReference,
        package_dir: &Path,
        target: MinorVersion,
    ) -> StoreforgeResult<MinorVersion> {
        let mut candidates: Vec<MinorVersion> = self
            .filesystem
            .list_entries(package_dir)?
            .into_iter()
            .filter(|e| e.is_dir)
            .filter_map(|e| e.name.parse().ok())
            .collect();
        candidates.sort_unstable_by(|a, b| b.cmp(a));

        for candidate in candidates {
            if candidate > target {
                continue;
            }
            let manifest_path = package_dir.join(candidate.to_string()).join(MANIFEST_FILE);
            if self.filesystem.is_file(&manifest_path) {
                return Ok(candidate);
            }
            debug!(candidate = %candidate, "Version directory has no manifest file, skipping");
        }

        Err(DomainError::NoManifestMatch {
            package: package.to_string(),
            target: target.to_string(),
            base_dir: package_dir.to_path_buf(),
        }
        .into())
    }
}

// ── tests ─────────────────────────────────────────────────────────────────────
