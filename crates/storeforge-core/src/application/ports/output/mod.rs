//! Driven (output) ports - implemented by infrastructure.
//!
//! These traits define what the application needs from external systems.
//! The `storeforge-adapters` crate provides implementations.

use crate::domain::{ConfiguratorKind, PackageReference};
use crate::error::StoreforgeResult;
use std::path::Path;

/// Port for looking up the installed version of a package.
///
/// Implemented by:
/// - `storeforge_adapters::lockfile::ComposerLockSource` (production)
///
/// Returns `Ok(None)` when the package simply is not installed; the caller
/// turns that into the appropriate domain error. `Err` is reserved for a
/// missing or unreadable lock file.
pub trait VersionSource: Send + Sync {
    /// The exact version string recorded for `package`, if any.
    fn installed_version(&self, package: &PackageReference) -> StoreforgeResult<Option<String>>;
}

/// A single directory entry, as much of it as the resolver needs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DirEntryInfo {
    /// Final path component, not the full path.
    pub name: String,
    pub is_dir: bool,
}

/// Port for filesystem operations.
///
/// Implemented by:
/// - `storeforge_adapters::filesystem::LocalFilesystem` (production)
/// - `storeforge_adapters::filesystem::MemoryFilesystem` (testing)
pub trait Filesystem: Send + Sync {
    /// Check if path exists (file or directory).
    fn exists(&self, path: &Path) -> bool;

    /// Check if path exists and is a regular file.
    fn is_file(&self, path: &Path) -> bool;

    /// List the immediate children of a directory.
    fn list_entries(&self, path: &Path) -> StoreforgeResult<Vec<DirEntryInfo>>;

    /// Read a file's full contents as UTF-8.
    fn read_to_string(&self, path: &Path) -> StoreforgeResult<String>;

    /// Write content to a file, creating it if needed.
    fn write_file(&self, path: &Path, content: &str) -> StoreforgeResult<()>;

    /// Create a directory and all parent directories.
    fn create_dir_all(&self, path: &Path) -> StoreforgeResult<()>;

    /// Copy a file, overwriting the destination.
    fn copy_file(&self, from: &Path, to: &Path) -> StoreforgeResult<()>;
}

/// Captured result of a finished process.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProcessOutput {
    /// Exit status; non-zero means failure.
    pub status: i32,
    pub stdout: String,
    pub stderr: String,
}

impl ProcessOutput {
    pub fn success(&self) -> bool {
        self.status == 0
    }
}

/// Port for running installation steps.
///
/// Implemented by:
/// - `storeforge_adapters::process::ShellRunner` (production)
///
/// Steps are whole shell command lines taken from manifests, so the
/// implementation hands them to a shell rather than parsing argv itself.
pub trait ProcessRunner: Send + Sync {
    /// Run a shell command line with `cwd` as the working directory.
    ///
    /// `Err` means the process could not be started; a started process that
    /// exits non-zero is an `Ok` with a non-zero status.
    fn run_shell(&self, command: &str, cwd: &Path) -> StoreforgeResult<ProcessOutput>;
}

/// Port for applying one kind of configuration edit.
///
/// Implemented by:
/// - `storeforge_adapters::configurators::YamlNodeConfigurator`
/// - `storeforge_adapters::configurators::TwigHooksConfigurator`
///
/// Implementations are registered in a `ConfiguratorRegistry` keyed by
/// [`ConfiguratorKind`]; manifests select them by kind tag.
pub trait Configurator: Send + Sync {
    /// The kind tag this implementation answers to.
    fn kind(&self) -> ConfiguratorKind;

    /// Apply the edit described by `options`, relative to `project_root`.
    fn apply(&self, project_root: &Path, options: &serde_json::Value) -> StoreforgeResult<()>;
}
