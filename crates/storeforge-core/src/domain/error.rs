//! Domain error taxonomy.
//!
//! Every failure the resolver and manifest machinery can hit is a distinct,
//! reportable variant. The resolver never retries and never substitutes a
//! fallback version; the caller decides whether one plugin's failure aborts
//! the whole run.

use std::path::PathBuf;
use thiserror::Error;

/// Root domain error type.
///
/// All errors are:
/// - Cloneable (callers may collect and re-report them)
/// - Categorizable (for CLI display and exit codes)
/// - Actionable (provides suggestions)
#[derive(Debug, Error, Clone, PartialEq)]
pub enum DomainError {
    /// Package identifier could not be split into `vendor/name`.
    #[error("Malformed package identifier '{identifier}': expected \"vendor/name\"")]
    MalformedPackageIdentifier { identifier: String },

    /// No manifest root directory exists for the package.
    #[error("Plugin '{package}' is not supported: no manifest directory at {base_dir}")]
    UnsupportedPlugin { package: String, base_dir: PathBuf },

    /// The version source has no record of the package.
    #[error("Package '{package}' is not installed (no entry in the lock file)")]
    PackageNotInstalled { package: String },

    /// Installed version string is not a parseable semantic version.
    #[error("Cannot normalize version '{version}' of '{package}': {reason}")]
    VersionNormalization {
        package: String,
        version: String,
        reason: String,
    },

    /// No candidate directory's version is <= the normalized target.
    #[error("No manifest <= {target} for '{package}' under {base_dir}")]
    NoManifestMatch {
        package: String,
        target: String,
        base_dir: PathBuf,
    },

    /// A resolved or explicitly supplied manifest path has no file behind it.
    #[error("Manifest file missing: {path}")]
    ManifestFileMissing { path: PathBuf },

    /// Manifest file exists but is not valid JSON for the manifest schema.
    #[error("Failed to parse manifest {path}: {reason}")]
    ManifestParse { path: PathBuf, reason: String },

    /// Store preset content violates its schema (missing/invalid sections).
    #[error("Invalid store preset: {0}")]
    InvalidPreset(String),
}

impl DomainError {
    /// Get user-actionable suggestions for fixing this error.
    pub fn suggestions(&self) -> Vec<String> {
        match self {
            Self::MalformedPackageIdentifier { identifier } => vec![
                format!("'{identifier}' is missing a vendor segment"),
                "Write the package as vendor/name, e.g. acme/cms-plugin".into(),
            ],
            Self::UnsupportedPlugin { package, base_dir } => vec![
                format!("No manifests are shipped for '{package}'"),
                format!("Searched: {}", base_dir.display()),
                "Add a <major.minor>/manifest.json directory for the plugin".into(),
            ],
            Self::PackageNotInstalled { package } => vec![
                format!("'{package}' has no entry in composer.lock"),
                format!("Require it first: composer require {package}"),
            ],
            Self::VersionNormalization { version, .. } => vec![
                format!("'{version}' is not a plain semantic version"),
                "Pre-release and build suffixes are not supported for manifest matching".into(),
            ],
            Self::NoManifestMatch { target, base_dir, .. } => vec![
                format!("Every available manifest targets a version above {target}"),
                format!("Searched: {}", base_dir.display()),
                "Publish a manifest for an older version bracket, or upgrade the plugin".into(),
            ],
            Self::ManifestFileMissing { path } => vec![
                format!("Expected a manifest at {}", path.display()),
                "The version directory exists but contains no manifest.json".into(),
            ],
            _ => vec!["See documentation for more details".into()],
        }
    }

    /// Error category for CLI display styling.
    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::MalformedPackageIdentifier { .. } | Self::InvalidPreset(_) => {
                ErrorCategory::Validation
            }
            Self::UnsupportedPlugin { .. }
            | Self::PackageNotInstalled { .. }
            | Self::NoManifestMatch { .. }
            | Self::ManifestFileMissing { .. } => ErrorCategory::NotFound,
            Self::VersionNormalization { .. } => ErrorCategory::Validation,
            Self::ManifestParse { .. } => ErrorCategory::Internal,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Validation,
    NotFound,
    Internal,
}

// ── tests ─────────────────────────────────────────────────────────────────────
