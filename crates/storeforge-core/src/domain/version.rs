//! Version value objects for manifest matching.
//!
//! Two pieces live here:
//!
//! - [`MinorVersion`] — the `major.minor` grammar that manifest version
//!   directories must follow, with numeric (not lexicographic) ordering so
//!   that `10.2 > 9.5`.
//! - [`normalize_installed`] — turns a lock-file version string into the
//!   `MinorVersion` floor target used by the resolver.

use crate::domain::{error::DomainError, package::PackageReference};
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;

// ── MinorVersion ─────────────────────────────────────────────────────────────

/// A bare `major.minor` version, e.g. `2.0` or `1.12`.
///
/// Parsing accepts exactly two dot-separated runs of ASCII digits. Anything
/// else (`2.0.1`, `v2.0`, `latest`, `2.0-rc`) is rejected, which is how the
/// resolver filters candidate directory names.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct MinorVersion {
    pub major: u64,
    pub minor: u64,
}

impl MinorVersion {
    pub const fn new(major: u64, minor: u64) -> Self {
        Self { major, minor }
    }
}

impl Ord for MinorVersion {
    fn cmp(&self, other: &Self) -> Ordering {
        self.major
            .cmp(&other.major)
            .then(self.minor.cmp(&other.minor))
    }
}

impl PartialOrd for MinorVersion {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl fmt::Display for MinorVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}", self.major, self.minor)
    }
}

/// Parse error carries no context; callers decide whether a non-version
/// directory name is an error (it is not — it is simply not a candidate).
pub struct NotAMinorVersion;

impl FromStr for MinorVersion {
    type Err = NotAMinorVersion;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (major, minor) = s.split_once('.').ok_or(NotAMinorVersion)?;
        if major.is_empty()
            || minor.is_empty()
            || !major.bytes().all(|b| b.is_ascii_digit())
            || !minor.bytes().all(|b| b.is_ascii_digit())
        {
            return Err(NotAMinorVersion);
        }
        let major = major.parse().map_err(|_| NotAMinorVersion)?;
        let minor = minor.parse().map_err(|_| NotAMinorVersion)?;
        Ok(Self::new(major, minor))
    }
}

// ── Installed-version normalization ──────────────────────────────────────────

/// Normalize an installed version string to its `major.minor` floor target.
///
/// Accepts the forms package lock files actually contain: an optional
/// leading `v`, one to three numeric components (`2`, `1.7`, `1.7.3`), and
/// Composer's canonical four-component form (`1.7.3.0`). Missing components
/// are padded with zeros, a numeric fourth component is dropped — it never
/// affects the bracket — before semver parsing.
///
/// Pre-release and build suffixes (`1.0.0-beta`, `2.0.x-dev`) fail with
/// [`DomainError::VersionNormalization`]: a manifest bracket match against
/// an unstable version would be a guess, and the resolver does not guess.
pub fn normalize_installed(
    package: &PackageReference,
    version: &str,
) -> Result<MinorVersion, DomainError> {
    let fail = |reason: &str| DomainError::VersionNormalization {
        package: package.to_string(),
        version: version.to_string(),
        reason: reason.to_string(),
    };

    let trimmed = version.trim();
    let bare = trimmed
        .strip_prefix('v')
        .or_else(|| trimmed.strip_prefix('V'))
        .unwrap_or(trimmed);
    if bare.is_empty() {
        return Err(fail("empty version string"));
    }

    // Pad "2" -> "2.0.0" and "1.7" -> "1.7.0"; fold "1.7.3.0" -> "1.7.3".
    // Anything with a non-numeric tail is left alone so semver rejects it
    // with its own message.
    let components: Vec<&str> = bare.split('.').collect();
    let padded = match components.as_slice() {
        [major] => format!("{major}.0.0"),
        [major, minor] => format!("{major}.{minor}.0"),
        [major, minor, patch, extra]
            if !extra.is_empty() && extra.bytes().all(|b| b.is_ascii_digit()) =>
        {
            format!("{major}.{minor}.{patch}")
        }
        _ => bare.to_string(),
    };

    let parsed = semver::Version::parse(&padded).map_err(|e| fail(&e.to_string()))?;

    if !parsed.pre.is_empty() {
        return Err(fail("pre-release versions cannot be matched to a manifest bracket"));
    }
    if !parsed.build.is_empty() {
        return Err(fail("build metadata is not supported"));
    }

    Ok(MinorVersion::new(parsed.major, parsed.minor))
}

// ── tests ─────────────────────────────────────────────────────────────────────
