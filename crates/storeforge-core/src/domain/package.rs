//! Package identity value object.

use crate::domain::error::DomainError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// A package identity of the form `vendor/name`.
///
/// Split on the **first** slash, so `acme/bundle/extra` yields vendor
/// `acme` and name `bundle/extra` (rejected below for emptiness rules
/// only; nested names are the lock file's problem, not ours).
///
/// Policy: an identifier without a vendor segment is a hard error. The
/// alternative (defaulting the vendor) can silently resolve a manifest for
/// a different publisher's plugin, which is worse than failing loudly.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PackageReference {
    vendor: String,
    name: String,
}

impl PackageReference {
    /// Build from already-validated parts. Prefer [`FromStr`] for user input.
    pub fn new(vendor: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            vendor: vendor.into(),
            name: name.into(),
        }
    }

    pub fn vendor(&self) -> &str {
        &self.vendor
    }

    pub fn name(&self) -> &str {
        &self.name
    }
}

impl fmt::Display for PackageReference {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.vendor, self.name)
    }
}

impl FromStr for PackageReference {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let malformed = || DomainError::MalformedPackageIdentifier {
            identifier: s.to_string(),
        };

        let (vendor, name) = s.split_once('/').ok_or_else(malformed)?;
        if vendor.is_empty() || name.is_empty() {
            return Err(malformed());
        }

        Ok(Self::new(vendor, name))
    }
}
