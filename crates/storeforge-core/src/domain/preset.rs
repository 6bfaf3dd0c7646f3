//! Store preset data model.
//!
//! A preset is the declarative description of one store assembly: which
//! plugins to require, which fixture suite to load, and how to brand each
//! storefront area. It is loaded once at startup and never mutated; every
//! service reads from the same immutable snapshot.

use crate::domain::error::DomainError;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// An immutable store assembly description.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct StorePreset {
    /// Human-readable preset name, used in logs and reports.
    #[serde(default)]
    pub name: String,

    /// Plugins to require, keyed by `vendor/name`, valued by the composer
    /// version constraint to pass to `composer require`.
    #[serde(default)]
    pub plugins: BTreeMap<String, String>,

    /// Fixture suite configuration.
    #[serde(default)]
    pub fixtures: FixtureConfig,

    /// Theming per storefront area (`shop`, `admin`, ...), each area branded
    /// independently.
    #[serde(default)]
    pub themes: BTreeMap<String, ThemeConfig>,
}

impl StorePreset {
    /// Validate cross-field constraints the schema cannot express.
    pub fn validate(&self) -> Result<(), DomainError> {
        if self.name.trim().is_empty() {
            return Err(DomainError::InvalidPreset("preset name is empty".into()));
        }
        for identifier in self.plugins.keys() {
            identifier.parse::<crate::domain::package::PackageReference>()?;
        }
        for (area, theme) in &self.themes {
            theme.validate(area)?;
        }
        Ok(())
    }
}

/// Fixture suite settings.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct FixtureConfig {
    /// Name of the fixture suite passed to the fixture loader.
    #[serde(default = "FixtureConfig::default_suite")]
    pub suite: String,

    /// Directory (relative to the preset) holding fixture images to copy
    /// into the project before loading.
    #[serde(default)]
    pub images_dir: Option<String>,
}

impl FixtureConfig {
    fn default_suite() -> String {
        "default".into()
    }
}

/// Branding for one storefront area.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields, rename_all = "camelCase")]
pub struct ThemeConfig {
    /// CSS custom properties emitted into the generated stylesheet's `:root`
    /// block, keyed by full property name (`--bs-primary`). Button styling is
    /// derived from these, so no separate color field exists.
    #[serde(default)]
    pub css_variables: BTreeMap<String, String>,

    /// Filename (relative to the preset's `themes/<area>/` assets) of the
    /// area logo to install.
    #[serde(default)]
    pub logo: Option<String>,
}

impl ThemeConfig {
    fn validate(&self, area: &str) -> Result<(), DomainError> {
        for (key, value) in &self.css_variables {
            if key.trim().is_empty() || value.trim().is_empty() {
                return Err(DomainError::InvalidPreset(format!(
                    "theme area '{area}' has an empty cssVariables key or value (key: '{key}')"
                )));
            }
        }
        Ok(())
    }

    /// Variable lookup with a chain of fallbacks, for deriving button colors.
    pub fn variable_or<'a>(&'a self, keys: &[&str], default: &'a str) -> &'a str {
        keys.iter()
            .find_map(|k| self.css_variables.get(*k))
            .map(String::as_str)
            .unwrap_or(default)
    }
}

// ── tests ─────────────────────────────────────────────────────────────────────
