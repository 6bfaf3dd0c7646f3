//! Manifest wire format.
//!
//! A manifest is one version bracket's installation recipe for a plugin:
//! shell steps to run, configurators to apply, and refactoring rule sets to
//! feed the style-migration tool. All three sections are optional; an empty
//! manifest (`{}`) is valid and means "require the package, nothing else".

use crate::domain::error::DomainError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// The canonical manifest filename inside a version directory.
pub const MANIFEST_FILE: &str = "manifest.json";

/// One version bracket's installation recipe.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Manifest {
    /// Distribution channel of the plugin. Paid plugins need the private
    /// repository configured before `composer require` can see them.
    #[serde(rename = "type", default)]
    pub plugin_type: PluginType,

    /// Shell commands to run, in order, from the project root.
    #[serde(default)]
    pub steps: Vec<String>,

    /// Configuration edits to apply after the steps succeed.
    #[serde(default)]
    pub configurators: Vec<ConfiguratorSpec>,

    /// References to refactoring rule sets (`Class::CONSTANT` style),
    /// consumed by the style-migration tool's config, not executed here.
    #[serde(rename = "rector-sets", default)]
    pub rector_sets: Vec<String>,
}

impl Manifest {
    /// Parse a manifest from its JSON text.
    pub fn from_json(path_label: &std::path::Path, raw: &str) -> Result<Self, DomainError> {
        serde_json::from_str(raw).map_err(|e| DomainError::ManifestParse {
            path: path_label.to_path_buf(),
            reason: e.to_string(),
        })
    }

    pub fn is_empty(&self) -> bool {
        self.steps.is_empty() && self.configurators.is_empty() && self.rector_sets.is_empty()
    }
}

/// Distribution channel tag.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum PluginType {
    #[default]
    OpenSource,
    Paid,
}

impl fmt::Display for PluginType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::OpenSource => f.write_str("open-source"),
            Self::Paid => f.write_str("paid"),
        }
    }
}

/// One configurator invocation from a manifest.
///
/// The original design named a class to instantiate at runtime; here the
/// `kind` is a closed tag resolved through the configurator registry, so an
/// unknown kind fails at parse time instead of at instantiation time.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConfiguratorSpec {
    pub kind: ConfiguratorKind,

    /// Free-form options interpreted by the configurator implementation.
    #[serde(default)]
    pub options: serde_json::Value,
}

/// The closed set of configurator tags.
///
/// To add a configurator: add a variant here, implement the `Configurator`
/// trait in the adapters crate, and register it in the registry the CLI
/// builds. Nothing else changes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ConfiguratorKind {
    /// Set a nested key (dotted path) in a YAML file.
    YamlNode,
    /// Upsert a template hook entry in the hooks YAML file.
    TwigHooks,
}

impl ConfiguratorKind {
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::YamlNode => "yaml-node",
            Self::TwigHooks => "twig-hooks",
        }
    }
}

impl fmt::Display for ConfiguratorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ConfiguratorKind {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "yaml-node" => Ok(Self::YamlNode),
            "twig-hooks" => Ok(Self::TwigHooks),
            other => Err(DomainError::InvalidPreset(format!(
                "unknown configurator kind: {other}"
            ))),
        }
    }
}

// ── tests ─────────────────────────────────────────────────────────────────────
