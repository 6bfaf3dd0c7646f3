//! Configurator adapters implementing the `Configurator` port.
//!
//! Each configurator answers to one [`ConfiguratorKind`] tag and edits one
//! family of configuration files. Shared YAML plumbing lives here.
//!
//! [`ConfiguratorKind`]: storeforge_core::domain::ConfiguratorKind

use std::path::Path;
use std::sync::Arc;

use serde_yaml::{Mapping, Value};

use storeforge_core::{
    application::{ports::Filesystem, ApplicationError},
    domain::ConfiguratorKind,
    error::StoreforgeResult,
};

pub mod twig_hooks;
pub mod yaml_node;

pub use twig_hooks::TwigHooksConfigurator;
pub use yaml_node::YamlNodeConfigurator;

/// Load a YAML document, or an empty mapping when the file does not exist
/// yet. Configurators routinely target config files the plugin has not
/// created.
fn load_yaml(
    filesystem: &Arc<dyn Filesystem>,
    path: &Path,
    kind: ConfiguratorKind,
) -> StoreforgeResult<Value> {
    if !filesystem.is_file(path) {
        return Ok(Value::Mapping(Mapping::new()));
    }
    let raw = filesystem.read_to_string(path)?;
    serde_yaml::from_str(&raw).map_err(|e| {
        ApplicationError::ConfiguratorFailed {
            kind,
            reason: format!("{} is not valid YAML: {}", path.display(), e),
        }
        .into()
    })
}

/// Serialize and write a YAML document back, creating parent directories.
fn save_yaml(
    filesystem: &Arc<dyn Filesystem>,
    path: &Path,
    document: &Value,
    kind: ConfiguratorKind,
) -> StoreforgeResult<()> {
    let raw = serde_yaml::to_string(document).map_err(|e| ApplicationError::ConfiguratorFailed {
        kind,
        reason: format!("Failed to serialize {}: {}", path.display(), e),
    })?;
    if let Some(parent) = path.parent() {
        filesystem.create_dir_all(parent)?;
    }
    filesystem.write_file(path, &raw)
}

/// Descend into `parent[key]`, replacing non-mapping values with a fresh
/// mapping so the remaining path can be created.
fn child_mapping<'a>(parent: &'a mut Value, key: &str) -> &'a mut Value {
    if !parent.is_mapping() {
        *parent = Value::Mapping(Mapping::new());
    }
    let mapping = parent.as_mapping_mut().unwrap();
    let key = Value::String(key.to_string());
    mapping
        .entry(key)
        .or_insert_with(|| Value::Mapping(Mapping::new()))
}

/// Pull a required string field out of a configurator's options.
fn required_str<'a>(
    options: &'a serde_json::Value,
    field: &'static str,
    kind: ConfiguratorKind,
) -> StoreforgeResult<&'a str> {
    options
        .get(field)
        .and_then(|v| v.as_str())
        .ok_or_else(|| {
            ApplicationError::MissingOption {
                kind,
                option: field,
            }
            .into()
        })
}

/// Convert a JSON option value into its YAML counterpart.
fn to_yaml_value(value: &serde_json::Value, kind: ConfiguratorKind) -> StoreforgeResult<Value> {
    serde_yaml::to_value(value).map_err(|e| {
        ApplicationError::ConfiguratorFailed {
            kind,
            reason: format!("Unrepresentable option value: {e}"),
        }
        .into()
    })
}
