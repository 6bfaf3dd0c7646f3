//! Dotted-path YAML configurator.
//!
//! Manifest entry shape:
//!
//! ```json
//! {
//!   "kind": "yaml-node",
//!   "options": {
//!     "file": "config/packages/acme.yaml",
//!     "key": "acme.search.enabled",
//!     "value": true
//!   }
//! }
//! ```
//!
//! `key` is a dotted path; each segment is a mapping key. Intermediate
//! mappings are created as needed, and a scalar in the way is replaced.

use std::path::Path;
use std::sync::Arc;

use tracing::debug;

use storeforge_core::{
    application::ports::{Configurator, Filesystem},
    domain::ConfiguratorKind,
    error::StoreforgeResult,
};

use super::{child_mapping, load_yaml, required_str, save_yaml, to_yaml_value};

pub struct YamlNodeConfigurator {
    filesystem: Arc<dyn Filesystem>,
}

impl YamlNodeConfigurator {
    pub fn new(filesystem: Arc<dyn Filesystem>) -> Self {
        Self { filesystem }
    }
}

impl Configurator for YamlNodeConfigurator {
    fn kind(&self) -> ConfiguratorKind {
        ConfiguratorKind::YamlNode
    }

    fn apply(&self, project_root: &Path, options: &serde_json::Value) -> StoreforgeResult<()> {
        let kind = self.kind();
        let file = required_str(options, "file", kind)?;
        let key = required_str(options, "key", kind)?;
        let value = options.get("value").cloned().unwrap_or(serde_json::Value::Null);

        let path = project_root.join(file);
        let mut document = load_yaml(&self.filesystem, &path, kind)?;

        let mut segments = key.split('.').peekable();
        let mut cursor = &mut document;
        while let Some(segment) = segments.next() {
            if segments.peek().is_none() {
                if !cursor.is_mapping() {
                    *cursor = serde_yaml::Value::Mapping(serde_yaml::Mapping::new());
                }
                cursor.as_mapping_mut().unwrap().insert(
                    serde_yaml::Value::String(segment.to_string()),
                    to_yaml_value(&value, kind)?,
                );
            } else {
                cursor = child_mapping(cursor, segment);
            }
        }

        debug!(file = %path.display(), key = %key, "YAML node set");
        save_yaml(&self.filesystem, &path, &document, kind)
    }
}

// ── tests ─────────────────────────────────────────────────────────────────────
