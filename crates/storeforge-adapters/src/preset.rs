//! Store preset loader.
//!
//! Presets are YAML files loaded once at startup into an immutable
//! [`StorePreset`] snapshot. Every command reads from that snapshot; nothing
//! re-reads or mutates the preset mid-run.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use tracing::info;

use storeforge_core::{
    application::{ports::Filesystem, ApplicationError},
    domain::StorePreset,
    error::StoreforgeResult,
};

/// Loads and validates store presets from the filesystem.
pub struct PresetLoader {
    filesystem: Arc<dyn Filesystem>,
}

impl PresetLoader {
    pub fn new(filesystem: Arc<dyn Filesystem>) -> Self {
        Self { filesystem }
    }

    /// Load the preset at `path`, parse it, and run schema validation.
    pub fn load(&self, path: &Path) -> StoreforgeResult<StorePreset> {
        if !self.filesystem.is_file(path) {
            return Err(ApplicationError::PresetNotFound {
                path: path.to_path_buf(),
            }
            .into());
        }

        let raw = self.filesystem.read_to_string(path)?;
        let preset: StorePreset =
            serde_yaml::from_str(&raw).map_err(|e| ApplicationError::PresetParse {
                path: path.to_path_buf(),
                reason: e.to_string(),
            })?;

        preset.validate()?;
        info!(
            preset = %preset.name,
            plugins = preset.plugins.len(),
            "Store preset loaded"
        );
        Ok(preset)
    }

    /// Resolve a preset name against a preset directory:
    /// `<dir>/<name>.yaml`.
    pub fn path_for(preset_dir: &Path, name: &str) -> PathBuf {
        preset_dir.join(format!("{name}.yaml"))
    }
}

// ── tests ─────────────────────────────────────────────────────────────────────
