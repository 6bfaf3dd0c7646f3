//! Configurator registry: the closed dispatch table for manifest
//! configurator entries.
//!
//! Manifests name configurators by kind tag; the registry maps each tag to
//! the one implementation registered for it. Registration happens once at
//! startup, so a manifest referencing an unregistered kind is a packaging
//! error, not a runtime surprise.

use std::collections::HashMap;
use std::path::Path;
use tracing::debug;

use crate::{
    application::{error::ApplicationError, ports::Configurator},
    domain::{ConfiguratorKind, ConfiguratorSpec},
    error::StoreforgeResult,
};

/// Dispatch table from [`ConfiguratorKind`] to implementation.
#[derive(Default)]
pub struct ConfiguratorRegistry {
    entries: HashMap<ConfiguratorKind, Box<dyn Configurator>>,
}

impl ConfiguratorRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register an implementation under its own kind tag. A second
    /// registration for the same kind replaces the first.
    pub fn register(&mut self, configurator: Box<dyn Configurator>) -> &mut Self {
        self.entries.insert(configurator.kind(), configurator);
        self
    }

    pub fn is_registered(&self, kind: ConfiguratorKind) -> bool {
        self.entries.contains_key(&kind)
    }

    /// Apply one manifest configurator entry.
    pub fn apply(&self, project_root: &Path, spec: &ConfiguratorSpec) -> StoreforgeResult<()> {
        let configurator = self.entries.get(&spec.kind).ok_or(
            ApplicationError::ConfiguratorNotRegistered { kind: spec.kind },
        )?;
        debug!(kind = %spec.kind, "Applying configurator");
        configurator.apply(project_root, &spec.options)
    }

    /// Apply a manifest's configurator entries in order, stopping at the
    /// first failure.
    pub fn apply_all(
        &self,
        project_root: &Path,
        specs: &[ConfiguratorSpec],
    ) -> StoreforgeResult<usize> {
        for spec in specs {
            self.apply(project_root, spec)?;
        }
        Ok(specs.len())
    }
}

// ── tests ─────────────────────────────────────────────────────────────────────
