//! Plugin installer: the use case that turns a resolved manifest into an
//! installed, configured plugin.
//!
//! Two phases, mirroring how a store is assembled:
//!
//! 1. **prepare** — require the package through the package manager so it
//!    lands in the lock file.
//! 2. **install** — resolve the manifest for the installed version, run its
//!    steps, and apply its configurators.
//!
//! Preparation must happen before installation can resolve anything: the
//! resolver reads the lock file the prepare phase writes.

use std::path::PathBuf;
use tracing::{info, instrument, warn};

use crate::{
    application::services::{
        configurator_registry::ConfiguratorRegistry, manifest_resolver::ManifestResolver,
        pipeline::StepPipeline,
    },
    domain::{MinorVersion, PackageReference, PluginType, StorePreset},
    error::StoreforgeResult,
};

/// What one plugin installation did, for reporting.
#[derive(Debug, Clone, PartialEq)]
pub struct InstallReport {
    pub package: PackageReference,
    pub matched: MinorVersion,
    pub plugin_type: PluginType,
    pub steps_run: usize,
    pub configurators_applied: usize,
    /// Rule set references accumulated for the style-migration config.
    pub rector_sets: Vec<String>,
}

/// Orchestrates plugin preparation and installation.
pub struct PluginInstaller {
    resolver: ManifestResolver,
    pipeline: StepPipeline,
    registry: ConfiguratorRegistry,
    project_root: PathBuf,
    /// Package manager executable, normally `composer`.
    composer: String,
}

impl PluginInstaller {
    pub fn new(
        resolver: ManifestResolver,
        pipeline: StepPipeline,
        registry: ConfiguratorRegistry,
        project_root: impl Into<PathBuf>,
        composer: impl Into<String>,
    ) -> Self {
        Self {
            resolver,
            pipeline,
            registry,
            project_root: project_root.into(),
            composer: composer.into(),
        }
    }

    /// Require `package` at `constraint` without running package scripts.
    ///
    /// Scripts are deferred to the install phase, where the manifest decides
    /// what actually runs and in which order.
    #[instrument(skip(self), fields(package = %package))]
    pub fn prepare(&self, package: &PackageReference, constraint: &str) -> StoreforgeResult<()> {
        let command = format!(
            "{} require {}:{} --no-scripts --no-interaction",
            self.composer, package, constraint
        );
        self.pipeline.run_one(&self.project_root, &command)?;
        info!(constraint = %constraint, "Package required");
        Ok(())
    }

    /// Install one already-prepared plugin: resolve, run steps, configure.
    #[instrument(skip(self), fields(package = %package))]
    pub fn install(&self, package: &PackageReference) -> StoreforgeResult<InstallReport> {
        let resolved = self.resolver.resolve(package)?;

        if resolved.manifest.plugin_type == PluginType::Paid {
            warn!(
                package = %package,
                "Paid plugin: make sure the private repository is configured"
            );
        }

        let outcomes = self
            .pipeline
            .run(&self.project_root, &resolved.manifest.steps)?;
        let applied = self
            .registry
            .apply_all(&self.project_root, &resolved.manifest.configurators)?;

        info!(
            matched = %resolved.matched,
            steps = outcomes.len(),
            configurators = applied,
            "Plugin installed"
        );

        Ok(InstallReport {
            package: package.clone(),
            matched: resolved.matched,
            plugin_type: resolved.manifest.plugin_type,
            steps_run: outcomes.len(),
            configurators_applied: applied,
            rector_sets: resolved.manifest.rector_sets,
        })
    }

    /// Prepare every plugin named in the preset, in deterministic order.
    pub fn prepare_all(&self, preset: &StorePreset) -> StoreforgeResult<usize> {
        for (identifier, constraint) in &preset.plugins {
            let package: PackageReference = identifier.parse()?;
            self.prepare(&package, constraint)?;
        }
        Ok(preset.plugins.len())
    }

    /// Install every plugin named in the preset, collecting the reports.
    ///
    /// Stops at the first failure; partially assembled stores are visible
    /// in the reports returned so far being absent from the error path.
    pub fn install_all(&self, preset: &StorePreset) -> StoreforgeResult<Vec<InstallReport>> {
        let mut reports = Vec::with_capacity(preset.plugins.len());
        for identifier in preset.plugins.keys() {
            let package: PackageReference = identifier.parse()?;
            reports.push(self.install(&package)?);
        }
        Ok(reports)
    }
}

// ── tests ─────────────────────────────────────────────────────────────────────
