//! Command handlers.
//!
//! Each submodule implements one subcommand. Handlers translate CLI
//! arguments into service calls and display results; no business logic
//! lives here. Shared adapter wiring lives in [`Workspace`].

use std::path::{Path, PathBuf};
use std::sync::Arc;

use storeforge_adapters::{
    ComposerLockSource, LocalFilesystem, PresetLoader, ShellRunner, TwigHooksConfigurator,
    YamlNodeConfigurator,
};
use storeforge_core::{
    application::{
        ports::Filesystem, ConfiguratorRegistry, ManifestResolver, PluginInstaller, StepPipeline,
    },
    domain::StorePreset,
};

use crate::{cli::GlobalArgs, config::AppConfig, error::CliResult, output::OutputManager};

pub mod assemble;
pub mod completions;
pub mod fixture;
pub mod plugin;
pub mod theme;

/// Everything a command handler needs: the project root, the shared
/// filesystem adapter, and constructors for the application services.
pub(crate) struct Workspace {
    pub project_root: PathBuf,
    pub filesystem: Arc<dyn Filesystem>,
    pub config: AppConfig,
}

impl Workspace {
    pub fn new(global: &GlobalArgs, config: AppConfig) -> Self {
        Self {
            project_root: global.project_root.clone(),
            filesystem: Arc::new(LocalFilesystem::new()),
            config,
        }
    }

    /// Base directory of the per-package manifest trees.
    pub fn manifest_dir(&self) -> PathBuf {
        AppConfig::resolve_path(&self.project_root, &self.config.paths.manifests)
    }

    /// Directory holding preset files.
    pub fn preset_dir(&self) -> PathBuf {
        AppConfig::resolve_path(&self.project_root, &self.config.paths.presets)
    }

    pub fn resolver(&self) -> ManifestResolver {
        let versions =
            ComposerLockSource::for_project(Arc::clone(&self.filesystem), &self.project_root);
        ManifestResolver::new(
            Box::new(versions),
            Box::new(LocalFilesystem::new()),
            self.manifest_dir(),
        )
    }

    pub fn pipeline(&self) -> StepPipeline {
        StepPipeline::new(Box::new(ShellRunner::new()))
    }

    pub fn registry(&self) -> ConfiguratorRegistry {
        let mut registry = ConfiguratorRegistry::new();
        registry
            .register(Box::new(YamlNodeConfigurator::new(Arc::clone(
                &self.filesystem,
            ))))
            .register(Box::new(TwigHooksConfigurator::new(Arc::clone(
                &self.filesystem,
            ))));
        registry
    }

    pub fn installer(&self) -> PluginInstaller {
        PluginInstaller::new(
            self.resolver(),
            self.pipeline(),
            self.registry(),
            self.project_root.clone(),
            self.config.commands.composer.clone(),
        )
    }

    /// Load a preset by name or path.
    ///
    /// Returns the preset together with its asset directory: the sibling
    /// directory named after the preset, where fixtures and theme assets
    /// (logo, images) live.
    pub fn load_preset(&self, name_or_path: &str) -> CliResult<(StorePreset, PathBuf)> {
        let loader = PresetLoader::new(Arc::clone(&self.filesystem));

        let path = if name_or_path.ends_with(".yaml") || name_or_path.ends_with(".yml") {
            PathBuf::from(name_or_path)
        } else {
            PresetLoader::path_for(&self.preset_dir(), name_or_path)
        };

        let preset = loader.load(&path)?;
        let assets_dir = preset_assets_dir(&path);
        Ok((preset, assets_dir))
    }
}

/// `<dir>/<name>.yaml` keeps its assets under `<dir>/<name>/`.
fn preset_assets_dir(preset_path: &Path) -> PathBuf {
    let stem = preset_path
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_default();
    preset_path
        .parent()
        .unwrap_or_else(|| Path::new("."))
        .join(stem)
}

/// Print a short per-plugin summary line after an install.
pub(crate) fn report_line(report: &storeforge_core::application::InstallReport) -> String {
    format!(
        "{} (manifest {}, {} steps, {} configurators)",
        report.package, report.matched, report.steps_run, report.configurators_applied
    )
}

pub(crate) fn print_reports(
    output: &OutputManager,
    reports: &[storeforge_core::application::InstallReport],
) -> CliResult<()> {
    for report in reports {
        output.success(&report_line(report))?;
        for set in &report.rector_sets {
            output.info(&format!("  rector set: {set}"))?;
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn assets_dir_sits_next_to_the_preset_file() {
        assert_eq!(
            preset_assets_dir(Path::new("/presets/demo-store.yaml")),
            PathBuf::from("/presets/demo-store")
        );
    }
}
