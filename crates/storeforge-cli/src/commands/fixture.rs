//! Implementation of the `storeforge fixture` subcommands.
//!
//! `prepare` stages the preset's fixture suite into the project:
//!
//! - `<assets>/fixtures.yaml` → `<project>/config/packages/fixtures.yaml`
//! - `<assets>/<images_dir>/*` → `<project>/var/fixture_img/`
//!
//! `load` runs the store console's fixture loader against the staged suite.

use std::path::Path;
use std::sync::Arc;

use tracing::{debug, info, instrument};

use storeforge_core::{
    application::ports::Filesystem,
    domain::StorePreset,
};

use crate::{
    cli::{FixtureCommands, GlobalArgs, PresetArgs},
    commands::Workspace,
    config::AppConfig,
    error::CliResult,
    output::OutputManager,
};

/// Staged fixture file location inside the project.
const STAGED_FIXTURES: &str = "config/packages/fixtures.yaml";
/// Where fixture images land inside the project; the suite references them
/// from there when it loads.
const IMAGE_TARGET_DIR: &str = "var/fixture_img";

pub fn execute(
    cmd: FixtureCommands,
    global: GlobalArgs,
    config: AppConfig,
    output: OutputManager,
) -> CliResult<()> {
    let workspace = Workspace::new(&global, config);
    match cmd {
        FixtureCommands::Prepare(args) => prepare(args, &workspace, &output),
        FixtureCommands::Load(args) => load(args, &workspace, &output),
    }
}

#[instrument(skip_all, fields(preset = %args.preset))]
fn prepare(args: PresetArgs, workspace: &Workspace, output: &OutputManager) -> CliResult<()> {
    let (preset, assets_dir) = workspace.load_preset(&args.preset)?;

    output.header(&format!("Staging fixtures for '{}'...", preset.name))?;
    if !workspace.filesystem.is_file(&assets_dir.join("fixtures.yaml")) {
        output.warning("Preset has no fixtures.yaml; the suite file was not staged")?;
    }
    let staged = stage_fixtures(
        &workspace.filesystem,
        &workspace.project_root,
        &assets_dir,
        &preset,
    )?;
    info!(preset = %preset.name, images = staged, "Fixtures staged");

    output.success(&format!(
        "Fixture suite '{}' staged ({staged} images)",
        preset.fixtures.suite
    ))?;
    Ok(())
}

#[instrument(skip_all, fields(preset = %args.preset))]
fn load(args: PresetArgs, workspace: &Workspace, output: &OutputManager) -> CliResult<()> {
    let (preset, _) = workspace.load_preset(&args.preset)?;

    output.header(&format!("Loading fixture suite '{}'...", preset.fixtures.suite))?;
    let command = format!(
        "{} sylius:fixtures:load {} --no-interaction",
        workspace.config.commands.console, preset.fixtures.suite
    );
    workspace
        .pipeline()
        .run_one(&workspace.project_root, &command)?;

    output.success(&format!("Fixture suite '{}' loaded", preset.fixtures.suite))?;
    Ok(())
}

/// Copy the fixture suite file and images into the project. Returns the
/// number of images copied. Both sources are optional; a preset without
/// fixture assets stages nothing.
pub(crate) fn stage_fixtures(
    filesystem: &Arc<dyn Filesystem>,
    project_root: &Path,
    assets_dir: &Path,
    preset: &StorePreset,
) -> CliResult<usize> {
    let suite_file = assets_dir.join("fixtures.yaml");
    if filesystem.is_file(&suite_file) {
        let target = project_root.join(STAGED_FIXTURES);
        if let Some(parent) = target.parent() {
            filesystem.create_dir_all(parent)?;
        }
        filesystem.copy_file(&suite_file, &target)?;
        debug!(from = %suite_file.display(), to = %target.display(), "Suite file staged");
    }

    let Some(images_dir) = &preset.fixtures.images_dir else {
        return Ok(0);
    };
    let source_dir = assets_dir.join(images_dir);
    if !filesystem.exists(&source_dir) {
        return Ok(0);
    }

    let target_dir = project_root.join(IMAGE_TARGET_DIR);
    filesystem.create_dir_all(&target_dir)?;

    let mut copied = 0;
    for entry in filesystem.list_entries(&source_dir)? {
        if entry.is_dir {
            continue;
        }
        filesystem.copy_file(&source_dir.join(&entry.name), &target_dir.join(&entry.name))?;
        copied += 1;
    }
    Ok(copied)
}

// ── tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use storeforge_adapters::MemoryFilesystem;

    fn preset_with_images() -> StorePreset {
        serde_json::from_str(
            r#"{"name": "demo", "fixtures": {"suite": "demo", "images_dir": "images"}}"#,
        )
        .unwrap()
    }

    #[test]
    fn stages_suite_file_and_images() {
        let memory = MemoryFilesystem::new();
        memory.seed_file("/presets/demo/fixtures.yaml", "sylius_fixtures: {}");
        memory.seed_file("/presets/demo/images/shirt.jpg", "jpg");
        memory.seed_file("/presets/demo/images/mug.jpg", "jpg");
        let filesystem: Arc<dyn Filesystem> = Arc::new(memory.clone());

        let copied = stage_fixtures(
            &filesystem,
            Path::new("/app"),
            Path::new("/presets/demo"),
            &preset_with_images(),
        )
        .unwrap();

        assert_eq!(copied, 2);
        assert!(memory
            .read_file(Path::new("/app/config/packages/fixtures.yaml"))
            .is_some());
        assert!(memory
            .read_file(Path::new("/app/var/fixture_img/shirt.jpg"))
            .is_some());
    }

    #[test]
    fn missing_fixture_assets_stage_nothing() {
        let memory = MemoryFilesystem::new();
        let filesystem: Arc<dyn Filesystem> = Arc::new(memory.clone());

        let copied = stage_fixtures(
            &filesystem,
            Path::new("/app"),
            Path::new("/presets/demo"),
            &preset_with_images(),
        )
        .unwrap();

        assert_eq!(copied, 0);
        assert!(memory.list_files().is_empty());
    }

    #[test]
    fn preset_without_images_dir_copies_only_the_suite() {
        let memory = MemoryFilesystem::new();
        memory.seed_file("/presets/demo/fixtures.yaml", "sylius_fixtures: {}");
        let filesystem: Arc<dyn Filesystem> = Arc::new(memory.clone());

        let preset: StorePreset =
            serde_json::from_str(r#"{"name": "demo", "fixtures": {"suite": "demo"}}"#).unwrap();
        let copied = stage_fixtures(
            &filesystem,
            Path::new("/app"),
            Path::new("/presets/demo"),
            &preset,
        )
        .unwrap();

        assert_eq!(copied, 0);
        assert!(memory
            .read_file(Path::new("/app/config/packages/fixtures.yaml"))
            .is_some());
    }
}
