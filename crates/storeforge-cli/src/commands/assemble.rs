//! Implementation of `storeforge assemble`.
//!
//! Drives the full preset pipeline in two phases:
//!
//! - **build**: require every preset plugin, refresh the application cache,
//!   install each plugin from its resolved manifest, rebuild the frontend,
//!   stage fixtures, refresh the cache again, and prepare the themes.
//! - **deploy**: rebuild the database schema and load the staged fixture
//!   suite into the running store.
//!
//! At least one phase must be selected; running with neither is almost
//! certainly a mistake, so it is rejected rather than silently succeeding.

use tracing::{info, instrument};

use crate::{
    cli::{AssembleArgs, GlobalArgs},
    commands::{fixture, plugin, print_reports, theme, Workspace},
    config::AppConfig,
    error::{CliError, CliResult},
    output::OutputManager,
};

/// Cached container and routing data go stale after plugins change; clear
/// first so warmup rebuilds from the new bundle set.
pub(crate) fn cache_refresh_steps(console: &str) -> Vec<String> {
    vec![
        format!("{console} cache:clear --no-warmup"),
        format!("{console} cache:warmup"),
    ]
}

/// Deploy starts from an empty database with the current schema.
pub(crate) fn database_rebuild_steps(console: &str) -> Vec<String> {
    vec![
        format!("{console} doctrine:database:drop --if-exists -n --force"),
        format!("{console} doctrine:database:create -n"),
        format!("{console} doctrine:schema:update -n --force --complete"),
    ]
}

#[instrument(skip_all, fields(preset = %args.preset, build = args.build, deploy = args.deploy))]
pub fn execute(
    args: AssembleArgs,
    global: GlobalArgs,
    config: AppConfig,
    output: OutputManager,
) -> CliResult<()> {
    if !args.build && !args.deploy {
        return Err(CliError::NoPhaseSelected);
    }

    let workspace = Workspace::new(&global, config);
    let (preset, assets_dir) = workspace.load_preset(&args.preset)?;

    if args.build {
        output.header(&format!("Assembling '{}' (build phase)...", preset.name))?;

        let commands = workspace.config.commands.clone();
        let root = workspace.project_root.clone();
        let pipeline = workspace.pipeline();
        let installer = workspace.installer();

        pipeline.run(&root, &plugin::package_manager_setup_steps(&commands.composer))?;
        let required = installer.prepare_all(&preset)?;
        pipeline.run(
            &root,
            &plugin::prepare_finish_steps(&commands.rector, &commands.console),
        )?;
        output.success(&format!("{required} plugins required"))?;

        pipeline.run(&root, &cache_refresh_steps(&commands.console))?;

        let reports = installer.install_all(&preset)?;
        pipeline.run_one(&root, &plugin::frontend_build_step(&commands.yarn))?;
        print_reports(&output, &reports)?;

        let staged =
            fixture::stage_fixtures(&workspace.filesystem, &root, &assets_dir, &preset)?;
        output.success(&format!(
            "Fixture suite '{}' staged ({staged} images)",
            preset.fixtures.suite
        ))?;

        // Second refresh: staged fixture configuration is part of the
        // container now.
        pipeline.run(&root, &cache_refresh_steps(&commands.console))?;

        theme::run_prepare(&workspace, &output, &preset, &assets_dir)?;

        info!(preset = %preset.name, plugins = reports.len(), "Build phase complete");
    }

    if args.deploy {
        output.header(&format!("Assembling '{}' (deploy phase)...", preset.name))?;

        let console = &workspace.config.commands.console;
        let pipeline = workspace.pipeline();
        pipeline.run(&workspace.project_root, &database_rebuild_steps(console))?;

        let command = format!(
            "{console} sylius:fixtures:load {} --no-interaction",
            preset.fixtures.suite
        );
        pipeline.run_one(&workspace.project_root, &command)?;
        output.success(&format!("Fixture suite '{}' loaded", preset.fixtures.suite))?;

        info!(preset = %preset.name, "Deploy phase complete");
    }

    output.success(&format!("Store '{}' assembled", preset.name))?;
    Ok(())
}

// ── tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cache_refresh_clears_before_warming() {
        assert_eq!(
            cache_refresh_steps("bin/console"),
            ["bin/console cache:clear --no-warmup", "bin/console cache:warmup"]
        );
    }

    #[test]
    fn database_rebuild_drops_creates_and_updates_schema() {
        assert_eq!(
            database_rebuild_steps("bin/console"),
            [
                "bin/console doctrine:database:drop --if-exists -n --force",
                "bin/console doctrine:database:create -n",
                "bin/console doctrine:schema:update -n --force --complete",
            ]
        );
    }
}
