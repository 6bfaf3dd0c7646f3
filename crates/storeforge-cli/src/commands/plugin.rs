//! Implementation of the `storeforge plugin` subcommands.

use serde_json::json;
use tracing::{info, instrument};

use storeforge_core::domain::PackageReference;

use crate::{
    cli::{GlobalArgs, PluginCommands, PluginManifestArgs, PluginPackageArgs, PluginPrepareArgs},
    commands::Workspace,
    config::AppConfig,
    error::{CliError, CliResult},
    output::OutputManager,
};

/// Sylius plugins are distributed through the vendor's package repository.
const SYLIUS_REPOSITORY_URL: &str = "https://sylius.repo.packagist.com/sylius/";

pub fn execute(
    cmd: PluginCommands,
    global: GlobalArgs,
    config: AppConfig,
    output: OutputManager,
) -> CliResult<()> {
    let workspace = Workspace::new(&global, config);
    match cmd {
        PluginCommands::Prepare(args) => prepare(args, &workspace, &output),
        PluginCommands::Install(args) => install(args, &workspace, &output),
        PluginCommands::Manifest(args) => manifest(args, &workspace, &output),
    }
}

/// Package-manager settings every plugin require needs: recipe execution
/// allowed and the Sylius repository registered.
pub(crate) fn package_manager_setup_steps(composer: &str) -> Vec<String> {
    vec![
        format!("{composer} config extra.symfony.allow-contrib true"),
        format!("{composer} config repositories.sylius composer {SYLIUS_REPOSITORY_URL}"),
    ]
}

/// Post-require steps: migrate the project sources with rector and install
/// bundle assets.
pub(crate) fn prepare_finish_steps(rector: &str, console: &str) -> Vec<String> {
    vec![
        format!("{rector} process src"),
        format!("{console} assets:install -n"),
    ]
}

/// Rebuild the storefront assets after plugin installs touched them.
pub(crate) fn frontend_build_step(yarn: &str) -> String {
    format!("{yarn} encore production")
}

fn parse_package(raw: &str) -> CliResult<PackageReference> {
    raw.parse()
        .map_err(|e: storeforge_core::domain::DomainError| CliError::Core(e.into()))
}

#[instrument(skip_all, fields(package = %args.package))]
fn prepare(args: PluginPrepareArgs, workspace: &Workspace, output: &OutputManager) -> CliResult<()> {
    let package = parse_package(&args.package)?;

    output.header(&format!("Requiring {package}..."))?;
    let commands = &workspace.config.commands;
    let pipeline = workspace.pipeline();
    pipeline.run(
        &workspace.project_root,
        &package_manager_setup_steps(&commands.composer),
    )?;
    workspace.installer().prepare(&package, &args.constraint)?;
    pipeline.run(
        &workspace.project_root,
        &prepare_finish_steps(&commands.rector, &commands.console),
    )?;
    info!(package = %package, constraint = %args.constraint, "Plugin prepared");

    output.success(&format!("{package} required at {}", args.constraint))?;
    output.print(&format!(
        "Next: storeforge plugin install {package}"
    ))?;
    Ok(())
}

#[instrument(skip_all, fields(package = %args.package))]
fn install(args: PluginPackageArgs, workspace: &Workspace, output: &OutputManager) -> CliResult<()> {
    let package = parse_package(&args.package)?;

    output.header(&format!("Installing {package}..."))?;
    let report = workspace.installer().install(&package)?;
    let build = frontend_build_step(&workspace.config.commands.yarn);
    workspace.pipeline().run_one(&workspace.project_root, &build)?;
    info!(package = %package, matched = %report.matched, "Plugin installed");

    output.success(&super::report_line(&report))?;
    for set in &report.rector_sets {
        output.info(&format!("rector set to wire up: {set}"))?;
    }
    Ok(())
}

/// Read-only resolution: show which manifest bracket covers the installed
/// version, without running anything.
#[instrument(skip_all, fields(package = %args.package))]
fn manifest(
    args: PluginManifestArgs,
    workspace: &Workspace,
    output: &OutputManager,
) -> CliResult<()> {
    let package = parse_package(&args.package)?;
    let resolved = workspace.resolver().resolve(&package)?;

    if args.json {
        let doc = json!({
            "package": resolved.package.to_string(),
            "installed": resolved.installed,
            "target": resolved.target.to_string(),
            "matched": resolved.matched.to_string(),
            "path": resolved.path,
            "manifest": resolved.manifest,
        });
        // Raw JSON goes straight to stdout, bypassing quiet-mode filtering.
        println!("{}", serde_json::to_string_pretty(&doc).map_err(|e| {
            CliError::InvalidInput {
                message: format!("Failed to serialize resolution: {e}"),
            }
        })?);
        return Ok(());
    }

    output.header(&format!("Manifest for {package}"))?;
    output.print(&format!("  Installed version: {}", resolved.installed))?;
    output.print(&format!("  Floor target:      {}", resolved.target))?;
    output.print(&format!("  Matched bracket:   {}", resolved.matched))?;
    output.print(&format!("  Manifest path:     {}", resolved.path.display()))?;
    output.print(&format!("  Type:              {}", resolved.manifest.plugin_type))?;
    output.print(&format!("  Steps:             {}", resolved.manifest.steps.len()))?;
    output.print(&format!(
        "  Configurators:     {}",
        resolved.manifest.configurators.len()
    ))?;
    if !resolved.manifest.rector_sets.is_empty() {
        output.print(&format!(
            "  Rector sets:       {}",
            resolved.manifest.rector_sets.join(", ")
        ))?;
    }
    Ok(())
}

// ── tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn setup_registers_recipes_and_the_sylius_repository() {
        assert_eq!(
            package_manager_setup_steps("composer"),
            [
                "composer config extra.symfony.allow-contrib true",
                "composer config repositories.sylius composer https://sylius.repo.packagist.com/sylius/",
            ]
        );
    }

    #[test]
    fn prepare_finishes_with_rector_and_asset_install() {
        assert_eq!(
            prepare_finish_steps("vendor/bin/rector", "bin/console"),
            ["vendor/bin/rector process src", "bin/console assets:install -n"]
        );
    }

    #[test]
    fn install_ends_in_a_production_frontend_build() {
        assert_eq!(frontend_build_step("yarn"), "yarn encore production");
    }

    #[test]
    fn configured_executables_flow_into_the_steps() {
        let steps = package_manager_setup_steps("composer2");
        assert!(steps.iter().all(|s| s.starts_with("composer2 ")));
        assert_eq!(
            prepare_finish_steps("tools/rector", "app/console")[1],
            "app/console assets:install -n"
        );
    }
}
