//! Implementation of `storeforge theme prepare`.
//!
//! Branding pipeline, per storefront area:
//!
//! 1. Generate `assets/<area>/styles/custom-theme.scss` from the area's
//!    theme block (`:root` custom properties plus a derived `.btn-primary`
//!    override) and wire it into `assets/<area>/entrypoint.js`.
//! 2. Copy the area logo from the preset's theme assets into
//!    `assets/<area>/images/`.
//! 3. Run the frontend build once, then locate the hashed logo in the
//!    build output and write `templates/<area>/logo.html.twig` around it.
//! 4. Register the logo template in the area's header hook and disable the
//!    stock homepage hookables the custom branding replaces.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use serde_json::json;
use tracing::{debug, info, instrument, warn};

use storeforge_adapters::TwigHooksConfigurator;
use storeforge_core::{
    application::ports::{Configurator, Filesystem},
    domain::{StorePreset, ThemeConfig},
};

use crate::{
    cli::{GlobalArgs, PresetArgs, ThemeCommands},
    commands::Workspace,
    config::AppConfig,
    error::CliResult,
    output::OutputManager,
};

const STYLESHEET_NAME: &str = "custom-theme.scss";
const IMPORT_LINE: &str = "import './styles/custom-theme.scss';";
const ACTIVE_SHADOW: &str = "inset 0 3px 5px rgba(0, 0, 0, 0.125)";

pub fn execute(
    cmd: ThemeCommands,
    global: GlobalArgs,
    config: AppConfig,
    output: OutputManager,
) -> CliResult<()> {
    let workspace = Workspace::new(&global, config);
    match cmd {
        ThemeCommands::Prepare(args) => prepare(args, &workspace, &output),
    }
}

#[instrument(skip_all, fields(preset = %args.preset))]
fn prepare(args: PresetArgs, workspace: &Workspace, output: &OutputManager) -> CliResult<()> {
    let (preset, assets_dir) = workspace.load_preset(&args.preset)?;
    run_prepare(workspace, output, &preset, &assets_dir)
}

/// The full theme pipeline, shared with `storeforge assemble`.
pub(crate) fn run_prepare(
    workspace: &Workspace,
    output: &OutputManager,
    preset: &StorePreset,
    assets_dir: &Path,
) -> CliResult<()> {
    if preset.themes.is_empty() {
        output.info(&format!(
            "Preset '{}' has no themes, nothing to do",
            preset.name
        ))?;
        return Ok(());
    }

    output.header(&format!("Preparing themes for '{}'...", preset.name))?;

    let filesystem = &workspace.filesystem;
    let root = &workspace.project_root;

    for (area, theme) in &preset.themes {
        write_area_stylesheet(filesystem, root, area, theme)?;
        copy_area_logo(filesystem, root, assets_dir, area, theme)?;
        output.success(&format!("Area '{area}' branded"))?;
    }

    // One build covers every area's entrypoint.
    let build = format!("{} encore dev", workspace.config.commands.yarn);
    workspace.pipeline().run_one(root, &build)?;

    for (area, theme) in &preset.themes {
        if let Some(logo) = &theme.logo {
            install_logo_template(filesystem, root, area, logo)?;
            output.success(&format!("Area '{area}' logo installed"))?;
        }
    }

    disable_replaced_hookables(filesystem, root)?;

    info!(preset = %preset.name, areas = preset.themes.len(), "Themes prepared");
    output.success("Themes ready")?;
    Ok(())
}

/// Write the area stylesheet and wire it into the area entry point.
pub(crate) fn write_area_stylesheet(
    filesystem: &Arc<dyn Filesystem>,
    project_root: &Path,
    area: &str,
    theme: &ThemeConfig,
) -> CliResult<()> {
    let scss_path = project_root
        .join("assets")
        .join(area)
        .join("styles")
        .join(STYLESHEET_NAME);
    if let Some(parent) = scss_path.parent() {
        filesystem.create_dir_all(parent)?;
    }
    filesystem.write_file(&scss_path, &render_scss(theme))?;
    debug!(path = %scss_path.display(), "Area stylesheet written");

    let entry_path = project_root.join("assets").join(area).join("entrypoint.js");
    let current = if filesystem.is_file(&entry_path) {
        filesystem.read_to_string(&entry_path)?
    } else {
        String::new()
    };
    if !current.lines().any(|l| l.trim() == IMPORT_LINE) {
        let mut updated = current;
        if !updated.is_empty() && !updated.ends_with('\n') {
            updated.push('\n');
        }
        updated.push_str(IMPORT_LINE);
        updated.push('\n');
        if let Some(parent) = entry_path.parent() {
            filesystem.create_dir_all(parent)?;
        }
        filesystem.write_file(&entry_path, &updated)?;
        debug!(path = %entry_path.display(), "Entry point import added");
    }
    Ok(())
}

/// Copy the area logo from `<assets_dir>/themes/<area>/` into the project's
/// frontend assets, where the build pipeline picks it up.
pub(crate) fn copy_area_logo(
    filesystem: &Arc<dyn Filesystem>,
    project_root: &Path,
    assets_dir: &Path,
    area: &str,
    theme: &ThemeConfig,
) -> CliResult<()> {
    let Some(logo) = &theme.logo else {
        return Ok(());
    };

    let source = assets_dir.join("themes").join(area).join(logo);
    let target = project_root
        .join("assets")
        .join(area)
        .join("images")
        .join(logo);
    if let Some(parent) = target.parent() {
        filesystem.create_dir_all(parent)?;
    }
    filesystem.copy_file(&source, &target)?;
    debug!(source = %source.display(), target = %target.display(), "Logo copied");
    Ok(())
}

/// Write the logo Twig template around the built (hashed) logo file and
/// register it in the area's header hook.
pub(crate) fn install_logo_template(
    filesystem: &Arc<dyn Filesystem>,
    project_root: &Path,
    area: &str,
    logo: &str,
) -> CliResult<()> {
    let built = match find_built_logo(filesystem, project_root, area, logo) {
        Some(name) => name,
        None => {
            warn!(area, logo, "Build output has no logo; templating the unhashed name");
            logo.to_string()
        }
    };
    let asset_path = format!("build/app/{area}/images/{built}");

    let template_path = project_root
        .join("templates")
        .join(area)
        .join("logo.html.twig");
    if let Some(parent) = template_path.parent() {
        filesystem.create_dir_all(parent)?;
    }
    filesystem.write_file(
        &template_path,
        &format!(
            "<img src=\"{{{{ asset('{asset_path}') }}}}\" alt=\"{{{{ sylius.channel.name }}}}\" />\n"
        ),
    )?;

    let hooks = TwigHooksConfigurator::new(Arc::clone(filesystem));
    hooks.apply(
        project_root,
        &json!({
            "hook": format!("sylius_{area}.base.header.content.logo"),
            "name": "content",
            "template": format!("{area}/logo.html.twig"),
            "priority": 0
        }),
    )?;
    Ok(())
}

/// Turn off the stock homepage hookables the branded storefront replaces.
pub(crate) fn disable_replaced_hookables(
    filesystem: &Arc<dyn Filesystem>,
    project_root: &Path,
) -> CliResult<()> {
    let hooks = TwigHooksConfigurator::new(Arc::clone(filesystem));
    for name in ["new_collection", "banner"] {
        hooks.apply(
            project_root,
            &json!({
                "hook": "sylius_shop.homepage.index",
                "name": name,
                "enabled": false
            }),
        )?;
    }
    Ok(())
}

/// Render the theme block as SCSS: custom properties in `:root`, plus a
/// `.btn-primary` rule derived from them.
pub(crate) fn render_scss(theme: &ThemeConfig) -> String {
    let mut out = String::new();

    if !theme.css_variables.is_empty() {
        out.push_str(":root {\n");
        for (key, value) in &theme.css_variables {
            out.push_str(&format!("  {key}: {value};\n"));
        }
        out.push_str("}\n");
    }

    let btn_color = theme.variable_or(&["--bs-text-color"], "#000");
    let btn_bg = theme.variable_or(&["--bs-btn-bg", "--bs-primary"], "#000");
    let hover_bg = theme.variable_or(&["--bs-btn-hover-bg", "--bs-primary"], "#000");
    let focus_shadow_rgb = theme.variable_or(&["--bs-primary-rgb"], "0, 0, 0");
    let active_bg = theme.variable_or(&["--bs-primary"], "#000");
    let disabled_bg = btn_bg;

    if !out.is_empty() {
        out.push('\n');
    }
    out.push_str(".btn-primary {\n");
    out.push_str(&format!("  --bs-btn-color: {btn_color};\n"));
    out.push_str(&format!("  --bs-btn-bg: {btn_bg};\n"));
    out.push_str(&format!("  --bs-btn-border-color: {btn_bg};\n"));
    out.push_str(&format!("  --bs-btn-hover-color: {btn_color};\n"));
    out.push_str(&format!("  --bs-btn-hover-bg: {hover_bg};\n"));
    out.push_str(&format!("  --bs-btn-hover-border-color: {hover_bg};\n"));
    out.push_str(&format!("  --bs-btn-focus-shadow-rgb: {focus_shadow_rgb};\n"));
    out.push_str(&format!("  --bs-btn-active-color: {btn_color};\n"));
    out.push_str(&format!("  --bs-btn-active-bg: {active_bg};\n"));
    out.push_str(&format!("  --bs-btn-active-border-color: {active_bg};\n"));
    out.push_str(&format!("  --bs-btn-active-shadow: {ACTIVE_SHADOW};\n"));
    out.push_str(&format!("  --bs-btn-disabled-color: {btn_color};\n"));
    out.push_str(&format!("  --bs-btn-disabled-bg: {disabled_bg};\n"));
    out.push_str(&format!("  --bs-btn-disabled-border-color: {disabled_bg};\n"));
    out.push_str("}\n");

    out
}

/// Look for the hashed logo the build pipeline emitted, e.g. `logo.3f9a2c.png`
/// for `logo.png`. The unhashed name also counts.
pub(crate) fn find_built_logo(
    filesystem: &Arc<dyn Filesystem>,
    project_root: &Path,
    area: &str,
    logo: &str,
) -> Option<String> {
    let images_dir: PathBuf = project_root
        .join("public")
        .join("build")
        .join("app")
        .join(area)
        .join("images");
    let original = Path::new(logo);
    let stem = original.file_stem()?.to_string_lossy();
    let ext = original.extension()?.to_string_lossy();

    let entries = filesystem.list_entries(&images_dir).ok()?;
    entries
        .into_iter()
        .filter(|e| !e.is_dir)
        .map(|e| e.name)
        .find(|name| {
            name == logo
                || (name.starts_with(&format!("{stem}.")) && name.ends_with(&format!(".{ext}")))
        })
}

// ── tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::BTreeMap;
    use storeforge_adapters::MemoryFilesystem;

    fn theme() -> ThemeConfig {
        ThemeConfig {
            css_variables: BTreeMap::from([
                ("--bs-body-bg".to_string(), "#f8f9fa".to_string()),
                ("--bs-primary".to_string(), "#1a7f5a".to_string()),
                ("--bs-primary-rgb".to_string(), "26, 127, 90".to_string()),
            ]),
            logo: Some("logo.png".into()),
        }
    }

    #[test]
    fn scss_contains_root_variables_and_derived_button_rule() {
        let scss = render_scss(&theme());
        assert!(scss.contains(":root {"));
        assert!(scss.contains("  --bs-body-bg: #f8f9fa;"));
        assert!(scss.contains(".btn-primary {"));
        // No --bs-btn-bg in the preset, so the primary color wins.
        assert!(scss.contains("  --bs-btn-bg: #1a7f5a;"));
        assert!(scss.contains("  --bs-btn-focus-shadow-rgb: 26, 127, 90;"));
        assert!(scss.contains("  --bs-btn-active-shadow: inset 0 3px 5px rgba(0, 0, 0, 0.125);"));
    }

    #[test]
    fn empty_theme_still_renders_button_defaults() {
        let scss = render_scss(&ThemeConfig::default());
        assert!(!scss.contains(":root"));
        assert!(scss.contains("  --bs-btn-bg: #000;"));
        assert!(scss.contains("  --bs-btn-focus-shadow-rgb: 0, 0, 0;"));
    }

    #[test]
    fn stylesheet_import_is_appended_once_per_area() {
        let memory = MemoryFilesystem::new();
        memory.seed_file("/app/assets/shop/entrypoint.js", "import './app.js';\n");
        let filesystem: Arc<dyn Filesystem> = Arc::new(memory.clone());

        write_area_stylesheet(&filesystem, Path::new("/app"), "shop", &theme()).unwrap();
        write_area_stylesheet(&filesystem, Path::new("/app"), "shop", &theme()).unwrap();

        let entry = memory
            .read_file(Path::new("/app/assets/shop/entrypoint.js"))
            .unwrap();
        assert_eq!(entry.matches(IMPORT_LINE).count(), 1);
        assert!(entry.starts_with("import './app.js';\n"));
        assert!(memory
            .read_file(Path::new("/app/assets/shop/styles/custom-theme.scss"))
            .is_some());
    }

    #[test]
    fn missing_entry_point_is_created() {
        let memory = MemoryFilesystem::new();
        let filesystem: Arc<dyn Filesystem> = Arc::new(memory.clone());

        write_area_stylesheet(&filesystem, Path::new("/app"), "admin", &theme()).unwrap();

        let entry = memory
            .read_file(Path::new("/app/assets/admin/entrypoint.js"))
            .unwrap();
        assert_eq!(entry.trim(), IMPORT_LINE);
    }

    #[test]
    fn logo_is_copied_from_the_preset_theme_assets() {
        let memory = MemoryFilesystem::new();
        memory.seed_file("/presets/demo/themes/shop/logo.png", "png-bytes");
        let filesystem: Arc<dyn Filesystem> = Arc::new(memory.clone());

        copy_area_logo(
            &filesystem,
            Path::new("/app"),
            Path::new("/presets/demo"),
            "shop",
            &theme(),
        )
        .unwrap();

        assert_eq!(
            memory
                .read_file(Path::new("/app/assets/shop/images/logo.png"))
                .as_deref(),
            Some("png-bytes")
        );
    }

    #[test]
    fn logo_template_points_at_the_hashed_build_output() {
        let memory = MemoryFilesystem::new();
        memory.seed_file("/app/public/build/app/shop/images/logo.3f9a2c.png", "");
        let filesystem: Arc<dyn Filesystem> = Arc::new(memory.clone());

        install_logo_template(&filesystem, Path::new("/app"), "shop", "logo.png").unwrap();

        let template = memory
            .read_file(Path::new("/app/templates/shop/logo.html.twig"))
            .unwrap();
        assert!(template.contains("asset('build/app/shop/images/logo.3f9a2c.png')"));

        let hooks = memory
            .read_file(Path::new("/app/config/packages/sylius_twig_hooks.yaml"))
            .unwrap();
        assert!(hooks.contains("sylius_shop.base.header.content.logo"));
        assert!(hooks.contains("shop/logo.html.twig"));
        assert!(hooks.contains("priority: 0"));
    }

    #[test]
    fn unhashed_logo_is_a_fallback_when_the_build_kept_the_name() {
        let memory = MemoryFilesystem::new();
        memory.seed_file("/app/public/build/app/shop/images/logo.png", "");
        let filesystem: Arc<dyn Filesystem> = Arc::new(memory.clone());

        assert_eq!(
            find_built_logo(&filesystem, Path::new("/app"), "shop", "logo.png").as_deref(),
            Some("logo.png")
        );
    }

    #[test]
    fn stock_homepage_hookables_are_disabled() {
        let memory = MemoryFilesystem::new();
        let filesystem: Arc<dyn Filesystem> = Arc::new(memory.clone());

        disable_replaced_hookables(&filesystem, Path::new("/app")).unwrap();

        let hooks: serde_yaml::Value = serde_yaml::from_str(
            &memory
                .read_file(Path::new("/app/config/packages/sylius_twig_hooks.yaml"))
                .unwrap(),
        )
        .unwrap();
        let index = &hooks["sylius_twig_hooks"]["hooks"]["sylius_shop.homepage.index"];
        assert_eq!(index["new_collection"]["enabled"], serde_yaml::Value::Bool(false));
        assert_eq!(index["banner"]["enabled"], serde_yaml::Value::Bool(false));
    }
}
