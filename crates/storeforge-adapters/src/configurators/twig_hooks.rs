//! Template hook configurator.
//!
//! Upserts one slot under a hook key in the storefront's hooks
//! configuration. Two modes:
//!
//! ```json
//! {"kind": "twig-hooks",
//!  "options": {"hook": "sylius_shop.base.header.content.logo",
//!              "name": "content",
//!              "template": "shop/logo.html.twig",
//!              "priority": 0}}
//! ```
//!
//! overrides the slot's template, landing as
//!
//! ```yaml
//! sylius_twig_hooks:
//!   hooks:
//!     'sylius_shop.base.header.content.logo':
//!       content:
//!         template: shop/logo.html.twig
//!         priority: 0
//! ```
//!
//! while `{"hook": "...", "name": "banner", "enabled": false}` disables a
//! hookable instead of overriding it.
//!
//! Hook names contain dots, so they are treated as literal mapping keys,
//! never split the way `yaml-node` splits its dotted paths.

use std::path::Path;
use std::sync::Arc;

use tracing::debug;

use storeforge_core::{
    application::ports::{Configurator, Filesystem},
    domain::ConfiguratorKind,
    error::StoreforgeResult,
};

use super::{child_mapping, load_yaml, required_str, save_yaml};

/// Default location of the hooks configuration file.
const DEFAULT_HOOKS_FILE: &str = "config/packages/sylius_twig_hooks.yaml";

pub struct TwigHooksConfigurator {
    filesystem: Arc<dyn Filesystem>,
}

impl TwigHooksConfigurator {
    pub fn new(filesystem: Arc<dyn Filesystem>) -> Self {
        Self { filesystem }
    }
}

impl Configurator for TwigHooksConfigurator {
    fn kind(&self) -> ConfiguratorKind {
        ConfiguratorKind::TwigHooks
    }

    fn apply(&self, project_root: &Path, options: &serde_json::Value) -> StoreforgeResult<()> {
        let kind = self.kind();
        let hook = required_str(options, "hook", kind)?;
        let name = required_str(options, "name", kind)?;
        let enabled = options.get("enabled").and_then(|v| v.as_bool());
        let file = options
            .get("file")
            .and_then(|v| v.as_str())
            .unwrap_or(DEFAULT_HOOKS_FILE);

        let path = project_root.join(file);
        let mut document = load_yaml(&self.filesystem, &path, kind)?;

        let mut entry = &mut document;
        for key in ["sylius_twig_hooks", "hooks", hook, name] {
            entry = child_mapping(entry, key);
        }
        if !entry.is_mapping() {
            *entry = serde_yaml::Value::Mapping(serde_yaml::Mapping::new());
        }
        let slot = entry.as_mapping_mut().unwrap();

        match enabled {
            // Disable mode: no template involved.
            Some(enabled) => {
                slot.insert(
                    serde_yaml::Value::String("enabled".into()),
                    serde_yaml::Value::Bool(enabled),
                );
                debug!(hook = %hook, name = %name, enabled, "Hookable toggled");
            }
            None => {
                let template = required_str(options, "template", kind)?;
                let priority = options
                    .get("priority")
                    .and_then(|v| v.as_i64())
                    .unwrap_or(0);
                slot.insert(
                    serde_yaml::Value::String("template".into()),
                    serde_yaml::Value::String(template.to_string()),
                );
                slot.insert(
                    serde_yaml::Value::String("priority".into()),
                    serde_yaml::Value::Number(priority.into()),
                );
                debug!(hook = %hook, name = %name, file = %path.display(), "Hook entry upserted");
            }
        }

        save_yaml(&self.filesystem, &path, &document, kind)
    }
}

// ── tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use crate::filesystem::MemoryFilesystem;
    use serde_json::json;
    use storeforge_core::{application::ApplicationError, error::StoreforgeError};

    fn setup() -> (TwigHooksConfigurator, MemoryFilesystem) {
        let fs = MemoryFilesystem::new();
        (TwigHooksConfigurator::new(Arc::new(fs.clone())), fs)
    }

    fn read_yaml(fs: &MemoryFilesystem, path: &str) -> serde_yaml::Value {
        serde_yaml::from_str(&fs.read_file(Path::new(path)).unwrap()).unwrap()
    }

    #[test]
    fn creates_the_hooks_file_with_a_dotted_hook_key() {
        let (configurator, fs) = setup();

        configurator
            .apply(
                Path::new("/app"),
                &json!({
                    "hook": "sylius_shop.base.header.content.logo",
                    "name": "content",
                    "template": "shop/logo.html.twig"
                }),
            )
            .unwrap();

        let doc = read_yaml(&fs, "/app/config/packages/sylius_twig_hooks.yaml");
        // The dotted hook name is one key, not a nested path.
        let slot = &doc["sylius_twig_hooks"]["hooks"]["sylius_shop.base.header.content.logo"]
            ["content"];
        assert_eq!(
            slot["template"],
            serde_yaml::Value::String("shop/logo.html.twig".into())
        );
        assert_eq!(slot["priority"], serde_yaml::Value::Number(0.into()));
    }

    #[test]
    fn explicit_priority_is_written() {
        let (configurator, fs) = setup();

        configurator
            .apply(
                Path::new("/app"),
                &json!({
                    "hook": "sylius_shop.layout.header",
                    "name": "banner",
                    "template": "shop/banner.html.twig",
                    "priority": 10
                }),
            )
            .unwrap();

        let doc = read_yaml(&fs, "/app/config/packages/sylius_twig_hooks.yaml");
        assert_eq!(
            doc["sylius_twig_hooks"]["hooks"]["sylius_shop.layout.header"]["banner"]["priority"],
            serde_yaml::Value::Number(10.into())
        );
    }

    #[test]
    fn enabled_false_disables_a_hookable_without_a_template() {
        let (configurator, fs) = setup();

        configurator
            .apply(
                Path::new("/app"),
                &json!({
                    "hook": "sylius_shop.homepage.index",
                    "name": "new_collection",
                    "enabled": false
                }),
            )
            .unwrap();

        let doc = read_yaml(&fs, "/app/config/packages/sylius_twig_hooks.yaml");
        let slot = &doc["sylius_twig_hooks"]["hooks"]["sylius_shop.homepage.index"]
            ["new_collection"];
        assert_eq!(slot["enabled"], serde_yaml::Value::Bool(false));
        assert!(slot.get("template").is_none());
    }

    #[test]
    fn upserts_into_existing_hooks_preserving_siblings() {
        let (configurator, fs) = setup();
        fs.seed_file(
            "/app/config/packages/sylius_twig_hooks.yaml",
            "sylius_twig_hooks:\n  hooks:\n    'sylius_shop.layout.header':\n      menu:\n        template: shop/menu.html.twig\n",
        );

        configurator
            .apply(
                Path::new("/app"),
                &json!({
                    "hook": "sylius_shop.layout.header",
                    "name": "logo",
                    "template": "shop/logo.html.twig"
                }),
            )
            .unwrap();

        let doc = read_yaml(&fs, "/app/config/packages/sylius_twig_hooks.yaml");
        let hook = &doc["sylius_twig_hooks"]["hooks"]["sylius_shop.layout.header"];
        assert_eq!(
            hook["menu"]["template"],
            serde_yaml::Value::String("shop/menu.html.twig".into())
        );
        assert_eq!(
            hook["logo"]["template"],
            serde_yaml::Value::String("shop/logo.html.twig".into())
        );
    }

    #[test]
    fn honors_an_explicit_file_option() {
        let (configurator, fs) = setup();

        configurator
            .apply(
                Path::new("/app"),
                &json!({
                    "file": "config/hooks_custom.yaml",
                    "hook": "h",
                    "name": "n",
                    "template": "t.html.twig"
                }),
            )
            .unwrap();

        assert!(fs.read_file(Path::new("/app/config/hooks_custom.yaml")).is_some());
    }

    #[test]
    fn missing_template_option_is_reported() {
        let (configurator, _) = setup();
        let err = configurator
            .apply(Path::new("/app"), &json!({"hook": "h", "name": "n"}))
            .unwrap_err();
        assert!(matches!(
            err,
            StoreforgeError::Application(ApplicationError::MissingOption {
                option: "template",
                ..
            })
        ));
    }
}
