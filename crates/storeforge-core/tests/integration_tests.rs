//! Integration tests for storeforge-core.
//!
//! Drives the full preset workflow (prepare, resolve, install) through
//! in-memory port implementations, without touching the real filesystem.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};

use storeforge_core::{
    application::{
        ports::{Configurator, DirEntryInfo, Filesystem, ProcessOutput, ProcessRunner, VersionSource},
        ConfiguratorRegistry, ManifestResolver, PluginInstaller, StepPipeline,
    },
    domain::{ConfiguratorKind, DomainError, PackageReference, StorePreset},
    error::{StoreforgeError, StoreforgeResult},
};

// ── in-memory ports ──────────────────────────────────────────────────────────

struct TableVersions(BTreeMap<String, String>);

impl VersionSource for TableVersions {
    fn installed_version(&self, package: &PackageReference) -> StoreforgeResult<Option<String>> {
        Ok(self.0.get(&package.to_string()).cloned())
    }
}

struct TableFilesystem(BTreeMap<PathBuf, String>);

impl TableFilesystem {
    fn new(files: &[(&str, &str)]) -> Self {
        Self(
            files
                .iter()
                .map(|(p, c)| (PathBuf::from(p), c.to_string()))
                .collect(),
        )
    }
}

impl Filesystem for TableFilesystem {
    fn exists(&self, path: &Path) -> bool {
        self.0.contains_key(path) || self.0.keys().any(|p| p.starts_with(path))
    }

    fn is_file(&self, path: &Path) -> bool {
        self.0.contains_key(path)
    }

    fn list_entries(&self, path: &Path) -> StoreforgeResult<Vec<DirEntryInfo>> {
        let mut entries: Vec<DirEntryInfo> = Vec::new();
        for child in self.0.keys() {
            if let Ok(rest) = child.strip_prefix(path) {
                if let Some(first) = rest.components().next() {
                    let name = first.as_os_str().to_string_lossy().to_string();
                    let is_dir = rest.components().count() > 1;
                    if !entries.iter().any(|e| e.name == name) {
                        entries.push(DirEntryInfo { name, is_dir });
                    }
                }
            }
        }
        Ok(entries)
    }

    fn read_to_string(&self, path: &Path) -> StoreforgeResult<String> {
        Ok(self.0[path].clone())
    }

    fn write_file(&self, _: &Path, _: &str) -> StoreforgeResult<()> {
        unimplemented!("read-only test filesystem")
    }

    fn create_dir_all(&self, _: &Path) -> StoreforgeResult<()> {
        unimplemented!("read-only test filesystem")
    }

    fn copy_file(&self, _: &Path, _: &Path) -> StoreforgeResult<()> {
        unimplemented!("read-only test filesystem")
    }
}

#[derive(Clone, Default)]
struct CommandLog(Arc<Mutex<Vec<String>>>);

impl CommandLog {
    fn snapshot(&self) -> Vec<String> {
        self.0.lock().unwrap().clone()
    }
}

impl ProcessRunner for CommandLog {
    fn run_shell(&self, command: &str, _: &Path) -> StoreforgeResult<ProcessOutput> {
        self.0.lock().unwrap().push(command.to_string());
        Ok(ProcessOutput {
            status: 0,
            stdout: String::new(),
            stderr: String::new(),
        })
    }
}

#[derive(Clone, Default)]
struct AppliedLog(Arc<Mutex<Vec<serde_json::Value>>>);

impl Configurator for AppliedLog {
    fn kind(&self) -> ConfiguratorKind {
        ConfiguratorKind::YamlNode
    }

    fn apply(&self, _: &Path, options: &serde_json::Value) -> StoreforgeResult<()> {
        self.0.lock().unwrap().push(options.clone());
        Ok(())
    }
}

// ── fixtures ─────────────────────────────────────────────────────────────────

fn demo_preset() -> StorePreset {
    serde_json::from_str(
        r#"{
            "name": "demo-store",
            "plugins": {
                "acme/cms-plugin": "^1.7",
                "acme/wishlist-plugin": "^2.0"
            }
        }"#,
    )
    .unwrap()
}

fn demo_installer(log: CommandLog, applied: AppliedLog) -> PluginInstaller {
    let versions = TableVersions(BTreeMap::from([
        ("acme/cms-plugin".to_string(), "1.7.4".to_string()),
        ("acme/wishlist-plugin".to_string(), "2.1.0".to_string()),
    ]));

    let filesystem = TableFilesystem::new(&[
        (
            "/app/manifests/acme/cms-plugin/1.5/manifest.json",
            r#"{"steps": ["bin/console sylius:theme:assets:install -n"]}"#,
        ),
        (
            "/app/manifests/acme/cms-plugin/2.0/manifest.json",
            "{}",
        ),
        (
            "/app/manifests/acme/wishlist-plugin/2.0/manifest.json",
            r#"{
                "configurators": [{
                    "kind": "yaml-node",
                    "options": {"file": "config/packages/wishlist.yaml", "key": "wishlist.enabled", "value": true}
                }]
            }"#,
        ),
    ]);

    let resolver = ManifestResolver::new(
        Box::new(versions),
        Box::new(filesystem),
        "/app/manifests",
    );
    let pipeline = StepPipeline::new(Box::new(log));
    let mut registry = ConfiguratorRegistry::new();
    registry.register(Box::new(applied));

    PluginInstaller::new(resolver, pipeline, registry, "/app", "composer")
}

// ── tests ─────────────────────────────────────────────────────────────────────

#[test]
fn prepare_all_requires_every_preset_plugin() {
    let log = CommandLog::default();
    let installer = demo_installer(log.clone(), AppliedLog::default());

    let prepared = installer.prepare_all(&demo_preset()).unwrap();
    assert_eq!(prepared, 2);

    let commands = log.snapshot();
    assert_eq!(commands.len(), 2);
    assert!(commands[0].starts_with("composer require acme/cms-plugin:^1.7"));
    assert!(commands[1].starts_with("composer require acme/wishlist-plugin:^2.0"));
}

#[test]
fn install_all_resolves_floor_brackets_and_applies_configurators() {
    let log = CommandLog::default();
    let applied = AppliedLog::default();
    let installer = demo_installer(log.clone(), applied.clone());

    let reports = installer.install_all(&demo_preset()).unwrap();
    assert_eq!(reports.len(), 2);

    // cms-plugin is at 1.7.4; the only bracket at or below 1.7 is 1.5.
    assert_eq!(reports[0].matched.to_string(), "1.5");
    assert_eq!(reports[0].steps_run, 1);

    // wishlist-plugin is at 2.1.0; the 2.0 bracket covers it.
    assert_eq!(reports[1].matched.to_string(), "2.0");
    assert_eq!(reports[1].configurators_applied, 1);

    assert_eq!(
        log.snapshot(),
        ["bin/console sylius:theme:assets:install -n"]
    );
    let options = applied.0.lock().unwrap();
    assert_eq!(options[0]["key"], "wishlist.enabled");
}

#[test]
fn composer_normalized_versions_resolve_to_their_floor_bracket() {
    // Composer writes its canonical four-component form into the lock file;
    // "1.7.3.0" must floor to 1.7 and match the 1.5 bracket.
    let versions = TableVersions(BTreeMap::from([(
        "acme/cms-plugin".to_string(),
        "1.7.3.0".to_string(),
    )]));
    let filesystem = TableFilesystem::new(&[
        ("/app/manifests/acme/cms-plugin/1.5/manifest.json", "{}"),
        ("/app/manifests/acme/cms-plugin/2.0/manifest.json", "{}"),
    ]);
    let resolver =
        ManifestResolver::new(Box::new(versions), Box::new(filesystem), "/app/manifests");

    let resolved = resolver
        .resolve(&"acme/cms-plugin".parse::<PackageReference>().unwrap())
        .unwrap();
    assert_eq!(resolved.target.to_string(), "1.7");
    assert_eq!(resolved.matched.to_string(), "1.5");
}

#[test]
fn install_all_fails_when_a_preset_plugin_is_not_installed() {
    let log = CommandLog::default();
    let installer = demo_installer(log, AppliedLog::default());

    let mut preset = demo_preset();
    preset
        .plugins
        .insert("acme/missing-plugin".into(), "^1.0".into());

    let err = installer.install_all(&preset).unwrap_err();
    // missing-plugin has no manifest directory at all, so the failure is
    // "unsupported", not "no matching bracket".
    assert!(matches!(
        err,
        StoreforgeError::Domain(DomainError::UnsupportedPlugin { .. })
    ));
}

#[test]
fn preset_with_malformed_plugin_key_fails_validation() {
    let mut preset = demo_preset();
    preset.plugins.insert("not-a-package".into(), "^1.0".into());
    assert!(matches!(
        preset.validate(),
        Err(DomainError::MalformedPackageIdentifier { .. })
    ));
}
