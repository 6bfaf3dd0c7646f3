//! Application configuration.
//!
//! [`AppConfig`] is loaded once at startup and passed down by value.  The
//! CLI layer owns config; the core crate never sees it.
//!
//! # Resolution order (highest priority first)
//!
//! 1. CLI flags (handled at the call-site, not here)
//! 2. Environment variables (`STOREFORGE_*`, `__` as section separator)
//! 3. Config file (`--config`, or the default location if present)
//! 4. Built-in defaults (always present)

use std::path::{Path, PathBuf};

use config::{Config, Environment, File};
use serde::{Deserialize, Serialize};

/// Application configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    /// Where presets and manifests live.
    pub paths: PathsConfig,
    /// External tool invocations.
    pub commands: CommandsConfig,
    /// Output settings.
    pub output: OutputConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PathsConfig {
    /// Directory holding store preset files (`<name>.yaml`).
    pub presets: PathBuf,
    /// Base directory of the per-package manifest trees.
    pub manifests: PathBuf,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CommandsConfig {
    /// Package manager executable.
    pub composer: String,
    /// Store console entry point, relative to the project root.
    pub console: String,
    /// Frontend build tool executable.
    pub yarn: String,
    /// Rector executable, relative to the project root.
    pub rector: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OutputConfig {
    pub no_color: bool,
    pub format: String,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            paths: PathsConfig {
                presets: PathBuf::from("presets"),
                manifests: PathBuf::from("manifests"),
            },
            commands: CommandsConfig {
                composer: "composer".into(),
                console: "bin/console".into(),
                yarn: "yarn".into(),
                rector: "vendor/bin/rector".into(),
            },
            output: OutputConfig {
                no_color: false,
                format: "human".into(),
            },
        }
    }
}

impl AppConfig {
    /// Load configuration, starting from defaults.
    ///
    /// `config_file` is the path the user passed via `--config`; when `None`
    /// the default location is consulted and silently skipped if absent.
    pub fn load(config_file: Option<&PathBuf>) -> anyhow::Result<Self> {
        let mut builder = Config::builder()
            .set_default("paths.presets", "presets")?
            .set_default("paths.manifests", "manifests")?
            .set_default("commands.composer", "composer")?
            .set_default("commands.console", "bin/console")?
            .set_default("commands.yarn", "yarn")?
            .set_default("commands.rector", "vendor/bin/rector")?
            .set_default("output.no_color", false)?
            .set_default("output.format", "human")?;

        builder = match config_file {
            // Explicitly named files must exist.
            Some(path) => builder.add_source(File::from(path.clone())),
            None => builder.add_source(File::from(Self::config_path()).required(false)),
        };

        // STOREFORGE_COMMANDS__COMPOSER=composer2, etc.
        builder = builder.add_source(Environment::with_prefix("STOREFORGE").separator("__"));

        Ok(builder.build()?.try_deserialize()?)
    }

    /// Path to the default configuration file.
    ///
    /// Uses `directories::ProjectDirs` for cross-platform correctness,
    /// falling back to `.storeforge.toml` in the current directory.
    pub fn config_path() -> PathBuf {
        directories::ProjectDirs::from("com", "storeforge", "storeforge")
            .map(|d| d.config_dir().join("config.toml"))
            .unwrap_or_else(|| PathBuf::from(".storeforge.toml"))
    }

    /// Resolve a configured path against the project root. Absolute paths
    /// are taken as-is; relative ones are anchored at the root.
    pub fn resolve_path(project_root: &Path, configured: &Path) -> PathBuf {
        if configured.is_absolute() {
            configured.to_path_buf()
        } else {
            project_root.join(configured)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_use_conventional_tools() {
        let cfg = AppConfig::default();
        assert_eq!(cfg.commands.composer, "composer");
        assert_eq!(cfg.commands.console, "bin/console");
        assert_eq!(cfg.paths.manifests, PathBuf::from("manifests"));
    }

    #[test]
    fn load_without_file_returns_defaults() {
        let cfg = AppConfig::load(None).unwrap();
        assert_eq!(cfg.commands.yarn, "yarn");
        assert_eq!(cfg.commands.rector, "vendor/bin/rector");
        assert!(!cfg.output.no_color);
    }

    #[test]
    fn explicit_config_file_overrides_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("storeforge.toml");
        std::fs::write(
            &path,
            "[commands]\ncomposer = \"composer2\"\n\n[paths]\nmanifests = \"/srv/manifests\"\n",
        )
        .unwrap();

        let cfg = AppConfig::load(Some(&path)).unwrap();
        assert_eq!(cfg.commands.composer, "composer2");
        assert_eq!(cfg.paths.manifests, PathBuf::from("/srv/manifests"));
        // Untouched sections keep their defaults.
        assert_eq!(cfg.commands.console, "bin/console");
    }

    #[test]
    fn missing_explicit_config_file_is_an_error() {
        let missing = PathBuf::from("/definitely/not/here.toml");
        assert!(AppConfig::load(Some(&missing)).is_err());
    }

    #[test]
    fn relative_paths_resolve_against_project_root() {
        let resolved = AppConfig::resolve_path(Path::new("/srv/shop"), Path::new("manifests"));
        assert_eq!(resolved, PathBuf::from("/srv/shop/manifests"));

        let absolute = AppConfig::resolve_path(Path::new("/srv/shop"), Path::new("/etc/mf"));
        assert_eq!(absolute, PathBuf::from("/etc/mf"));
    }

    #[test]
    fn config_path_is_non_empty() {
        assert!(!AppConfig::config_path().as_os_str().is_empty());
    }
}
