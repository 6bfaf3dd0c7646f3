//! CLI argument definitions using the clap derive API.
//!
//! This module is the *only* place that knows about argument names, aliases,
//! help text, and value enums.  No business logic lives here.

use clap::{Args, Parser, Subcommand, ValueEnum};

pub mod global;
pub use global::{GlobalArgs, OutputFormat};

// ── Top-level CLI ─────────────────────────────────────────────────────────────

/// Main CLI entry-point.
#[derive(Debug, Parser)]
#[command(
    name    = "storeforge",
    bin_name = "storeforge",
    version  = env!("CARGO_PKG_VERSION"),
    author   = env!("CARGO_PKG_AUTHORS"),
    about    = "\u{1f6e0} Declarative store assembly",
    long_about = "Storeforge assembles an e-commerce store from a declarative \
                  preset: requires plugins, resolves per-version install \
                  manifests, loads fixtures, and brands the storefront theme.",
    after_help = "EXAMPLES:\n\
        \x20 storeforge assemble --preset demo-store --build\n\
        \x20 storeforge plugin manifest acme/cms-plugin\n\
        \x20 storeforge plugin install acme/cms-plugin\n\
        \x20 storeforge completions bash > /usr/share/bash-completion/completions/storeforge",
    arg_required_else_help = true,
    subcommand_required    = true,
)]
pub struct Cli {
    /// Flags available on every subcommand.
    #[command(flatten)]
    pub global: GlobalArgs,

    /// Subcommand to execute.
    #[command(subcommand)]
    pub command: Commands,
}

// ── Subcommands ───────────────────────────────────────────────────────────────

/// All available subcommands.
#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Assemble a store from a preset.
    #[command(
        visible_alias = "a",
        about = "Assemble a store from a preset",
        after_help = "EXAMPLES:\n\
            \x20 storeforge assemble --preset demo-store --build\n\
            \x20 storeforge assemble --preset demo-store --deploy\n\
            \x20 storeforge assemble --preset ./presets/demo-store.yaml --build --deploy"
    )]
    Assemble(AssembleArgs),

    /// Plugin operations: prepare, install, inspect manifests.
    #[command(
        about = "Plugin management",
        subcommand,
        after_help = "EXAMPLES:\n\
            \x20 storeforge plugin prepare acme/cms-plugin --constraint '^1.7'\n\
            \x20 storeforge plugin install acme/cms-plugin\n\
            \x20 storeforge plugin manifest acme/cms-plugin --json"
    )]
    Plugin(PluginCommands),

    /// Fixture operations: stage fixture files, load them into the store.
    #[command(
        about = "Fixture management",
        subcommand,
        after_help = "EXAMPLES:\n\
            \x20 storeforge fixture prepare --preset demo-store\n\
            \x20 storeforge fixture load --preset demo-store"
    )]
    Fixture(FixtureCommands),

    /// Theme operations: generate and build the storefront branding.
    #[command(
        about = "Theme management",
        subcommand,
        after_help = "EXAMPLES:\n\
            \x20 storeforge theme prepare --preset demo-store"
    )]
    Theme(ThemeCommands),

    /// Generate shell completion scripts.
    #[command(
        about = "Generate shell completions",
        after_help = "EXAMPLES:\n\
            \x20 storeforge completions bash > ~/.local/share/bash-completion/completions/storeforge\n\
            \x20 storeforge completions zsh  > ~/.zfunc/_storeforge\n\
            \x20 storeforge completions fish > ~/.config/fish/completions/storeforge.fish"
    )]
    Completions(CompletionsArgs),
}

// ── assemble ──────────────────────────────────────────────────────────────────

/// Arguments for `storeforge assemble`.
#[derive(Debug, Args)]
pub struct AssembleArgs {
    /// Preset name (looked up in the preset directory) or a direct path to
    /// a preset file.
    #[arg(
        long = "preset",
        value_name = "NAME_OR_PATH",
        help = "Store preset to assemble"
    )]
    pub preset: String,

    /// Run the build phase: require plugins, install manifests, stage
    /// fixtures, prepare the theme.
    #[arg(long = "build", help = "Run the build phase")]
    pub build: bool,

    /// Run the deploy phase: load fixtures into the running store.
    #[arg(long = "deploy", help = "Run the deploy phase")]
    pub deploy: bool,
}

// ── plugin ────────────────────────────────────────────────────────────────────

/// Subcommands for `storeforge plugin`.
#[derive(Debug, Subcommand)]
pub enum PluginCommands {
    /// Require a plugin package so it appears in the lock file.
    Prepare(PluginPrepareArgs),
    /// Install an already-required plugin from its resolved manifest.
    Install(PluginPackageArgs),
    /// Resolve and print the manifest for an installed plugin (read-only).
    Manifest(PluginManifestArgs),
}

/// Arguments for `storeforge plugin prepare`.
#[derive(Debug, Args)]
pub struct PluginPrepareArgs {
    /// Package identifier, `vendor/name`.
    #[arg(value_name = "PACKAGE", help = "Package as vendor/name")]
    pub package: String,

    /// Composer version constraint to require.
    #[arg(
        long = "constraint",
        value_name = "CONSTRAINT",
        default_value = "*",
        help = "Version constraint (e.g. ^1.7)"
    )]
    pub constraint: String,
}

/// Arguments for plugin subcommands that only take a package.
#[derive(Debug, Args)]
pub struct PluginPackageArgs {
    /// Package identifier, `vendor/name`.
    #[arg(value_name = "PACKAGE", help = "Package as vendor/name")]
    pub package: String,
}

/// Arguments for `storeforge plugin manifest`.
#[derive(Debug, Args)]
pub struct PluginManifestArgs {
    /// Package identifier, `vendor/name`.
    #[arg(value_name = "PACKAGE", help = "Package as vendor/name")]
    pub package: String,

    /// Print the resolution result as JSON.
    #[arg(long = "json", help = "Machine-readable JSON output")]
    pub json: bool,
}

// ── fixture ───────────────────────────────────────────────────────────────────

/// Subcommands for `storeforge fixture`.
#[derive(Debug, Subcommand)]
pub enum FixtureCommands {
    /// Stage the preset's fixture suite and images into the project.
    Prepare(PresetArgs),
    /// Load the staged fixture suite into the store.
    Load(PresetArgs),
}

// ── theme ─────────────────────────────────────────────────────────────────────

/// Subcommands for `storeforge theme`.
#[derive(Debug, Subcommand)]
pub enum ThemeCommands {
    /// Generate the branding stylesheet, install the logo, build assets.
    Prepare(PresetArgs),
}

/// Shared `--preset` argument for preset-driven subcommands.
#[derive(Debug, Args)]
pub struct PresetArgs {
    /// Preset name (looked up in the preset directory) or a direct path.
    #[arg(
        long = "preset",
        value_name = "NAME_OR_PATH",
        help = "Store preset to read"
    )]
    pub preset: String,
}

// ── completions ───────────────────────────────────────────────────────────────

/// Arguments for `storeforge completions`.
#[derive(Debug, Args)]
pub struct CompletionsArgs {
    /// Target shell.
    #[arg(value_enum, help = "Shell to generate completions for")]
    pub shell: Shell,
}

/// Supported shells for completion generation.
#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum Shell {
    Bash,
    Zsh,
    Fish,
    PowerShell,
    Elvish,
}

// ── tests ─────────────────────────────────────────────────────────────────────
