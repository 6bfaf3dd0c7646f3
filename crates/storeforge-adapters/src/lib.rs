//! Infrastructure adapters for Storeforge.
//!
//! This crate implements the ports defined in
//! `storeforge_core::application::ports`. It contains all external
//! dependencies and I/O operations.

pub mod configurators;
pub mod filesystem;
pub mod lockfile;
pub mod preset;
pub mod process;

// Re-export commonly used adapters
pub use configurators::{TwigHooksConfigurator, YamlNodeConfigurator};
pub use filesystem::{LocalFilesystem, MemoryFilesystem};
pub use lockfile::ComposerLockSource;
pub use preset::PresetLoader;
pub use process::ShellRunner;
