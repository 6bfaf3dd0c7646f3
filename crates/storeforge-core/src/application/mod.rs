//! Application layer for Storeforge.
//!
//! This layer contains:
//! - **Services**: Use case orchestration (ManifestResolver, PluginInstaller)
//! - **Ports**: Interface definitions (traits) for external dependencies
//! - **Errors**: Application-specific error types
//!
//! The application layer coordinates the domain layer but contains no
//! business logic itself. All business rules live in `crate::domain`.

pub mod error;
pub mod ports;
pub mod services;

// Re-export main services
pub use services::{
    ConfiguratorRegistry, InstallReport, ManifestResolver, PluginInstaller, ResolvedManifest,
    StepOutcome, StepPipeline,
};

// Re-export port traits (for adapter implementation)
pub use ports::{Configurator, DirEntryInfo, Filesystem, ProcessOutput, ProcessRunner, VersionSource};

pub use error::ApplicationError;
