//! Application services - orchestrate use cases.
//!
//! Services coordinate the domain layer and ports to accomplish high-level
//! use cases like "resolve the manifest for this plugin" or "install every
//! plugin the preset names".

pub mod configurator_registry;
pub mod installer;
pub mod manifest_resolver;
pub mod pipeline;

pub use configurator_registry::ConfiguratorRegistry;
pub use installer::{InstallReport, PluginInstaller};
pub use manifest_resolver::{ManifestResolver, ResolvedManifest};
pub use pipeline::{StepOutcome, StepPipeline};
