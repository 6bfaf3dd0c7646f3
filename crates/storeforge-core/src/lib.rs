//! Storeforge Core - Hexagonal Architecture Implementation
//!
//! This crate provides the domain and application layers for the Storeforge
//! store assembly tool, following hexagonal (ports and adapters) architecture.
//!
//! ## Architecture Overview
//!
//! ```text
//! ┌─────────────────────────────────────────┐
//! │         storeforge-cli (CLI)            │
//! │     (Implements Driving Ports)          │
//! └──────────────────┬──────────────────────┘
//!                    │ calls
//!                    ▼
//! ┌─────────────────────────────────────────┐
//! │         Application Services            │
//! │  (ManifestResolver, PluginInstaller)    │
//! │         Orchestrates Use Cases          │
//! └──────────────────┬──────────────────────┘
//!                    │ uses
//!                    ▼
//! ┌─────────────────────────────────────────┐
//! │      Application Ports (Traits)         │
//! │ (VersionSource, Filesystem, Runner, …)  │
//! └──────────────────┬──────────────────────┘
//!                    │ implemented by
//!                    ▼
//! ┌─────────────────────────────────────────┐
//! │    storeforge-adapters (Infrastructure) │
//! │ (ComposerLockSource, LocalFilesystem)   │
//! └─────────────────────────────────────────┘
//!                    │
//!                    ▼
//! ┌─────────────────────────────────────────┐
//! │       Domain Layer (Pure Logic)         │
//! │ (PackageReference, MinorVersion,        │
//! │  Manifest, StorePreset)                 │
//! │       No External Dependencies          │
//! └─────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//!
//! ```rust,ignore
//! use storeforge_core::{
//!     application::ManifestResolver,
//!     domain::PackageReference,
//! };
//!
//! // 1. Parse the package identity
//! let package: PackageReference = "acme/cms-plugin".parse().unwrap();
//!
//! // 2. Use the resolver (with injected adapters)
//! let resolver = ManifestResolver::new(versions, filesystem, "/app/manifests");
//! let resolved = resolver.resolve(&package).unwrap();
//! println!("matched bracket {}", resolved.matched);
//! ```

// Re-export domain layer (stable, well-defined API)
pub mod domain;

// Re-export application layer (orchestration logic)
pub mod application;

// Re-export error types
pub mod error;

// Public API - what external crates should use
pub mod prelude {
    pub use crate::application::{
        ports::{Configurator, Filesystem, ProcessRunner, VersionSource},
        ConfiguratorRegistry, InstallReport, ManifestResolver, PluginInstaller, ResolvedManifest,
        StepPipeline,
    };
    pub use crate::domain::{
        ConfiguratorKind, Manifest, MinorVersion, PackageReference, StorePreset,
    };
    pub use crate::error::{StoreforgeError, StoreforgeResult};
}

// Version info
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
