//! Application ports (traits) for external dependencies.
//!
//! In hexagonal architecture, ports define interfaces that the application
//! needs from the outside world. Adapters in `storeforge-adapters` implement
//! these.
//!
//! ## Port Types
//!
//! - **Driven (Output) Ports**: Called by application, implemented by infrastructure
//!   - `VersionSource`: Installed package versions
//!   - `Filesystem`: File operations
//!   - `ProcessRunner`: Shell step execution
//!   - `Configurator`: Configuration file edits
//!
//! - **Driving (Input) Ports**: Called by external world, implemented by application
//!   - (Defined in CLI layer, implemented by services)

pub mod output;

pub use output::{Configurator, DirEntryInfo, Filesystem, ProcessOutput, ProcessRunner, VersionSource};
