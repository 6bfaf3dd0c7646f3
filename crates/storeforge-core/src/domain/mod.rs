//! Domain layer: pure types and rules, no I/O.
//!
//! | Module     | Contents                                              |
//! |------------|-------------------------------------------------------|
//! | `package`  | `vendor/name` package identity                        |
//! | `version`  | `major.minor` grammar and installed-version normalization |
//! | `manifest` | Manifest wire format and the configurator tag set     |
//! | `preset`   | Immutable store preset snapshot                       |
//! | `error`    | Domain error taxonomy                                 |

pub mod error;
pub mod manifest;
pub mod package;
pub mod preset;
pub mod version;

pub use error::{DomainError, ErrorCategory};
pub use manifest::{
    ConfiguratorKind, ConfiguratorSpec, Manifest, PluginType, MANIFEST_FILE,
};
pub use package::PackageReference;
pub use preset::{FixtureConfig, StorePreset, ThemeConfig};
pub use version::{normalize_installed, MinorVersion};
