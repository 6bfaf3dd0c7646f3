//! Application layer errors.
//!
//! These errors represent failures in orchestration, not business logic.
//! Business logic errors are `DomainError` from `crate::domain`.

use std::path::PathBuf;
use thiserror::Error;

use crate::domain::ConfiguratorKind;
use crate::error::ErrorCategory;

/// Errors that occur during application orchestration.
#[derive(Debug, Error, Clone)]
pub enum ApplicationError {
    /// An installation step exited non-zero. The pipeline stops at the
    /// first failure and reports which step broke.
    #[error("Step '{step}' failed with exit status {status}")]
    StepFailed {
        step: String,
        status: i32,
        stderr: String,
    },

    /// A process could not be spawned at all (missing binary, bad cwd).
    #[error("Failed to run '{command}': {reason}")]
    ProcessFailed { command: String, reason: String },

    /// Filesystem operation failed.
    #[error("Filesystem error at {path}: {reason}")]
    FilesystemError { path: PathBuf, reason: String },

    /// No preset file at the given path.
    #[error("Store preset not found: {path}")]
    PresetNotFound { path: PathBuf },

    /// Preset file exists but is not valid YAML for the preset schema.
    #[error("Failed to parse store preset {path}: {reason}")]
    PresetParse { path: PathBuf, reason: String },

    /// Lock file exists but its contents could not be read as expected.
    #[error("Failed to read lock file {path}: {reason}")]
    LockfileError { path: PathBuf, reason: String },

    /// A manifest references a configurator kind nothing registered.
    #[error("No configurator registered for kind '{kind}'")]
    ConfiguratorNotRegistered { kind: ConfiguratorKind },

    /// A configurator's options are missing a required field.
    #[error("Configurator '{kind}' is missing required option '{option}'")]
    MissingOption {
        kind: ConfiguratorKind,
        option: &'static str,
    },

    /// A configurator accepted its options but failed while applying them.
    #[error("Configurator '{kind}' failed: {reason}")]
    ConfiguratorFailed {
        kind: ConfiguratorKind,
        reason: String,
    },
}

impl ApplicationError {
    /// Get user-actionable suggestions.
    pub fn suggestions(&self) -> Vec<String> {
        match self {
            Self::StepFailed { step, stderr, .. } => {
                let mut s = vec![
                    format!("The command was: {step}"),
                    "Re-run it by hand from the project root to see full output".into(),
                ];
                if !stderr.trim().is_empty() {
                    s.push(format!("Last stderr output: {}", stderr.trim()));
                }
                s
            }
            Self::ProcessFailed { command, .. } => vec![
                format!("Could not start: {command}"),
                "Check that the binary is installed and on PATH".into(),
            ],
            Self::FilesystemError { path, .. } => vec![
                format!("Failed to access: {}", path.display()),
                "Check that you have write permissions".into(),
                "Ensure the parent directory exists".into(),
            ],
            Self::PresetNotFound { path } => vec![
                format!("Looked for: {}", path.display()),
                "Pass --preset with the path to your store preset file".into(),
            ],
            Self::ConfiguratorNotRegistered { kind } => vec![
                format!("'{kind}' is not wired into the configurator registry"),
                "This is likely a packaging error in the manifest".into(),
            ],
            Self::MissingOption { kind, option } => vec![format!(
                "Add '{option}' to the options of the '{kind}' configurator entry"
            )],
            _ => vec!["Check the error details above".into()],
        }
    }

    /// Get error category.
    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::StepFailed { .. } | Self::ProcessFailed { .. } => ErrorCategory::Internal,
            Self::FilesystemError { .. } => ErrorCategory::Internal,
            Self::PresetNotFound { .. } => ErrorCategory::NotFound,
            Self::PresetParse { .. } | Self::LockfileError { .. } => ErrorCategory::Configuration,
            Self::ConfiguratorNotRegistered { .. } => ErrorCategory::Configuration,
            Self::MissingOption { .. } => ErrorCategory::Validation,
            Self::ConfiguratorFailed { .. } => ErrorCategory::Internal,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn step_failure_suggests_rerunning_by_hand() {
        let err = ApplicationError::StepFailed {
            step: "bin/console assets:install -n".into(),
            status: 1,
            stderr: "boom".into(),
        };
        let suggestions = err.suggestions();
        assert!(suggestions.iter().any(|s| s.contains("assets:install")));
        assert!(suggestions.iter().any(|s| s.contains("boom")));
    }

    #[test]
    fn missing_option_is_validation() {
        let err = ApplicationError::MissingOption {
            kind: ConfiguratorKind::YamlNode,
            option: "file",
        };
        assert_eq!(err.category(), ErrorCategory::Validation);
        assert!(err.to_string().contains("yaml-node"));
    }
}
