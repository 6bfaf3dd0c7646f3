//! Shell process adapter implementing the `ProcessRunner` port.

use std::path::Path;
use std::process::Command;

use tracing::debug;

use storeforge_core::{
    application::{
        ports::{ProcessOutput, ProcessRunner},
        ApplicationError,
    },
    error::StoreforgeResult,
};

/// Runs manifest steps through the platform shell.
///
/// Steps are whole command lines (`bin/console assets:install -n`), so they
/// go through `sh -c` rather than being tokenized here. Manifests are
/// trusted input shipped with the tool; this is not an injection surface
/// for untrusted data.
#[derive(Debug, Clone, Copy, Default)]
pub struct ShellRunner;

impl ShellRunner {
    pub fn new() -> Self {
        Self
    }
}

impl ProcessRunner for ShellRunner {
    fn run_shell(&self, command: &str, cwd: &Path) -> StoreforgeResult<ProcessOutput> {
        debug!(command = %command, cwd = %cwd.display(), "Spawning shell command");

        #[cfg(unix)]
        let output = Command::new("sh").arg("-c").arg(command).current_dir(cwd).output();
        #[cfg(windows)]
        let output = Command::new("cmd").arg("/C").arg(command).current_dir(cwd).output();

        let output = output.map_err(|e| ApplicationError::ProcessFailed {
            command: command.to_string(),
            reason: e.to_string(),
        })?;

        Ok(ProcessOutput {
            // Killed-by-signal has no code; report it as a plain failure.
            status: output.status.code().unwrap_or(-1),
            stdout: String::from_utf8_lossy(&output.stdout).into_owned(),
            stderr: String::from_utf8_lossy(&output.stderr).into_owned(),
        })
    }
}

// ── tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
#[cfg(unix)]
mod tests {
    use super::*;

    #[test]
    fn captures_stdout_and_zero_status() {
        let out = ShellRunner::new()
            .run_shell("echo hello", Path::new("/tmp"))
            .unwrap();
        assert_eq!(out.status, 0);
        assert!(out.success());
        assert_eq!(out.stdout.trim(), "hello");
    }

    #[test]
    fn nonzero_exit_is_reported_not_an_error() {
        let out = ShellRunner::new()
            .run_shell("exit 3", Path::new("/tmp"))
            .unwrap();
        assert_eq!(out.status, 3);
        assert!(!out.success());
    }

    #[test]
    fn runs_in_the_given_working_directory() {
        let dir = tempfile::tempdir().unwrap();
        let out = ShellRunner::new().run_shell("pwd", dir.path()).unwrap();
        // Canonicalize both sides; the tempdir may sit behind a symlink.
        let reported = std::fs::canonicalize(out.stdout.trim()).unwrap();
        let expected = std::fs::canonicalize(dir.path()).unwrap();
        assert_eq!(reported, expected);
    }

    #[test]
    fn stderr_is_captured() {
        let out = ShellRunner::new()
            .run_shell("echo oops >&2", Path::new("/tmp"))
            .unwrap();
        assert_eq!(out.stderr.trim(), "oops");
    }
}
