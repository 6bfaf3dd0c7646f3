//! Step pipeline: run a manifest's shell steps in order.

use std::path::Path;
use tracing::{debug, info, instrument};

use crate::{
    application::{error::ApplicationError, ports::ProcessRunner},
    error::StoreforgeResult,
};

/// Record of one completed step.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StepOutcome {
    pub step: String,
    pub status: i32,
}

/// Runs manifest steps sequentially, stopping at the first failure.
///
/// There is no rollback: steps are external commands whose effects the
/// pipeline cannot undo. The failure names the exact step so the operator
/// can resume by hand.
pub struct StepPipeline {
    runner: Box<dyn ProcessRunner>,
}

impl StepPipeline {
    pub fn new(runner: Box<dyn ProcessRunner>) -> Self {
        Self { runner }
    }

    /// Run `steps` from `project_root`, in order.
    ///
    /// Returns the outcome of every step that ran. The first non-zero exit
    /// short-circuits with [`ApplicationError::StepFailed`] naming the step.
    #[instrument(skip_all, fields(steps = steps.len(), root = %project_root.display()))]
    pub fn run(&self, project_root: &Path, steps: &[String]) -> StoreforgeResult<Vec<StepOutcome>> {
        let mut outcomes = Vec::with_capacity(steps.len());

        for step in steps {
            debug!(step = %step, "Running step");
            let output = self.runner.run_shell(step, project_root)?;

            if !output.success() {
                return Err(ApplicationError::StepFailed {
                    step: step.clone(),
                    status: output.status,
                    stderr: tail(&output.stderr),
                }
                .into());
            }

            outcomes.push(StepOutcome {
                step: step.clone(),
                status: output.status,
            });
        }

        info!(completed = outcomes.len(), "All steps completed");
        Ok(outcomes)
    }

    /// Run a single ad-hoc command through the same runner.
    pub fn run_one(&self, project_root: &Path, command: &str) -> StoreforgeResult<StepOutcome> {
        let outcomes = self.run(project_root, std::slice::from_ref(&command.to_string()))?;
        Ok(outcomes.into_iter().next().unwrap_or(StepOutcome {
            step: command.to_string(),
            status: 0,
        }))
    }

}

/// Last few lines of stderr, enough to point at the cause without dumping
/// a full build log into an error message.
fn tail(stderr: &str) -> String {
    const KEEP: usize = 5;
    let lines: Vec<&str> = stderr.lines().collect();
    let start = lines.len().saturating_sub(KEEP);
    lines[start..].join("\n")
}

// ── tests ─────────────────────────────────────────────────────────────────────
