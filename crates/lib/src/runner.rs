//! Execution of the synthesized build step.

use thiserror::Error;
use tracing::{info, warn};

use crate::container::ContainerCommand;

/// How the build step ended when it did not fail.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StepOutcome {
  Completed,
  /// The skip variable was set; nothing was executed.
  Skipped,
}

#[derive(Debug, Error)]
pub enum RunError {
  #[error("failed to start {program}: {source}")]
  Spawn { program: String, source: std::io::Error },

  /// The child exited unsuccessfully; `code` is `None` when it was killed by a signal.
  #[error("build step failed with exit code {}: {command}", describe_code(.code))]
  StepFailed { command: String, code: Option<i32> },
}

fn describe_code(code: &Option<i32>) -> String {
  match code {
    Some(code) => code.to_string(),
    None => "none (terminated by signal)".to_string(),
  }
}

/// Whether `skip_var` is present in the process environment.
pub fn skip_requested(skip_var: &str) -> bool {
  std::env::var_os(skip_var).is_some()
}

/// Run `command` to completion with inherited standard streams.
///
/// Returns [`StepOutcome::Skipped`] without spawning anything when `skip_var`
/// is set. The command, and with it any staging directory, is dropped before
/// this returns whatever the outcome.
pub fn run(command: ContainerCommand, skip_var: &str) -> Result<StepOutcome, RunError> {
  if skip_requested(skip_var) {
    warn!(var = skip_var, "skipping webapp compilation");
    return Ok(StepOutcome::Skipped);
  }

  info!("> {}", command);
  let status = command.to_command().status().map_err(|source| RunError::Spawn {
    program: command.program().display().to_string(),
    source,
  })?;

  if !status.success() {
    return Err(RunError::StepFailed {
      command: command.to_string(),
      code: status.code(),
    });
  }

  Ok(StepOutcome::Completed)
}
