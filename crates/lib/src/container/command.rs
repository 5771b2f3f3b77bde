use std::fmt;
use std::path::{Path, PathBuf};
use std::process::Command;

use tempfile::TempDir;

/// A fully synthesized container invocation.
///
/// Owns any staging directory the backend needs; it is removed when the
/// command is dropped, so the step runner consuming the command releases it on
/// every exit path.
#[derive(Debug)]
pub struct ContainerCommand {
  program: PathBuf,
  args: Vec<String>,
  staging: Option<TempDir>,
}

impl ContainerCommand {
  pub fn new(program: impl Into<PathBuf>) -> Self {
    Self {
      program: program.into(),
      args: Vec::new(),
      staging: None,
    }
  }

  pub(crate) fn with_staging(mut self, staging: TempDir) -> Self {
    self.staging = Some(staging);
    self
  }

  pub fn arg(mut self, arg: impl Into<String>) -> Self {
    self.args.push(arg.into());
    self
  }

  pub fn args<I, S>(mut self, args: I) -> Self
  where
    I: IntoIterator<Item = S>,
    S: Into<String>,
  {
    self.args.extend(args.into_iter().map(Into::into));
    self
  }

  pub fn program(&self) -> &Path {
    &self.program
  }

  pub fn get_args(&self) -> &[String] {
    &self.args
  }

  /// Staging root mounted as the container's mount base, if the backend needs one.
  pub fn staging_dir(&self) -> Option<&Path> {
    self.staging.as_ref().map(TempDir::path)
  }

  /// Detach the staging root so it outlives the command, returning its path.
  ///
  /// Used when a previewed command is meant to be run by hand.
  pub fn keep_staging(&mut self) -> Option<PathBuf> {
    self.staging.take().map(TempDir::keep)
  }

  /// Argument vector with the staging root path replaced by `placeholder`.
  pub fn argv_masking_staging(&self, placeholder: &str) -> Vec<String> {
    let argv = self.argv();
    match self.staging_dir() {
      Some(staging) => {
        let staging = staging.display().to_string();
        argv.into_iter().map(|arg| arg.replace(&staging, placeholder)).collect()
      }
      None => argv,
    }
  }

  /// Process builder with inherited standard streams.
  pub fn to_command(&self) -> Command {
    let mut command = Command::new(&self.program);
    command.args(&self.args);
    command
  }

  /// Full argument vector, program first.
  pub fn argv(&self) -> Vec<String> {
    std::iter::once(self.program.display().to_string())
      .chain(self.args.iter().cloned())
      .collect()
  }
}

impl fmt::Display for ContainerCommand {
  /// Shell-quoted command line, suitable for logging and copy-paste.
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    write!(f, "{}", shell_line(&self.argv()))
  }
}

/// Join `argv` into one shell-quoted line.
pub fn shell_line(argv: &[String]) -> String {
  argv.iter().map(|arg| shell_quote(arg)).collect::<Vec<_>>().join(" ")
}

fn shell_quote(arg: &str) -> String {
  let safe = !arg.is_empty()
    && arg
      .chars()
      .all(|c| c.is_ascii_alphanumeric() || "@%+=:,./-_".contains(c));
  if safe {
    arg.to_string()
  } else {
    format!("'{}'", arg.replace('\'', r#"'"'"'"#))
  }
}
