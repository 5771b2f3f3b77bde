//! The compile pipeline.
//!
//! Chains plugin discovery, mount planning, backend selection, command
//! synthesis and the step runner into the single build step run by packaging
//! hooks:
//!
//! ```text
//! discover -> MountPlan::build -> select -> synthesize -> run
//! ```

use std::ffi::OsString;
use std::path::PathBuf;

use thiserror::Error;
use tracing::{info, warn};

use crate::backend::{self, Backend, BackendError, Candidate, DEFAULT_CANDIDATES};
use crate::consts::{CONTAINER_MOUNT_BASE, DEFAULT_IMAGE, EXTENSION_POINT, SKIP_ENV_VAR};
use crate::container::{self, ContainerCommand, SynthesizeError};
use crate::mount::{MountPlan, PlanError};
use crate::platform::Identity;
use crate::plugins::{self, DiscoverError, EntryPointRegistry, PluginContribution};
use crate::runner::{self, RunError, StepOutcome};

/// Errors from any stage of the pipeline.
#[derive(Debug, Error)]
pub enum CompileError {
  #[error(transparent)]
  Discover(#[from] DiscoverError),

  #[error(transparent)]
  Plan(#[from] PlanError),

  #[error(transparent)]
  Backend(#[from] BackendError),

  #[error(transparent)]
  Synthesize(#[from] SynthesizeError),

  #[error(transparent)]
  Run(#[from] RunError),
}

impl CompileError {
  /// Conflicting or ambiguous plugin declarations the operator must fix.
  pub fn is_configuration_error(&self) -> bool {
    matches!(self, CompileError::Discover(_) | CompileError::Plan(_))
  }

  /// Exit code of a failed build step, if that is what failed.
  pub fn exit_code(&self) -> Option<i32> {
    match self {
      CompileError::Run(RunError::StepFailed { code, .. }) => *code,
      _ => None,
    }
  }
}

/// Settings for one compile invocation.
#[derive(Debug, Clone)]
pub struct CompileOptions {
  /// Package being built; its sources are `<source_root>/src/<package>`.
  pub package: String,
  pub source_root: PathBuf,
  pub image: String,
  pub extension_point: String,
  /// Backends to try, in order.
  pub candidates: Vec<Candidate>,
  /// Where to look for backend executables; `PATH` when unset.
  pub search_path: Option<OsString>,
  pub skip_var: String,
  /// Identity mapped into the container; the current user when unset.
  pub identity: Option<Identity>,
}

impl CompileOptions {
  pub fn new(package: impl Into<String>, source_root: impl Into<PathBuf>) -> Self {
    Self {
      package: package.into(),
      source_root: source_root.into(),
      image: DEFAULT_IMAGE.to_string(),
      extension_point: EXTENSION_POINT.to_string(),
      candidates: DEFAULT_CANDIDATES.to_vec(),
      search_path: None,
      skip_var: SKIP_ENV_VAR.to_string(),
      identity: Identity::current(),
    }
  }

  pub fn image(mut self, image: impl Into<String>) -> Self {
    self.image = image.into();
    self
  }

  pub fn extension_point(mut self, group: impl Into<String>) -> Self {
    self.extension_point = group.into();
    self
  }

  pub fn candidates(mut self, candidates: Vec<Candidate>) -> Self {
    self.candidates = candidates;
    self
  }

  pub fn search_path(mut self, paths: impl Into<OsString>) -> Self {
    self.search_path = Some(paths.into());
    self
  }

  pub fn skip_var(mut self, var: impl Into<String>) -> Self {
    self.skip_var = var.into();
    self
  }

  pub fn identity(mut self, identity: Option<Identity>) -> Self {
    self.identity = identity;
    self
  }
}

/// Everything resolved before the step runs.
#[derive(Debug)]
pub struct Prepared {
  pub contributions: Vec<PluginContribution>,
  pub plan: MountPlan,
  pub backend: Backend,
  pub command: ContainerCommand,
}

/// Collect the contributions for `options.package`.
pub fn discover_contributions<R: EntryPointRegistry + ?Sized>(
  options: &CompileOptions,
  registry: &R,
) -> Result<Vec<PluginContribution>, DiscoverError> {
  plugins::discover(registry, &options.extension_point, &options.package)?.collect()
}

/// Pick the backend according to `options`.
pub fn select_backend(options: &CompileOptions) -> Result<Backend, BackendError> {
  match &options.search_path {
    Some(paths) => backend::select_in(&options.candidates, paths, &options.source_root),
    None => backend::select(&options.candidates),
  }
}

/// Run every stage up to, but excluding, execution.
///
/// The returned command already carries the compiler flags.
pub fn prepare<R: EntryPointRegistry + ?Sized>(options: &CompileOptions, registry: &R) -> Result<Prepared, CompileError> {
  let contributions = discover_contributions(options, registry)?;
  let plan = MountPlan::build(contributions.iter().cloned(), &options.package, &options.source_root)?;
  let backend = select_backend(options)?;

  let command =
    container::synthesize(&backend, &plan, &options.image, options.identity)?.args(compiler_args(&options.package));

  Ok(Prepared {
    contributions,
    plan,
    backend,
    command,
  })
}

/// Compile the web application of `options.package`.
///
/// Honors the skip variable before touching the filesystem or probing for a
/// backend.
pub fn compile<R: EntryPointRegistry + ?Sized>(options: &CompileOptions, registry: &R) -> Result<StepOutcome, CompileError> {
  if runner::skip_requested(&options.skip_var) {
    warn!(var = %options.skip_var, "skipping webapp compilation");
    return Ok(StepOutcome::Skipped);
  }

  let prepared = prepare(options, registry)?;
  info!(
    package = %options.package,
    plugins = prepared.contributions.len(),
    backend = %prepared.backend,
    "compiling webapp"
  );

  Ok(runner::run(prepared.command, &options.skip_var)?)
}

/// Flags understood by the compiler entrypoint; identical for every backend.
pub fn compiler_args(package: &str) -> Vec<String> {
  vec![
    format!("-D={CONTAINER_MOUNT_BASE}"),
    format!("-n={package}"),
    "--py3-style".to_string(),
  ]
}
