//! Container backend selection.
//!
//! Two runtimes are supported, tried in a fixed preference order. They differ
//! in how bind targets come into existence, which is all [`BackendKind`]
//! captures; the command synthesizer dispatches on it.

use std::ffi::OsStr;
use std::fmt;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use serde::Serialize;
use thiserror::Error;
use tracing::{debug, info};

/// How a runtime materialises bind mounts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum BackendKind {
  /// Bind targets are created on demand in the container's own root (docker).
  DirectMount,
  /// Bind targets must pre-exist in a writable synthetic root (singularity).
  OverlayRoot,
}

/// A candidate executable and the mount style it speaks.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Candidate {
  pub executable: &'static str,
  pub kind: BackendKind,
}

pub const DOCKER: Candidate = Candidate {
  executable: "docker",
  kind: BackendKind::DirectMount,
};

pub const SINGULARITY: Candidate = Candidate {
  executable: "singularity",
  kind: BackendKind::OverlayRoot,
};

/// Default preference order.
pub const DEFAULT_CANDIDATES: &[Candidate] = &[DOCKER, SINGULARITY];

impl FromStr for Candidate {
  type Err = BackendError;

  fn from_str(s: &str) -> Result<Self, Self::Err> {
    DEFAULT_CANDIDATES
      .iter()
      .find(|candidate| candidate.executable == s)
      .copied()
      .ok_or_else(|| BackendError::Unknown { name: s.to_string() })
  }
}

/// The runtime chosen for this invocation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Backend {
  pub kind: BackendKind,
  pub name: String,
  pub executable: PathBuf,
}

impl Backend {
  pub fn new(kind: BackendKind, name: impl Into<String>, executable: impl Into<PathBuf>) -> Self {
    Self {
      kind,
      name: name.into(),
      executable: executable.into(),
    }
  }
}

impl fmt::Display for Backend {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    write!(f, "{} ({})", self.name, self.executable.display())
  }
}

#[derive(Debug, Error)]
pub enum BackendError {
  /// None of the candidates resolved on the search path.
  #[error("no container backend available, tried: {}", .tried.join(", "))]
  NoBackendAvailable { tried: Vec<String> },

  #[error("unknown container backend {name:?}, expected one of: docker, singularity")]
  Unknown { name: String },
}

/// Pick the first candidate found on `PATH`.
pub fn select(candidates: &[Candidate]) -> Result<Backend, BackendError> {
  select_with(candidates, |name| which::which(name).ok())
}

/// Pick the first candidate found in `paths`, an OS path list.
pub fn select_in<P: AsRef<OsStr>>(candidates: &[Candidate], paths: P, cwd: &Path) -> Result<Backend, BackendError> {
  select_with(candidates, |name| which::which_in(name, Some(paths.as_ref()), cwd).ok())
}

fn select_with<F>(candidates: &[Candidate], mut resolve: F) -> Result<Backend, BackendError>
where
  F: FnMut(&str) -> Option<PathBuf>,
{
  for candidate in candidates {
    match resolve(candidate.executable) {
      Some(executable) => {
        info!(backend = candidate.executable, path = %executable.display(), "selected container backend");
        return Ok(Backend::new(candidate.kind, candidate.executable, executable));
      }
      None => debug!(backend = candidate.executable, "not found"),
    }
  }

  Err(BackendError::NoBackendAvailable {
    tried: candidates.iter().map(|c| c.executable.to_string()).collect(),
  })
}
