use std::fmt;
use std::path::{Path, PathBuf};

use serde::Serialize;
use thiserror::Error;

use crate::consts::CONTAINER_MOUNT_BASE;

/// Whether the container may write through a binding.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum AccessMode {
  ReadOnly,
  ReadWrite,
}

impl AccessMode {
  pub fn is_read_only(self) -> bool {
    matches!(self, AccessMode::ReadOnly)
  }
}

impl fmt::Display for AccessMode {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    match self {
      AccessMode::ReadOnly => write!(f, "ro"),
      AccessMode::ReadWrite => write!(f, "rw"),
    }
  }
}

/// A host directory made visible inside the container.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MountBinding {
  /// Path relative to the container mount base, `/`-separated.
  pub container_path: String,
  pub host_path: PathBuf,
  pub mode: AccessMode,
}

impl MountBinding {
  pub fn new(container_path: impl Into<String>, host_path: impl Into<PathBuf>, mode: AccessMode) -> Self {
    Self {
      container_path: container_path.into(),
      host_path: host_path.into(),
      mode,
    }
  }

  /// Absolute target inside the container, e.g. `/opt/pluginA/WebApp/static`.
  pub fn target(&self) -> String {
    format!("{}/{}", CONTAINER_MOUNT_BASE, self.container_path)
  }
}

impl fmt::Display for MountBinding {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    write!(f, "{} -> {} ({})", self.target(), self.host_path.display(), self.mode)
  }
}

/// Ordered bindings for one build invocation.
///
/// The last binding is always the package's own source tree, mounted
/// read-write. Container paths are unique within a plan.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MountPlan {
  pub(crate) package: String,
  pub(crate) bindings: Vec<MountBinding>,
}

impl MountPlan {
  /// Name of the package being built.
  pub fn package(&self) -> &str {
    &self.package
  }

  pub fn bindings(&self) -> &[MountBinding] {
    &self.bindings
  }

  /// Whether `binding` is the package's own source tree.
  pub fn is_package_binding(&self, binding: &MountBinding) -> bool {
    binding.container_path == self.package
  }

  /// The package's own read-write binding.
  pub fn package_binding(&self) -> Option<&MountBinding> {
    self.bindings.iter().find(|binding| self.is_package_binding(binding))
  }

  /// Bindings contributed by plugins, in plan order.
  pub fn plugin_bindings(&self) -> impl Iterator<Item = &MountBinding> {
    self.bindings.iter().filter(|binding| !self.is_package_binding(binding))
  }
}

#[derive(Debug, Error)]
pub enum PlanError {
  /// Two bindings claim the same container path.
  #[error(
    "mount conflict at {container_path}: {} and {} both claim it",
    .existing.display(),
    .conflicting.display()
  )]
  Conflict {
    container_path: String,
    existing: PathBuf,
    conflicting: PathBuf,
  },

  /// A module or package name cannot be used as a container path.
  #[error("invalid container path {path:?}")]
  InvalidContainerPath { path: String },
}

impl PlanError {
  pub(crate) fn conflict(container_path: &str, existing: &Path, conflicting: &Path) -> Self {
    PlanError::Conflict {
      container_path: container_path.to_string(),
      existing: existing.to_path_buf(),
      conflicting: conflicting.to_path_buf(),
    }
  }
}
