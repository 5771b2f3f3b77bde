//! Command synthesis.
//!
//! Both backends must expose every binding of a [`MountPlan`] at the same
//! container path with the same access mode. They get there differently:
//!
//! - [`BackendKind::DirectMount`] passes each binding straight through; the
//!   runtime creates mount targets on demand.
//! - [`BackendKind::OverlayRoot`] cannot create bind targets at launch, so a
//!   staging directory is filled with empty placeholders, mounted as the
//!   container's mount base, and each real host path is bound over its
//!   placeholder inside a writable, contained root.

mod command;

use std::path::Path;

use thiserror::Error;
use tracing::debug;

pub use command::{ContainerCommand, shell_line};

use crate::backend::{Backend, BackendKind};
use crate::consts::{COMPILER_ENTRYPOINT, CONTAINER_MOUNT_BASE, CONTAINER_WORKDIR};
use crate::mount::{MountBinding, MountPlan};
use crate::platform::Identity;

/// Image scheme the overlay backend pulls registry images through.
const OVERLAY_IMAGE_SCHEME: &str = "docker://";

#[derive(Debug, Error)]
pub enum SynthesizeError {
  #[error("failed to create staging directory: {0}")]
  Staging(#[source] std::io::Error),

  #[error("failed to create mount placeholder {}: {source}", path.display())]
  Placeholder {
    path: std::path::PathBuf,
    source: std::io::Error,
  },
}

/// Synthesize the container invocation for `plan` on `backend`.
///
/// `identity`, when known, makes files the compiler writes owned by the
/// caller. The returned command ends with the compiler entrypoint; compiler
/// flags are appended by the caller.
pub fn synthesize(
  backend: &Backend,
  plan: &MountPlan,
  image: &str,
  identity: Option<Identity>,
) -> Result<ContainerCommand, SynthesizeError> {
  synthesize_in(backend, plan, image, identity, &std::env::temp_dir())
}

pub(crate) fn synthesize_in(
  backend: &Backend,
  plan: &MountPlan,
  image: &str,
  identity: Option<Identity>,
  staging_parent: &Path,
) -> Result<ContainerCommand, SynthesizeError> {
  let command = ContainerCommand::new(&backend.executable);
  match backend.kind {
    BackendKind::DirectMount => Ok(direct_mount(command, plan, image, identity)),
    BackendKind::OverlayRoot => overlay_root(command, plan, image, staging_parent),
  }
}

fn direct_mount(command: ContainerCommand, plan: &MountPlan, image: &str, identity: Option<Identity>) -> ContainerCommand {
  let mut command = command.args(["run", "--rm"]);
  for binding in plan.bindings() {
    command = command.arg(format!("-v={}", mount_spec(binding)));
  }
  command = command.arg(format!("-w={CONTAINER_WORKDIR}"));
  if let Some(identity) = identity {
    command = command.arg(format!("-u={identity}"));
  }
  command.arg(image).arg(COMPILER_ENTRYPOINT)
}

/// The overlay runtime already runs as the invoking user, so no identity flag
/// is passed.
fn overlay_root(
  command: ContainerCommand,
  plan: &MountPlan,
  image: &str,
  staging_parent: &Path,
) -> Result<ContainerCommand, SynthesizeError> {
  let staging = tempfile::Builder::new()
    .prefix("diracweb-root-")
    .tempdir_in(staging_parent)
    .map_err(SynthesizeError::Staging)?;

  for binding in plan.plugin_bindings() {
    create_placeholder(staging.path(), &binding.container_path)?;
  }
  create_placeholder(staging.path(), plan.package())?;

  let mut command = command
    .args(["run", "--writable", "--containall"])
    .arg(format!("--bind={}:{}", staging.path().display(), CONTAINER_MOUNT_BASE));
  for binding in plan.bindings() {
    command = command.arg(format!("--bind={}", mount_spec(binding)));
  }

  Ok(
    command
      .arg(format!("--pwd={CONTAINER_WORKDIR}"))
      .arg(overlay_image(image))
      .arg(COMPILER_ENTRYPOINT)
      .with_staging(staging),
  )
}

fn create_placeholder(staging: &Path, container_path: &str) -> Result<(), SynthesizeError> {
  let path = staging.join(container_path);
  debug!(path = %path.display(), "creating mount placeholder");
  std::fs::create_dir_all(&path).map_err(|source| SynthesizeError::Placeholder { path, source })
}

/// `host:target[:ro]`, understood by both runtimes.
fn mount_spec(binding: &MountBinding) -> String {
  let mut spec = format!("{}:{}", binding.host_path.display(), binding.target());
  if binding.mode.is_read_only() {
    spec.push_str(":ro");
  }
  spec
}

fn overlay_image(image: &str) -> String {
  if image.contains("://") {
    image.to_string()
  } else {
    format!("{OVERLAY_IMAGE_SCHEME}{image}")
  }
}
