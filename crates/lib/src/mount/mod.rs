//! Mount plan construction.
//!
//! Turns discovered plugin contributions plus the package's own source tree
//! into the logical set of bindings every container backend must reproduce.

mod types;

use std::collections::HashMap;
use std::path::Path;

pub use types::{AccessMode, MountBinding, MountPlan, PlanError};

use crate::consts::STATIC_SUBDIR;
use crate::plugins::PluginContribution;

impl MountPlan {
  /// Build the plan for `package`, whose sources live in
  /// `<source_root>/src/<package>`.
  ///
  /// Each contribution yields two read-only bindings: the plugin's installed
  /// root at `<module>` and its static directory at `<module>/WebApp/static`.
  /// The package itself is appended last, read-write.
  pub fn build<I>(contributions: I, package: &str, source_root: &Path) -> Result<Self, PlanError>
  where
    I: IntoIterator<Item = PluginContribution>,
  {
    let mut builder = PlanBuilder::default();

    for contribution in contributions {
      validate_segment(&contribution.module)?;
      builder.push(MountBinding::new(
        contribution.module.clone(),
        contribution.location,
        AccessMode::ReadOnly,
      ))?;
      builder.push(MountBinding::new(
        format!("{}/{}", contribution.module, STATIC_SUBDIR),
        contribution.static_dir,
        AccessMode::ReadOnly,
      ))?;
    }

    validate_segment(package)?;
    builder.push(MountBinding::new(
      package,
      source_root.join("src").join(package),
      AccessMode::ReadWrite,
    ))?;

    Ok(MountPlan {
      package: package.to_string(),
      bindings: builder.bindings,
    })
  }
}

#[derive(Default)]
struct PlanBuilder {
  bindings: Vec<MountBinding>,
  seen: HashMap<String, usize>,
}

impl PlanBuilder {
  fn push(&mut self, binding: MountBinding) -> Result<(), PlanError> {
    if let Some(&index) = self.seen.get(&binding.container_path) {
      let existing = &self.bindings[index];
      return Err(PlanError::conflict(
        &binding.container_path,
        &existing.host_path,
        &binding.host_path,
      ));
    }
    self.seen.insert(binding.container_path.clone(), self.bindings.len());
    self.bindings.push(binding);
    Ok(())
  }
}

/// Module and package names become single path components under the mount
/// base.
fn validate_segment(name: &str) -> Result<(), PlanError> {
  let invalid = name.is_empty() || name == "." || name == ".." || name.contains(['/', '\\']);
  if invalid {
    return Err(PlanError::InvalidContainerPath { path: name.to_string() });
  }
  Ok(())
}
