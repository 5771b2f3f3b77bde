//! Implementation of the `diracweb plan` command.
//!
//! Resolves plugins, mounts and the backend, then prints the container
//! command without running it. An overlay backend's staging root is removed
//! on exit and shown as `<staging>` unless `--keep-staging` is given.

use anyhow::{Context, Result};

use diracweb_lib::compile::prepare;
use diracweb_lib::container::shell_line;

use super::BuildArgs;
use crate::output::{OutputFormat, print_info, print_json, print_mapping, print_stat};

/// Stands in for a staging root that is removed when the command exits.
const STAGING_PLACEHOLDER: &str = "<staging>";

pub fn cmd_plan(args: &BuildArgs, keep_staging: bool, format: OutputFormat) -> Result<()> {
  let options = args.options()?;
  let registry = args.registry();
  let mut prepared = prepare(&options, &registry).context("Failed to prepare the build step")?;

  let kept = if keep_staging {
    prepared.command.keep_staging()
  } else {
    None
  };
  let argv = prepared.command.argv_masking_staging(STAGING_PLACEHOLDER);

  if format.is_json() {
    let json = serde_json::json!({
      "package": prepared.plan.package(),
      "backend": prepared.backend,
      "bindings": prepared.plan.bindings(),
      "command": argv,
      "staging": kept,
    });
    return print_json(&json);
  }

  print_info(&format!("Build plan for {}", prepared.plan.package()));
  print_stat("Backend", &prepared.backend.to_string());
  print_stat("Plugins", &prepared.contributions.len().to_string());
  println!();
  println!("Mounts:");
  for binding in prepared.plan.bindings() {
    print_mapping(
      &binding.host_path.display().to_string(),
      &binding.target(),
      &format!("({})", binding.mode),
    );
  }
  println!();
  println!("Command:");
  println!("  {}", shell_line(&argv));
  if let Some(kept) = kept {
    println!();
    print_stat("Staging root kept at", &kept.display().to_string());
  }

  Ok(())
}
