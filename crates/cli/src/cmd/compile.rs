//! Implementation of the `diracweb compile` command.
//!
//! This is the build step run before a development install or a source
//! distribution: it compiles the package's web application inside a container.

use std::time::{Duration, Instant};

use anyhow::{Context, Result};
use tracing::debug;

use diracweb_lib::compile::compile;
use diracweb_lib::consts::SKIP_ENV_VAR;
use diracweb_lib::runner::{StepOutcome, skip_requested};

use super::BuildArgs;
use crate::output::{print_success, print_warning};

pub fn cmd_compile(args: &BuildArgs) -> Result<()> {
  // Checked before resolving anything so a skipped build never touches the disk.
  if skip_requested(SKIP_ENV_VAR) {
    print_warning(&format!("Skipping webapp compilation as {} is set", SKIP_ENV_VAR));
    return Ok(());
  }

  let options = args.options()?;
  let registry = args.registry();
  debug!(package = %options.package, source_root = %options.source_root.display(), "resolved build options");
  let started = Instant::now();

  match compile(&options, &registry).context("Webapp compilation failed")? {
    StepOutcome::Skipped => {
      print_warning(&format!("Skipping webapp compilation as {} is set", SKIP_ENV_VAR));
    }
    StepOutcome::Completed => {
      let elapsed = Duration::from_millis(started.elapsed().as_millis() as u64);
      print_success(&format!(
        "Compiled {} in {}",
        options.package,
        humantime::format_duration(elapsed)
      ));
    }
  }

  Ok(())
}
