//! Implementation of the `diracweb info` command.

use anyhow::Result;

use diracweb_lib::backend::{DEFAULT_CANDIDATES, select};
use diracweb_lib::consts::SKIP_ENV_VAR;
use diracweb_lib::platform::Identity;
use diracweb_lib::runner::skip_requested;

use super::BuildArgs;
use crate::output::{OutputFormat, print_info, print_json, print_stat};

/// Show what a compile would run with: backend, identity and plugin search path.
pub fn cmd_info(args: &BuildArgs, format: OutputFormat) -> Result<()> {
  let registry = args.registry();
  let candidates = args.backend.map_or_else(|| DEFAULT_CANDIDATES.to_vec(), |candidate| vec![candidate]);
  let backend = select(&candidates).ok();
  let identity = Identity::current();
  let skipped = skip_requested(SKIP_ENV_VAR);

  if format.is_json() {
    return print_json(&serde_json::json!({
      "version": env!("CARGO_PKG_VERSION"),
      "backend": backend,
      "identity": identity.map(|id| id.to_string()),
      "plugin_path": registry.search_path(),
      "skip": skipped,
    }));
  }

  print_info(&format!("diracweb v{}", env!("CARGO_PKG_VERSION")));
  print_stat(
    "Backend",
    &backend.map_or_else(|| "none found".to_string(), |backend| backend.to_string()),
  );
  print_stat(
    "Identity",
    &identity.map_or_else(|| "unavailable".to_string(), |id| id.to_string()),
  );
  for dir in registry.search_path() {
    print_stat("Plugin path", &dir.display().to_string());
  }
  print_stat(SKIP_ENV_VAR, if skipped { "set" } else { "unset" });

  Ok(())
}
