//! Implementation of the `diracweb plugins` command.

use anyhow::{Context, Result};

use diracweb_lib::compile::discover_contributions;

use super::BuildArgs;
use crate::output::{OutputFormat, print_info, print_json, print_mapping};

/// List the installed plugins that contribute static resources to the package.
pub fn cmd_plugins(args: &BuildArgs, format: OutputFormat) -> Result<()> {
  let options = args.options()?;
  let registry = args.registry();
  let contributions = discover_contributions(&options, &registry).context("Plugin discovery failed")?;

  if format.is_json() {
    return print_json(&contributions);
  }

  if contributions.is_empty() {
    print_info(&format!(
      "No plugins contribute web resources to {} (searched {})",
      options.package,
      search_path_display(&registry)
    ));
    return Ok(());
  }

  print_info(&format!("{} plugin(s) contribute to {}", contributions.len(), options.package));
  for contribution in &contributions {
    print_mapping(
      &contribution.module,
      &contribution.static_dir.display().to_string(),
      &format!("({})", contribution.location.display()),
    );
  }

  Ok(())
}

fn search_path_display(registry: &diracweb_lib::plugins::DirectoryRegistry) -> String {
  if registry.search_path().is_empty() {
    return "nothing".to_string();
  }
  registry
    .search_path()
    .iter()
    .map(|p| p.display().to_string())
    .collect::<Vec<_>>()
    .join(", ")
}
