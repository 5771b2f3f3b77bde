//! Implementation of the `diracweb data-files` command.

use std::path::Path;

use anyhow::{Context, Result};

use diracweb_lib::data_files::{DataFiles, find_data_files};

use crate::output::{OutputFormat, print_json, print_mapping};

/// Print the files under `source` grouped by their install directory under `dest`.
pub fn cmd_data_files(source: &Path, dest: &Path, format: OutputFormat) -> Result<()> {
  let files = find_data_files(source, dest, DataFiles::new())
    .with_context(|| format!("Failed to list data files in {}", source.display()))?;

  if format.is_json() {
    return print_json(&files);
  }

  for (dir, listed) in files.entries() {
    for file in listed {
      print_mapping(file, dir, "");
    }
  }
  Ok(())
}
