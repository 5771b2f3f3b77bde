//! Detection of the package being built.

use std::fs;
use std::path::{Path, PathBuf};

use thiserror::Error;

#[derive(Debug, Error)]
pub enum PackageError {
  #[error("failed to read source directory {}: {source}", path.display())]
  ReadDir { path: PathBuf, source: std::io::Error },

  #[error("expected exactly one top-level package in {}, found: {found:?}", path.display())]
  Ambiguous { path: PathBuf, found: Vec<String> },
}

/// Name of the single top-level package under `<source_root>/src`.
///
/// Hidden and private directories, caches and packaging metadata
/// (`*.egg-info`, `*.dist-info`) are not packages.
pub fn detect_package_name(source_root: &Path) -> Result<String, PackageError> {
  let src = source_root.join("src");
  let entries = fs::read_dir(&src).map_err(|source| PackageError::ReadDir {
    path: src.clone(),
    source,
  })?;

  let mut found = Vec::new();
  for entry in entries {
    let entry = entry.map_err(|source| PackageError::ReadDir {
      path: src.clone(),
      source,
    })?;
    if !entry.path().is_dir() {
      continue;
    }
    let Some(name) = entry.file_name().to_str().map(str::to_string) else {
      continue;
    };
    if is_package_name(&name) {
      found.push(name);
    }
  }
  found.sort();

  if found.len() != 1 {
    return Err(PackageError::Ambiguous { path: src, found });
  }
  Ok(found.remove(0))
}

fn is_package_name(name: &str) -> bool {
  !name.starts_with(['.', '_']) && !name.contains('.')
}
