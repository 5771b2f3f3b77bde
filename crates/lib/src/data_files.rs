//! Data-file listing for packaging.
//!
//! Mirrors a directory of generated or static files into installation
//! directories: every file under `source_dir` is listed under the destination
//! directory that corresponds to its parent.

use std::collections::BTreeMap;
use std::path::Path;

use serde::Serialize;

/// Files to install, grouped by destination directory.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct DataFiles(BTreeMap<String, Vec<String>>);

impl DataFiles {
  pub fn new() -> Self {
    Self::default()
  }

  pub fn add(&mut self, dest_dir: impl Into<String>, file: impl Into<String>) {
    self.0.entry(dest_dir.into()).or_default().push(file.into());
  }

  /// `(destination directory, files)` pairs ordered by destination.
  pub fn entries(&self) -> impl Iterator<Item = (&str, &[String])> {
    self.0.iter().map(|(dir, files)| (dir.as_str(), files.as_slice()))
  }

  pub fn len(&self) -> usize {
    self.0.len()
  }

  pub fn is_empty(&self) -> bool {
    self.0.is_empty()
  }
}

/// Walk `source_dir` and add each file to `start` under
/// `dest_dir/<relative parent>`.
pub fn find_data_files(source_dir: &Path, dest_dir: &Path, start: DataFiles) -> Result<DataFiles, walkdir::Error> {
  let mut data_files = start;

  for entry in walkdir::WalkDir::new(source_dir).sort_by_file_name() {
    let entry = entry?;
    if !entry.file_type().is_file() {
      continue;
    }
    let Ok(relative) = entry.path().strip_prefix(source_dir) else {
      continue;
    };
    let destination = dest_dir.join(relative);
    let parent = destination.parent().unwrap_or(dest_dir);
    data_files.add(parent.display().to_string(), entry.path().display().to_string());
  }

  Ok(data_files)
}
