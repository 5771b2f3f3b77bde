//! Extension-point registries.
//!
//! Discovery never reaches for process-wide state: it is handed an
//! [`EntryPointRegistry`] and only consumes entry names, owning modules,
//! install locations and each entry's metadata factory.

use std::collections::BTreeMap;
use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};

use serde::Deserialize;
use tracing::debug;

use super::types::{MetadataError, PluginMetadata, RegistryError};
use crate::consts::PLUGIN_MANIFEST;

type MetadataFactory = Box<dyn Fn() -> Result<PluginMetadata, MetadataError> + Send + Sync>;

/// A single entry advertised under an extension point.
pub struct EntryPoint {
  pub name: String,
  pub module: String,
  pub location: PathBuf,
  factory: MetadataFactory,
}

impl EntryPoint {
  pub fn new<F>(name: impl Into<String>, module: impl Into<String>, location: impl Into<PathBuf>, factory: F) -> Self
  where
    F: Fn() -> Result<PluginMetadata, MetadataError> + Send + Sync + 'static,
  {
    Self {
      name: name.into(),
      module: module.into(),
      location: location.into(),
      factory: Box::new(factory),
    }
  }

  /// Invoke the entry's metadata factory.
  pub fn load(&self) -> Result<PluginMetadata, MetadataError> {
    (self.factory)()
  }
}

impl fmt::Debug for EntryPoint {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.debug_struct("EntryPoint")
      .field("name", &self.name)
      .field("module", &self.module)
      .field("location", &self.location)
      .finish_non_exhaustive()
  }
}

/// Source of entry points, queried by extension-point name.
pub trait EntryPointRegistry {
  /// Entries registered under `group`, in registry order.
  fn entry_points(&self, group: &str) -> Result<Vec<EntryPoint>, RegistryError>;
}

/// On-disk `plugin.json` manifest.
#[derive(Debug, Deserialize)]
struct PluginManifest {
  name: String,
  #[serde(default)]
  module: Option<String>,
  /// Extension point -> metadata file, relative to the plugin root.
  #[serde(default)]
  entry_points: BTreeMap<String, PathBuf>,
}

/// Registry backed by directories of installed plugins.
///
/// Every sub-directory of a search directory that holds a `plugin.json`
/// manifest is an installed plugin rooted at that sub-directory. Search
/// directories are visited in order and plugins within one directory by
/// name, so the resulting order is stable across runs.
#[derive(Debug, Clone, Default)]
pub struct DirectoryRegistry {
  search_path: Vec<PathBuf>,
}

impl DirectoryRegistry {
  pub fn new(search_path: Vec<PathBuf>) -> Self {
    Self { search_path }
  }

  /// Registry over the configured plugin search path.
  pub fn from_env() -> Self {
    Self::new(crate::platform::paths::plugin_search_path())
  }

  pub fn search_path(&self) -> &[PathBuf] {
    &self.search_path
  }

  fn plugin_roots(dir: &Path) -> Result<Vec<PathBuf>, RegistryError> {
    let entries = fs::read_dir(dir).map_err(|source| RegistryError::ReadDir {
      path: dir.to_path_buf(),
      source,
    })?;

    let mut roots = Vec::new();
    for entry in entries {
      let entry = entry.map_err(|source| RegistryError::ReadDir {
        path: dir.to_path_buf(),
        source,
      })?;
      let path = entry.path();
      if path.join(PLUGIN_MANIFEST).is_file() {
        roots.push(path);
      }
    }
    roots.sort();
    Ok(roots)
  }

  fn read_manifest(root: &Path) -> Result<PluginManifest, RegistryError> {
    let path = root.join(PLUGIN_MANIFEST);
    let content = fs::read_to_string(&path).map_err(|source| RegistryError::ReadManifest {
      path: path.clone(),
      source,
    })?;
    serde_json::from_str(&content).map_err(|source| RegistryError::ParseManifest { path, source })
  }
}

impl EntryPointRegistry for DirectoryRegistry {
  fn entry_points(&self, group: &str) -> Result<Vec<EntryPoint>, RegistryError> {
    let mut entries = Vec::new();

    for dir in &self.search_path {
      if !dir.is_dir() {
        debug!(dir = %dir.display(), "plugin directory does not exist, skipping");
        continue;
      }

      for root in Self::plugin_roots(dir)? {
        let manifest = Self::read_manifest(&root)?;
        let Some(metadata_file) = manifest.entry_points.get(group) else {
          debug!(plugin = %manifest.name, group, "plugin does not register this extension point");
          continue;
        };

        let root = dunce::canonicalize(&root).unwrap_or(root);
        let metadata_path = root.join(metadata_file);
        let module = manifest.module.unwrap_or_else(|| manifest.name.clone());
        let base = root.clone();

        debug!(plugin = %manifest.name, module = %module, root = %root.display(), "found entry point");
        entries.push(EntryPoint::new(manifest.name, module, root, move || {
          load_metadata_file(&metadata_path, &base)
        }));
      }
    }

    Ok(entries)
  }
}

/// Read a metadata file, resolving relative static directories against the
/// plugin root.
fn load_metadata_file(path: &Path, base: &Path) -> Result<PluginMetadata, MetadataError> {
  let content = fs::read_to_string(path).map_err(|source| MetadataError::Read {
    path: path.to_path_buf(),
    source,
  })?;
  let mut metadata: PluginMetadata = serde_json::from_str(&content).map_err(|source| MetadataError::Parse {
    path: path.to_path_buf(),
    source,
  })?;

  if let Some(resources) = metadata.web_resources.as_mut() {
    for dir in &mut resources.static_dirs {
      if dir.is_relative() {
        *dir = base.join(&*dir);
      }
    }
  }

  Ok(metadata)
}
