//! Types for plugin discovery.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Metadata returned by a plugin's metadata factory.
///
/// Only the `web_resources` section is interpreted; every other key a plugin
/// declares is ignored.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PluginMetadata {
  #[serde(default)]
  pub web_resources: Option<WebResources>,
}

impl PluginMetadata {
  /// Declared static-resource directories, empty when the section is absent.
  pub fn static_dirs(&self) -> &[PathBuf] {
    self
      .web_resources
      .as_ref()
      .map(|resources| resources.static_dirs.as_slice())
      .unwrap_or_default()
  }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct WebResources {
  #[serde(default, rename = "static")]
  pub static_dirs: Vec<PathBuf>,
}

/// A plugin that contributes static web resources to the build.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PluginContribution {
  /// Entry name under the extension point.
  pub name: String,
  /// Module the entry belongs to; names its mount namespace.
  pub module: String,
  /// Installed root of the plugin on the host.
  pub location: PathBuf,
  /// The single static-resource directory the plugin declared.
  pub static_dir: PathBuf,
}

/// Errors raised while enumerating an extension point.
#[derive(Debug, Error)]
pub enum RegistryError {
  #[error("failed to read plugin directory {}: {source}", path.display())]
  ReadDir { path: PathBuf, source: std::io::Error },

  #[error("failed to read plugin manifest {}: {source}", path.display())]
  ReadManifest { path: PathBuf, source: std::io::Error },

  #[error("invalid plugin manifest {}: {source}", path.display())]
  ParseManifest { path: PathBuf, source: serde_json::Error },
}

/// Errors raised by a metadata factory.
#[derive(Debug, Error)]
pub enum MetadataError {
  #[error("failed to read metadata {}: {source}", path.display())]
  Read { path: PathBuf, source: std::io::Error },

  #[error("invalid metadata {}: {source}", path.display())]
  Parse { path: PathBuf, source: serde_json::Error },

  #[error("{0}")]
  Other(String),
}

/// Errors raised while discovering plugin contributions.
#[derive(Debug, Error)]
pub enum DiscoverError {
  #[error(transparent)]
  Registry(#[from] RegistryError),

  #[error("failed to load metadata of plugin {plugin}: {source}")]
  Metadata { plugin: String, source: MetadataError },

  /// A plugin may contribute at most one static directory.
  #[error("plugin {plugin} declares {} static directories, expected at most one: {dirs:?}", .dirs.len())]
  AmbiguousStaticDirs { plugin: String, dirs: Vec<PathBuf> },

  #[error("failed to create {}: {source}", path.display())]
  CreateDir { path: PathBuf, source: std::io::Error },
}
