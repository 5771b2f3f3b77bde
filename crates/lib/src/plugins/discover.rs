//! Discovery of plugins that contribute static web resources.

use std::fs;
use std::vec;

use tracing::info;

use super::registry::{EntryPoint, EntryPointRegistry};
use super::types::{DiscoverError, PluginContribution};
use crate::consts::STATIC_SUBDIR;

/// Discover the plugins registered under `group` that contribute static
/// resources to `package`.
///
/// The registry is queried eagerly; each entry's metadata is loaded lazily as
/// the returned iterator advances, in registry order. The entry whose module is
/// `package` itself is skipped.
pub fn discover<R: EntryPointRegistry + ?Sized>(
  registry: &R,
  group: &str,
  package: &str,
) -> Result<Discovery, DiscoverError> {
  let entries = registry.entry_points(group)?;
  Ok(Discovery {
    entries: entries.into_iter(),
    package: package.to_string(),
  })
}

/// Lazy sequence of [`PluginContribution`]s.
///
/// For every contribution yielded, `<location>/WebApp/static` has been created
/// so it can serve as a mount point inside the plugin's own tree.
#[derive(Debug)]
pub struct Discovery {
  entries: vec::IntoIter<EntryPoint>,
  package: String,
}

impl Discovery {
  fn contribution(entry: EntryPoint) -> Result<Option<PluginContribution>, DiscoverError> {
    let metadata = entry.load().map_err(|source| DiscoverError::Metadata {
      plugin: entry.name.clone(),
      source,
    })?;

    let static_dir = match metadata.static_dirs() {
      [] => return Ok(None),
      [dir] => dir.clone(),
      dirs => {
        return Err(DiscoverError::AmbiguousStaticDirs {
          plugin: entry.name,
          dirs: dirs.to_vec(),
        });
      }
    };

    info!(module = %entry.module, location = %entry.location.display(), "found WebApp module");

    let mount_point = entry.location.join(STATIC_SUBDIR);
    fs::create_dir_all(&mount_point).map_err(|source| DiscoverError::CreateDir {
      path: mount_point,
      source,
    })?;

    info!(module = %entry.module, static_dir = %static_dir.display(), "mounting static directory");

    Ok(Some(PluginContribution {
      name: entry.name,
      module: entry.module,
      location: entry.location,
      static_dir,
    }))
  }
}

impl Iterator for Discovery {
  type Item = Result<PluginContribution, DiscoverError>;

  fn next(&mut self) -> Option<Self::Item> {
    for entry in self.entries.by_ref() {
      if entry.module == self.package {
        continue;
      }
      match Self::contribution(entry) {
        Ok(Some(contribution)) => return Some(Ok(contribution)),
        Ok(None) => continue,
        Err(err) => return Some(Err(err)),
      }
    }
    None
  }
}
