//! Data directory and plugin search path resolution.

use std::ffi::OsString;
use std::path::PathBuf;

use crate::consts::{APP_NAME, PLUGIN_PATH_ENV_VAR};

/// Returns the user's home directory
#[cfg(windows)]
pub fn home_dir() -> Option<PathBuf> {
  std::env::var_os("USERPROFILE").map(PathBuf::from)
}

/// Returns the user's home directory
#[cfg(not(windows))]
pub fn home_dir() -> Option<PathBuf> {
  std::env::var_os("HOME").map(PathBuf::from)
}

/// Returns the directory for data files for the application
#[cfg(windows)]
pub fn data_dir() -> Option<PathBuf> {
  std::env::var_os("APPDATA").map(|appdata| PathBuf::from(appdata).join(APP_NAME))
}

/// Returns the directory for data files for the application
#[cfg(not(windows))]
pub fn data_dir() -> Option<PathBuf> {
  let data_home = std::env::var_os("XDG_DATA_HOME")
    .map(PathBuf::from)
    .or_else(|| home_dir().map(|home| home.join(".local").join("share")))?;
  Some(data_home.join(APP_NAME))
}

/// Directories scanned for installed plugins.
///
/// `DIRACWEB_PLUGIN_PATH` wins when set (even if empty); otherwise the
/// `plugins` directory under the data dir is used.
pub fn plugin_search_path() -> Vec<PathBuf> {
  match std::env::var_os(PLUGIN_PATH_ENV_VAR) {
    Some(value) => split_search_path(&value),
    None => data_dir().map(|dir| vec![dir.join("plugins")]).unwrap_or_default(),
  }
}

fn split_search_path(value: &OsString) -> Vec<PathBuf> {
  std::env::split_paths(value)
    .filter(|path| !path.as_os_str().is_empty())
    .collect()
}
