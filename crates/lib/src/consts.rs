//! Fixed names shared between the library and the CLI.

pub const APP_NAME: &str = "diracweb";

/// Extension point under which installed plugins advertise their metadata.
pub const EXTENSION_POINT: &str = "dirac";

/// Presence of this variable skips the compile step entirely.
pub const SKIP_ENV_VAR: &str = "DIRAC_WEBAPP_NO_COMPILE";

/// OS path list of directories scanned for installed plugins.
pub const PLUGIN_PATH_ENV_VAR: &str = "DIRACWEB_PLUGIN_PATH";

/// Manifest file marking a directory as an installed plugin.
pub const PLUGIN_MANIFEST: &str = "plugin.json";

pub const DEFAULT_IMAGE: &str = "diracgrid/dirac-distribution:latest";

/// Where every binding is rooted inside the container.
pub const CONTAINER_MOUNT_BASE: &str = "/opt";

pub const CONTAINER_WORKDIR: &str = "/tmp";

/// Compiler script baked into the image.
pub const COMPILER_ENTRYPOINT: &str = "/dirac-webapp-compile.py";

/// Sub-directory of a plugin that receives its static resources.
pub const STATIC_SUBDIR: &str = "WebApp/static";
