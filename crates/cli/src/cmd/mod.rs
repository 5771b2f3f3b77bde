mod compile;
mod data_files;
mod info;
mod plan;
mod plugins;

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Args;

use diracweb_lib::backend::Candidate;
use diracweb_lib::compile::CompileOptions;
use diracweb_lib::consts::{DEFAULT_IMAGE, EXTENSION_POINT};
use diracweb_lib::package::detect_package_name;
use diracweb_lib::plugins::DirectoryRegistry;

pub use compile::cmd_compile;
pub use data_files::cmd_data_files;
pub use info::cmd_info;
pub use plan::cmd_plan;
pub use plugins::cmd_plugins;

/// Options shared by every command that looks at a package and its plugins.
#[derive(Debug, Args)]
pub struct BuildArgs {
  /// Root of the package source tree (contains `src/`)
  #[arg(long, default_value = ".")]
  pub source_root: PathBuf,

  /// Package to build (default: the single package under `src/`)
  #[arg(short, long)]
  pub package: Option<String>,

  /// Directory holding installed plugins; repeat to search several
  #[arg(long = "plugin-path", value_name = "DIR")]
  pub plugin_path: Vec<PathBuf>,

  /// Extension point plugins register under
  #[arg(long, default_value = EXTENSION_POINT)]
  pub extension_point: String,

  /// Compiler image
  #[arg(long, default_value = DEFAULT_IMAGE)]
  pub image: String,

  /// Force a container backend instead of probing docker, then singularity
  #[arg(long, value_name = "NAME")]
  pub backend: Option<Candidate>,
}

impl BuildArgs {
  pub fn registry(&self) -> DirectoryRegistry {
    if self.plugin_path.is_empty() {
      DirectoryRegistry::from_env()
    } else {
      DirectoryRegistry::new(self.plugin_path.clone())
    }
  }

  pub fn options(&self) -> Result<CompileOptions> {
    let source_root = dunce::canonicalize(&self.source_root)
      .with_context(|| format!("Source root not found: {}", self.source_root.display()))?;

    let package = match &self.package {
      Some(package) => package.clone(),
      None => detect_package_name(&source_root).context("Failed to determine the package name")?,
    };

    let mut options = CompileOptions::new(package, source_root)
      .image(&self.image)
      .extension_point(&self.extension_point);
    if let Some(candidate) = self.backend {
      options = options.candidates(vec![candidate]);
    }
    Ok(options)
  }
}
