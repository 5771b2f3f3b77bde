//! Shared test helpers for CLI integration tests.

use std::path::{Path, PathBuf};

use assert_cmd::Command;
use assert_cmd::cargo::cargo_bin_cmd;
use tempfile::TempDir;

pub const PACKAGE: &str = "mypkg";

/// Isolated test environment.
///
/// Each test gets its own temporary directory holding a package source tree
/// (`repo/src/mypkg`), a plugin directory and a `bin` directory that is the
/// only entry on `PATH`, so container backends are whatever the test puts
/// there.
pub struct TestEnv {
  pub temp: TempDir,
}

impl TestEnv {
  pub fn new() -> Self {
    let temp = TempDir::new().unwrap();
    for dir in ["repo/src/mypkg", "plugins", "bin", "data"] {
      std::fs::create_dir_all(temp.path().join(dir)).unwrap();
    }
    Self { temp }
  }

  fn path(&self, relative: &str) -> PathBuf {
    let p = self.temp.path().join(relative);
    dunce::canonicalize(&p).unwrap_or(p)
  }

  pub fn repo_path(&self) -> PathBuf {
    self.path("repo")
  }

  pub fn plugins_path(&self) -> PathBuf {
    self.path("plugins")
  }

  pub fn bin_path(&self) -> PathBuf {
    self.path("bin")
  }

  /// Install a plugin registered under the `dirac` extension point.
  pub fn add_plugin(&self, module: &str, static_dirs: &[&str]) -> PathBuf {
    let root = self.plugins_path().join(module);
    std::fs::create_dir_all(&root).unwrap();
    std::fs::write(
      root.join("plugin.json"),
      serde_json::json!({ "name": module, "entry_points": { "dirac": "extension.json" } }).to_string(),
    )
    .unwrap();
    std::fs::write(
      root.join("extension.json"),
      serde_json::json!({ "web_resources": { "static": static_dirs } }).to_string(),
    )
    .unwrap();
    root
  }

  /// Place an executable shell script named `name` on the test `PATH`.
  #[cfg(unix)]
  pub fn fake_backend(&self, name: &str, script: &str) -> PathBuf {
    use std::os::unix::fs::PermissionsExt;

    let exe = self.bin_path().join(name);
    std::fs::write(&exe, format!("#!/bin/sh\n{script}\n")).unwrap();
    std::fs::set_permissions(&exe, std::fs::Permissions::from_mode(0o755)).unwrap();
    exe
  }

  /// Backend script that records its arguments, one per line, in `args.log`.
  #[cfg(unix)]
  pub fn recording_backend(&self, name: &str, exit_code: i32) -> PathBuf {
    let log = self.log_path();
    self.fake_backend(
      name,
      &format!("for arg in \"$@\"; do echo \"$arg\"; done > '{}'\nexit {exit_code}", log.display()),
    )
  }

  pub fn log_path(&self) -> PathBuf {
    self.temp.path().join("args.log")
  }

  /// Arguments the recording backend was invoked with.
  pub fn recorded_args(&self) -> Vec<String> {
    std::fs::read_to_string(self.log_path())
      .unwrap()
      .lines()
      .map(str::to_string)
      .collect()
  }

  /// Get a pre-configured Command for the diracweb binary.
  ///
  /// Runs from the package source root with:
  /// - `PATH`: only the test `bin` directory
  /// - `DIRACWEB_PLUGIN_PATH`: the test plugin directory
  /// - `XDG_DATA_HOME`: isolated data path
  /// - `DIRAC_WEBAPP_NO_COMPILE`: removed
  pub fn cmd(&self) -> Command {
    let mut cmd: Command = cargo_bin_cmd!("diracweb");
    cmd.current_dir(self.repo_path());
    cmd.env("PATH", self.bin_path());
    cmd.env("DIRACWEB_PLUGIN_PATH", self.plugins_path());
    cmd.env("XDG_DATA_HOME", self.path("data"));
    cmd.env_remove("DIRAC_WEBAPP_NO_COMPILE");
    cmd.env_remove("RUST_LOG");
    cmd
  }
}

pub fn display(path: &Path) -> String {
  path.display().to_string()
}
