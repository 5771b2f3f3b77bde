use predicates::prelude::*;

use super::common::{PACKAGE, TestEnv};

#[cfg(unix)]
#[test]
fn plan_prints_command_without_running_it() {
  let env = TestEnv::new();
  env.add_plugin("pluginA", &["/host/a/static"]);
  env.recording_backend("docker", 0);

  env
    .cmd()
    .arg("plan")
    .assert()
    .success()
    .stdout(predicate::str::contains("/opt/pluginA/WebApp/static"))
    .stdout(predicate::str::contains("--py3-style"));

  assert!(!env.log_path().exists());
}

#[cfg(unix)]
#[test]
fn plan_json_lists_bindings() {
  let env = TestEnv::new();
  env.add_plugin("pluginA", &["/host/a/static"]);
  env.fake_backend("docker", "exit 0");

  let output = env.cmd().args(["plan", "--format", "json"]).output().unwrap();
  assert!(output.status.success());

  let json: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
  assert_eq!(json["package"], PACKAGE);
  assert_eq!(json["backend"]["kind"], "direct-mount");

  let bindings = json["bindings"].as_array().unwrap();
  assert_eq!(bindings.len(), 3);
  assert_eq!(bindings[1]["container_path"], "pluginA/WebApp/static");
  assert_eq!(bindings[1]["mode"], "read-only");
  assert_eq!(bindings[2]["container_path"], PACKAGE);
  assert_eq!(bindings[2]["mode"], "read-write");
}

#[test]
fn plan_requires_a_single_package() {
  let env = TestEnv::new();
  std::fs::create_dir_all(env.repo_path().join("src").join("other")).unwrap();

  env
    .cmd()
    .arg("plan")
    .assert()
    .failure()
    .stderr(predicate::str::contains("package name"));
}

#[cfg(unix)]
#[test]
fn explicit_package_overrides_detection() {
  let env = TestEnv::new();
  std::fs::create_dir_all(env.repo_path().join("src").join("other")).unwrap();
  env.fake_backend("docker", "exit 0");

  env
    .cmd()
    .args(["plan", "--package", "other"])
    .assert()
    .success()
    .stdout(predicate::str::contains("-n=other"));
}

#[cfg(unix)]
#[test]
fn overlay_plan_masks_the_removed_staging_root() {
  let env = TestEnv::new();
  env.add_plugin("pluginA", &["/host/a/static"]);
  env.fake_backend("singularity", "exit 0");

  let output = env.cmd().args(["plan", "--format", "json"]).output().unwrap();
  assert!(output.status.success());

  let json: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
  assert_eq!(json["backend"]["kind"], "overlay-root");
  assert!(json["staging"].is_null());
  let command: Vec<&str> = json["command"].as_array().unwrap().iter().map(|v| v.as_str().unwrap()).collect();
  assert_eq!(command[4], "--bind=<staging>:/opt");
  assert!(!command.iter().any(|arg| arg.contains("diracweb-root-")));
}

#[cfg(unix)]
#[test]
fn overlay_plan_can_keep_the_staging_root() {
  let env = TestEnv::new();
  env.add_plugin("pluginA", &["/host/a/static"]);
  env.fake_backend("singularity", "exit 0");

  let output = env
    .cmd()
    .args(["plan", "--keep-staging", "--format", "json"])
    .output()
    .unwrap();
  assert!(output.status.success());

  let json: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
  let staging = std::path::PathBuf::from(json["staging"].as_str().unwrap());
  assert!(staging.join("pluginA").join("WebApp").join("static").is_dir());
  assert!(staging.join(PACKAGE).is_dir());
  assert_eq!(json["command"][4], format!("--bind={}:/opt", staging.display()));

  std::fs::remove_dir_all(&staging).unwrap();
}

#[cfg(unix)]
#[test]
fn overlay_plan_text_shows_the_placeholder() {
  let env = TestEnv::new();
  env.fake_backend("singularity", "exit 0");

  env
    .cmd()
    .arg("plan")
    .assert()
    .success()
    .stdout(predicate::str::contains("'--bind=<staging>:/opt'"))
    .stdout(predicate::str::contains("Staging root kept at").not());
}
