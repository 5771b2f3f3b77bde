use predicates::prelude::*;

use super::common::{PACKAGE, TestEnv, display};

#[test]
fn skip_variable_skips_everything() {
  let env = TestEnv::new();
  let plugin = env.add_plugin("pluginA", &["/host/a/static"]);

  env
    .cmd()
    .arg("compile")
    .env("DIRAC_WEBAPP_NO_COMPILE", "1")
    .assert()
    .success()
    .stderr(predicate::str::contains("Skipping webapp compilation"));

  assert!(!plugin.join("WebApp").exists());
}

#[test]
fn no_backend_fails() {
  let env = TestEnv::new();

  env
    .cmd()
    .arg("compile")
    .assert()
    .failure()
    .stderr(predicate::str::contains("no container backend available"))
    .stderr(predicate::str::contains("docker, singularity"));
}

#[cfg(unix)]
#[test]
fn docker_receives_mounts_and_compiler_flags() {
  let env = TestEnv::new();
  let plugin = env.add_plugin("pluginA", &["/host/a/static"]);
  env.recording_backend("docker", 0);

  env
    .cmd()
    .arg("compile")
    .assert()
    .success()
    .stdout(predicate::str::contains(format!("Compiled {PACKAGE}")));

  let src = env.repo_path().join("src").join(PACKAGE);
  let args = env.recorded_args();
  assert_eq!(&args[..2], &["run", "--rm"]);
  assert!(args.contains(&format!("-v={}:/opt/pluginA:ro", display(&plugin))));
  assert!(args.contains(&"-v=/host/a/static:/opt/pluginA/WebApp/static:ro".to_string()));
  assert!(args.contains(&format!("-v={}:/opt/{PACKAGE}", display(&src))));
  assert!(args.iter().any(|arg| arg.starts_with("-u=")));
  assert!(args.ends_with(&[
    "diracgrid/dirac-distribution:latest".to_string(),
    "/dirac-webapp-compile.py".to_string(),
    "-D=/opt".to_string(),
    format!("-n={PACKAGE}"),
    "--py3-style".to_string(),
  ]));
  assert!(plugin.join("WebApp").join("static").is_dir());
}

#[cfg(unix)]
#[test]
fn singularity_gets_a_staging_root_that_is_cleaned_up() {
  let env = TestEnv::new();
  env.add_plugin("pluginA", &["/host/a/static"]);
  env.recording_backend("singularity", 0);

  env.cmd().arg("compile").assert().success();

  let args = env.recorded_args();
  assert_eq!(&args[..3], &["run", "--writable", "--containall"]);
  let staging = args[3]
    .strip_prefix("--bind=")
    .and_then(|spec| spec.strip_suffix(":/opt"))
    .expect("staging bind comes first");
  assert!(!std::path::Path::new(staging).exists());
  assert!(args.contains(&"docker://diracgrid/dirac-distribution:latest".to_string()));
}

#[cfg(unix)]
#[test]
fn failing_backend_propagates_exit_code() {
  let env = TestEnv::new();
  env.recording_backend("docker", 137);

  env
    .cmd()
    .arg("compile")
    .assert()
    .code(137)
    .stderr(predicate::str::contains("exit code 137"));
}

#[cfg(unix)]
#[test]
fn forced_backend_skips_probing() {
  let env = TestEnv::new();
  env.recording_backend("docker", 0);
  env.fake_backend("singularity", "exit 0");

  env.cmd().args(["compile", "--backend", "singularity"]).assert().success();

  assert!(!env.log_path().exists());
}

#[test]
fn ambiguous_plugin_fails() {
  let env = TestEnv::new();
  env.add_plugin("greedy", &["/one", "/two"]);

  env
    .cmd()
    .arg("compile")
    .assert()
    .failure()
    .stderr(predicate::str::contains("greedy"))
    .stderr(predicate::str::contains("static directories"));
}

#[test]
fn configuration_errors_exit_with_failure() {
  let env = TestEnv::new();
  env.add_plugin("greedy", &["/one", "/two"]);

  env.cmd().arg("compile").assert().code(1);
}
