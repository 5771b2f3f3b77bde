use predicates::prelude::*;

use super::common::TestEnv;

#[test]
fn plugins_lists_contributors_only() {
  let env = TestEnv::new();
  env.add_plugin("pluginA", &["/host/a/static"]);
  env.add_plugin("noStatic", &[]);
  env.add_plugin("mypkg", &["/host/self/static"]);

  env
    .cmd()
    .arg("plugins")
    .assert()
    .success()
    .stdout(predicate::str::contains("1 plugin(s) contribute to mypkg"))
    .stdout(predicate::str::contains("pluginA"))
    .stdout(predicate::str::contains("noStatic").not());
}

#[test]
fn plugins_json_output() {
  let env = TestEnv::new();
  env.add_plugin("pluginB", &["/host/b/static"]);
  env.add_plugin("pluginA", &["/host/a/static"]);

  let output = env.cmd().args(["plugins", "--format", "json"]).output().unwrap();
  assert!(output.status.success());

  let json: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
  let modules: Vec<_> = json
    .as_array()
    .unwrap()
    .iter()
    .map(|c| c["module"].as_str().unwrap().to_string())
    .collect();
  assert_eq!(modules, vec!["pluginA", "pluginB"]);
}

#[test]
fn plugins_without_any_installed() {
  let env = TestEnv::new();

  env
    .cmd()
    .arg("plugins")
    .assert()
    .success()
    .stdout(predicate::str::contains("No plugins contribute"));
}
