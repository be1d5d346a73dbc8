// Copyright 2025 Chisomo Makombo Sakala
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.
use assert_cmd::cargo;
use assert_cmd::prelude::*;
use predicates::prelude::*;
use serde_json::Value;
use std::fs;
use std::path::Path;
use std::process::Command;
use tempfile::TempDir;
use tempfile::tempdir;

/// `emr-launch` running in an empty directory with no ambient settings.
fn emr_launch(workdir: &Path) -> Command {
  let mut cmd = Command::new(cargo::cargo_bin!("emr-launch"));
  cmd
    .current_dir(workdir)
    .env_remove("EMR_LAUNCH_CONFIG")
    .env_remove("EMR_LAUNCH_CLIENT")
    .env_remove("EMR_LAUNCH_LOG_FILE")
    .env_remove("RUST_LOG")
    .env("CLICOLOR", "0");
  cmd
}

fn workdir_with_descriptor() -> TempDir {
  let temp = tempdir().unwrap();
  fs::write(
    temp.path().join("actions.xml"),
    r#"<bootstrap>
         <action script="s3://elasticmapreduce/bootstrap-actions/configure-hadoop"/>
       </bootstrap>"#,
  )
  .unwrap();
  temp
}

#[test]
fn test_help_pseudo_command_prints_usage() {
  let temp = tempdir().unwrap();

  emr_launch(temp.path())
    .arg("help")
    .assert()
    .success()
    .stdout(predicate::str::contains("Usage:"))
    .stdout(predicate::str::contains("--on-demand"));
}

#[test]
fn test_unknown_flag_aborts_before_validation() {
  let temp = tempdir().unwrap();

  emr_launch(temp.path())
    .args(["--type", "large", "--size", "2", "--nodes", "3"])
    .assert()
    .code(2)
    .stderr(predicate::str::contains("--nodes"))
    .stderr(predicate::str::contains("must be a positive integer").not());
}

#[test]
fn test_all_validation_errors_reported_together() {
  let temp = tempdir().unwrap();

  emr_launch(temp.path())
    .args(["--type", "tiny", "--size", "0", "--bid", "0.5", "--on-demand"])
    .env("EMR_LAUNCH_CLIENT", "/definitely/not/a/client")
    .assert()
    .code(1)
    .stdout(predicate::str::is_empty())
    .stderr(predicate::str::contains("--size must be a positive integer"))
    .stderr(predicate::str::contains("--type must be one of"))
    .stderr(predicate::str::contains("--bid and --on-demand cannot be used together"))
    .stderr(predicate::str::contains("Failed to spawn").not());
}

#[test]
fn test_overrides_require_descriptor() {
  let temp = tempdir().unwrap();

  emr_launch(temp.path())
    .args(["--type", "high-memory", "--size", "5", "--mappers", "40", "--dry-run"])
    .assert()
    .code(1)
    .stderr(predicate::str::contains("require a bootstrap descriptor"));
}

#[test]
fn test_dry_run_prints_command_line() {
  let temp = tempdir().unwrap();

  emr_launch(temp.path())
    .args(["--name", "etl", "--type", "large", "--size", "10", "--dry-run"])
    .assert()
    .success()
    .stdout(predicate::str::starts_with(
      "elastic-mapreduce --create --alive --name etl --ami-version latest",
    ))
    .stdout(predicate::str::contains(
      "--instance-count 10 --bid-price 0.32 --enable-debugging",
    ));
}

#[test]
fn test_dry_run_json_with_bs_alias() {
  let temp = workdir_with_descriptor();

  let output = emr_launch(temp.path())
    .args([
      "--type",
      "cluster-compute",
      "--size",
      "4",
      "--reducers",
      "8",
      "--on-demand",
      "-bs",
      "actions.xml",
      "--dry-run",
      "--format",
      "json",
    ])
    .output()
    .unwrap();

  assert!(output.status.success());
  let spec: Value = serde_json::from_slice(&output.stdout).unwrap();
  let args: Vec<&str> = spec["args"]
    .as_array()
    .unwrap()
    .iter()
    .map(|a| a.as_str().unwrap())
    .collect();

  assert_eq!(spec["program"], "elastic-mapreduce");
  assert!(!args.contains(&"--bid-price"));
  assert_eq!(
    args.last(),
    Some(
      &"-s,mapred.reduce.tasks=32,-s,mapred.tasktracker.map.tasks.maximum=22,-s,mapred.tasktracker.reduce.tasks.maximum=8"
    )
  );
}

#[test]
fn test_config_file_tuning_is_injected() {
  let temp = workdir_with_descriptor();
  fs::write(
    temp.path().join("emr-launch.toml"),
    r#"
      ami_version = "2.0"

      [[tuning]]
      key = "mapred.job.reuse.jvm.num.tasks"
      value = "-1"
    "#,
  )
  .unwrap();

  emr_launch(temp.path())
    .args(["--type", "large", "--size", "2", "--bootstrap", "actions.xml", "--dry-run"])
    .assert()
    .success()
    .stdout(predicate::str::contains("--ami-version 2.0"))
    .stdout(predicate::str::contains(
      "mapred.tasktracker.reduce.tasks.maximum=2,-s,mapred.job.reuse.jvm.num.tasks=-1",
    ));
}

#[test]
fn test_missing_config_file_fails() {
  let temp = tempdir().unwrap();

  emr_launch(temp.path())
    .args(["--type", "large", "--size", "2", "--config", "missing.toml"])
    .assert()
    .failure()
    .stderr(predicate::str::contains("Failed to load settings"));
}

#[test]
fn test_defaults_table() {
  let temp = tempdir().unwrap();

  emr_launch(temp.path())
    .arg("defaults")
    .assert()
    .success()
    .stdout(predicate::str::contains("m2.4xlarge"))
    .stdout(predicate::str::contains("cc1.4xlarge"));
}

#[cfg(unix)]
#[test]
fn test_client_output_is_printed_verbatim() {
  let temp = tempdir().unwrap();

  emr_launch(temp.path())
    .args(["--type", "large", "--size", "3", "--zone", "us-east-1a"])
    .env("EMR_LAUNCH_CLIENT", "echo")
    .assert()
    .success()
    .stdout(predicate::str::starts_with(
      "--create --alive --availability-zone us-east-1a",
    ))
    .stderr(predicate::str::contains("Provisioning client finished"));
}

#[cfg(unix)]
#[test]
fn test_client_failure_sets_exit_code() {
  let temp = tempdir().unwrap();

  emr_launch(temp.path())
    .args(["--type", "large", "--size", "3"])
    .env("EMR_LAUNCH_CLIENT", "false")
    .assert()
    .code(1)
    .stderr(predicate::str::contains("exited with status"));
}
