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
use emr_launch::bootstrap::BootstrapAction;
use emr_launch::bootstrap::HadoopProperty;
use emr_launch::bootstrap::PropertyGroup;
use emr_launch::bootstrap::base_properties;
use emr_launch::bootstrap::compile;
use emr_launch::config::DEFAULT_HADOOP_CONFIG_SCRIPT;
use emr_launch::config::Settings;
use emr_launch::defaults::TaskCounts;
use emr_launch::descriptor::DeclaredAction;
use emr_launch::descriptor::Descriptor;

const HADOOP: &str = DEFAULT_HADOOP_CONFIG_SCRIPT;

fn counts(map_tasks: u32, reduce_tasks: u32) -> TaskCounts {
  TaskCounts {
    map_tasks,
    reduce_tasks,
  }
}

fn bootstrap_units(tokens: &[String]) -> Vec<&[String]> {
  let starts: Vec<usize> = tokens
    .iter()
    .enumerate()
    .filter(|(_, t)| t.as_str() == "--bootstrap-action")
    .map(|(i, _)| i)
    .collect();

  starts
    .iter()
    .enumerate()
    .map(|(n, &start)| {
      let end = starts.get(n + 1).copied().unwrap_or(tokens.len());
      &tokens[start..end]
    })
    .collect()
}

#[test]
fn empty_descriptor_contributes_nothing() {
  let tokens = compile(&Descriptor::default(), counts(4, 2), 10, &Settings::default());
  assert!(tokens.is_empty());
}

#[test]
fn actions_render_in_declaration_order() {
  let descriptor = Descriptor::parse(&format!(
    r#"<bootstrap>
         <action script="s3://b/first.sh"><arg>x</arg><arg>y</arg></action>
         <action script="{HADOOP}"/>
         <action script="s3://b/last.sh"/>
       </bootstrap>"#
  ))
  .unwrap();

  let tokens = compile(&descriptor, counts(4, 2), 3, &Settings::default());
  let units = bootstrap_units(&tokens);

  assert_eq!(units.len(), 3);
  assert_eq!(units[0], ["--bootstrap-action", "s3://b/first.sh", "--args", "x, y"]);
  assert_eq!(units[1][1], HADOOP);
  assert_eq!(units[2], ["--bootstrap-action", "s3://b/last.sh"]);
}

#[test]
fn hadoop_action_gets_computed_properties_not_literal_args() {
  let descriptor = Descriptor::parse(&format!(
    r#"<bootstrap><action script="{HADOOP}"><arg>ignored</arg></action></bootstrap>"#
  ))
  .unwrap();

  let tokens = compile(&descriptor, counts(30, 24), 10, &Settings::default());

  assert_eq!(
    tokens,
    [
      "--bootstrap-action",
      HADOOP,
      "--args",
      "-s,mapred.reduce.tasks=240,\
       -s,mapred.tasktracker.map.tasks.maximum=30,\
       -s,mapred.tasktracker.reduce.tasks.maximum=24",
    ]
  );
}

#[test]
fn config_file_leads_the_hadoop_args() {
  let descriptor = Descriptor::parse(&format!(
    r#"<bootstrap><action script="{HADOOP}" core-config-file="s3://b/core-site.xml"/></bootstrap>"#
  ))
  .unwrap();

  let tokens = compile(&descriptor, counts(4, 2), 1, &Settings::default());
  assert!(tokens[3].starts_with("s3://b/core-site.xml,-s,mapred.reduce.tasks=2,"));
}

#[test]
fn tuning_properties_follow_base_properties_in_configured_order() {
  let settings = Settings {
    tuning: vec![
      HadoopProperty::site("mapred.job.reuse.jvm.num.tasks", -1),
      HadoopProperty {
        group: PropertyGroup::Mapred,
        key: "mapred.map.tasks.speculative.execution".into(),
        value: "false".into(),
      },
      HadoopProperty {
        group: PropertyGroup::Hdfs,
        key: "io.sort.mb".into(),
        value: "200".into(),
      },
    ],
    ..Settings::default()
  };
  let descriptor = Descriptor {
    actions: vec![DeclaredAction {
      script: HADOOP.into(),
      config_file: None,
      args: vec![],
    }],
  };

  let tokens = compile(&descriptor, counts(4, 2), 5, &settings);
  let rendered: Vec<&str> = tokens[3].split(",-").collect();

  assert_eq!(
    rendered,
    [
      "-s,mapred.reduce.tasks=10",
      "s,mapred.tasktracker.map.tasks.maximum=4",
      "s,mapred.tasktracker.reduce.tasks.maximum=2",
      "s,mapred.job.reuse.jvm.num.tasks=-1",
      "m,mapred.map.tasks.speculative.execution=false",
      "h,io.sort.mb=200",
    ]
  );
}

#[test]
fn custom_hadoop_script_is_recognised() {
  let settings = Settings {
    hadoop_config_script: "s3://mirror/configure-hadoop".into(),
    ..Settings::default()
  };
  let declared = DeclaredAction {
    script: "s3://mirror/configure-hadoop".into(),
    config_file: None,
    args: vec!["x".into()],
  };

  assert!(matches!(
    BootstrapAction::classify(&declared, &settings.hadoop_config_script),
    BootstrapAction::HadoopConfig { .. }
  ));
  assert!(matches!(
    BootstrapAction::classify(&declared, HADOOP),
    BootstrapAction::Generic { .. }
  ));
}

#[test]
fn reduce_total_is_per_node_times_nodes() {
  let props = base_properties(counts(30, 24), 10);
  assert_eq!(props[0].key, "mapred.reduce.tasks");
  assert_eq!(props[0].value, "240");
}
