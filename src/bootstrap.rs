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
//! Renders declared bootstrap actions into `--bootstrap-action` argument units.
//!
//! Every action becomes one contiguous unit, in declaration order:
//!
//! * a generic script: `--bootstrap-action <uri> [--args <a1>, <a2>, ...]`
//! * the Hadoop configuration script: `--bootstrap-action <uri> --args [<config-file>,]-s,k=v,...`,
//!   where the properties are computed from the task counts and the configured
//!   tuning set, and any literal arguments in the descriptor are ignored.
use crate::config::Settings;
use crate::defaults::TaskCounts;
use crate::descriptor::DeclaredAction;
use crate::descriptor::Descriptor;
use serde::Deserialize;
use serde::Serialize;

pub const BOOTSTRAP_ACTION_FLAG: &str = "--bootstrap-action";
pub const ARGS_FLAG: &str = "--args";

/// The configure-hadoop file a property is written to.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum PropertyGroup {
  #[default]
  #[serde(rename = "s")]
  Site,
  #[serde(rename = "m")]
  Mapred,
  #[serde(rename = "h")]
  Hdfs,
  #[serde(rename = "c")]
  Core,
}

impl PropertyGroup {
  pub fn flag(self) -> &'static str {
    match self {
      PropertyGroup::Site => "-s",
      PropertyGroup::Mapred => "-m",
      PropertyGroup::Hdfs => "-h",
      PropertyGroup::Core => "-c",
    }
  }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HadoopProperty {
  #[serde(default)]
  pub group: PropertyGroup,
  pub key: String,
  pub value: String,
}

impl HadoopProperty {
  pub fn site(key: &str, value: impl ToString) -> Self {
    Self {
      group: PropertyGroup::Site,
      key: key.to_string(),
      value: value.to_string(),
    }
  }

  fn render(&self) -> String {
    format!("{},{}={}", self.group.flag(), self.key, self.value)
  }
}

/// A declared action, classified by what the compiler does with it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BootstrapAction {
  Generic {
    script: String,
    args: Vec<String>,
  },
  HadoopConfig {
    script: String,
    config_file: Option<String>,
  },
}

impl BootstrapAction {
  pub fn classify(declared: &DeclaredAction, hadoop_config_script: &str) -> Self {
    if declared.script == hadoop_config_script {
      if !declared.args.is_empty() {
        tracing::debug!(
          script = %declared.script,
          ignored = ?declared.args,
          "Literal arguments on the Hadoop configuration action are replaced by computed properties"
        );
      }
      BootstrapAction::HadoopConfig {
        script: declared.script.clone(),
        config_file: declared.config_file.clone(),
      }
    } else {
      BootstrapAction::Generic {
        script: declared.script.clone(),
        args: declared.args.clone(),
      }
    }
  }

  pub fn script(&self) -> &str {
    match self {
      BootstrapAction::Generic { script, .. } | BootstrapAction::HadoopConfig { script, .. } => script,
    }
  }
}

/// The three properties derived from task counts, in render order.
pub fn base_properties(counts: TaskCounts, node_count: u32) -> Vec<HadoopProperty> {
  vec![
    HadoopProperty::site("mapred.reduce.tasks", counts.total_reduce_tasks(node_count)),
    HadoopProperty::site("mapred.tasktracker.map.tasks.maximum", counts.map_tasks),
    HadoopProperty::site("mapred.tasktracker.reduce.tasks.maximum", counts.reduce_tasks),
  ]
}

/// Compiles every action of `descriptor` into argument tokens.
///
/// An empty descriptor contributes no tokens.
pub fn compile(
  descriptor: &Descriptor,
  counts: TaskCounts,
  node_count: u32,
  settings: &Settings,
) -> Vec<String> {
  let mut tokens = Vec::new();

  for declared in &descriptor.actions {
    let action = BootstrapAction::classify(declared, &settings.hadoop_config_script);
    tokens.extend(render_action(&action, counts, node_count, &settings.tuning));
  }

  tokens
}

fn render_action(
  action: &BootstrapAction,
  counts: TaskCounts,
  node_count: u32,
  tuning: &[HadoopProperty],
) -> Vec<String> {
  let mut unit = vec![BOOTSTRAP_ACTION_FLAG.to_string(), action.script().to_string()];

  match action {
    BootstrapAction::Generic { args, .. } => {
      if !args.is_empty() {
        unit.push(ARGS_FLAG.to_string());
        unit.push(args.join(", "));
      }
    }
    BootstrapAction::HadoopConfig { config_file, .. } => {
      let csv = base_properties(counts, node_count)
        .iter()
        .chain(tuning)
        .map(HadoopProperty::render)
        .collect::<Vec<_>>()
        .join(",");

      unit.push(ARGS_FLAG.to_string());
      unit.push(match config_file {
        Some(file) => format!("{},{}", file, csv),
        None => csv,
      });
    }
  }

  unit
}
