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
//! The whole flow for one invocation: validate, resolve, compile, assemble, execute.
use crate::bootstrap;
use crate::command::CommandSpec;
use crate::command::assemble;
use crate::config::Settings;
use crate::defaults::Pricing;
use crate::defaults::TaskCounts;
use crate::defaults::resolve_bid_price;
use crate::defaults::resolve_defaults;
use crate::defaults::resolve_hardware_id;
use crate::error::LaunchError;
use crate::execute::CapturedOutput;
use crate::execute::Executor;
use crate::options::ClusterOptions;
use crate::options::OptionsRecord;
use crate::validate::validate;

/// Everything resolved for one cluster, ready to run.
#[derive(Debug, Clone, PartialEq)]
pub struct LaunchPlan {
  pub options: ClusterOptions,
  pub counts: TaskCounts,
  pub hardware_id: &'static str,
  pub pricing: Pricing,
  pub command: CommandSpec,
}

/// Validates `record` and, only if every check passed, builds the command.
pub fn plan(record: OptionsRecord, settings: &Settings) -> Result<LaunchPlan, LaunchError> {
  let options = validate(record)?;

  let counts = resolve_defaults(options.cluster_type, options.mappers, options.reducers);
  let hardware_id = resolve_hardware_id(options.cluster_type.as_str())?;
  let pricing = resolve_bid_price(options.cluster_type, options.bid_price, options.on_demand);

  tracing::info!(
    cluster_type = %options.cluster_type,
    size = options.size,
    hardware_id,
    map_tasks = counts.map_tasks,
    reduce_tasks = counts.reduce_tasks,
    ?pricing,
    "Resolved cluster sizing"
  );

  let bootstrap = match &options.descriptor {
    Some(descriptor) => {
      let has_hadoop_action = descriptor
        .actions
        .iter()
        .any(|action| action.script == settings.hadoop_config_script);

      if (options.mappers.is_some() || options.reducers.is_some()) && !has_hadoop_action {
        tracing::warn!(
          script = %settings.hadoop_config_script,
          "Mapper/reducer overrides given but the descriptor has no Hadoop configuration action; they will have no effect"
        );
      }

      bootstrap::compile(descriptor, counts, options.size, settings)
    }
    None => Vec::new(),
  };

  let command = assemble(&options, counts, hardware_id, pricing, bootstrap, settings);

  Ok(LaunchPlan {
    options,
    counts,
    hardware_id,
    pricing,
    command,
  })
}

/// Runs a planned command. The captured output is returned even when the
/// client failed so the caller can print it before reporting the failure.
pub async fn launch<E: Executor>(
  plan: &LaunchPlan,
  executor: &E,
) -> Result<CapturedOutput, LaunchError> {
  tracing::info!("Launching cluster via {}", plan.command.program);

  Ok(executor.execute(&plan.command).await?)
}
