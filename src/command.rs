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
use crate::config::Settings;
use crate::defaults::Pricing;
use crate::defaults::format_price;
use crate::defaults::TaskCounts;
use crate::options::ClusterOptions;
use serde::Deserialize;
use serde::Serialize;
use std::fmt;

/// The complete provisioning client invocation.
///
/// This struct is the "contract" handed to an [`crate::execute::Executor`]:
/// nothing downstream adds, removes or reorders arguments.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CommandSpec {
  /// The client to execute (e.g., "elastic-mapreduce" or "/opt/emr/elastic-mapreduce").
  pub program: String,

  /// Arguments in the order the client expects them.
  #[serde(default)]
  pub args: Vec<String>,
}

impl CommandSpec {
  /// Index of the first occurrence of `token` among the arguments.
  pub fn position(&self, token: &str) -> Option<usize> {
    self.args.iter().position(|arg| arg == token)
  }

  /// Value following the first occurrence of `flag`.
  pub fn value_of(&self, flag: &str) -> Option<&str> {
    self
      .position(flag)
      .and_then(|i| self.args.get(i + 1))
      .map(String::as_str)
  }
}

/// Renders as a single shell-pasteable line.
impl fmt::Display for CommandSpec {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    write!(f, "{}", shell_quote(&self.program))?;
    for arg in &self.args {
      write!(f, " {}", shell_quote(arg))?;
    }
    Ok(())
  }
}

fn shell_quote(token: &str) -> String {
  let plain = !token.is_empty()
    && token
      .chars()
      .all(|c| c.is_ascii_alphanumeric() || "-_./:=,@%+".contains(c));

  if plain {
    token.to_string()
  } else {
    format!("'{}'", token.replace('\'', r"'\''"))
  }
}

/// Builds the client invocation.
///
/// Order is fixed: create/alive, name, zone, AMI, the master group, the core
/// group, then the core group's `--bid-price` (at most once), debugging, and
/// finally the bootstrap units.
pub fn assemble(
  options: &ClusterOptions,
  counts: TaskCounts,
  hardware_id: &str,
  pricing: Pricing,
  bootstrap: Vec<String>,
  settings: &Settings,
) -> CommandSpec {
  let mut args: Vec<String> = vec!["--create".into(), "--alive".into()];

  if let Some(name) = &options.name {
    args.extend(["--name".into(), name.clone()]);
  }
  if let Some(zone) = &options.zone {
    args.extend(["--availability-zone".into(), zone.clone()]);
  }
  args.extend(["--ami-version".into(), settings.ami_version.clone()]);

  args.extend(instance_group("master", hardware_id, 1));
  args.extend(instance_group("core", hardware_id, options.size));

  // The bid applies to the group right before it.
  if let Pricing::Bid(price) = pricing {
    args.extend(["--bid-price".into(), format_price(price)]);
  }

  if settings.enable_debugging {
    args.push("--enable-debugging".into());
  }

  args.extend(bootstrap);

  tracing::debug!(
    cluster_type = %options.cluster_type,
    map_tasks = counts.map_tasks,
    reduce_tasks = counts.reduce_tasks,
    "Assembled {} arguments",
    args.len()
  );

  CommandSpec {
    program: settings.client.clone(),
    args,
  }
}

fn instance_group(role: &str, hardware_id: &str, count: u32) -> [String; 6] {
  [
    "--instance-group".into(),
    role.into(),
    "--instance-type".into(),
    hardware_id.into(),
    "--instance-count".into(),
    count.to_string(),
  ]
}
