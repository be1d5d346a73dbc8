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
use crate::options::OptionsRecord;
use clap::Args;
use clap::Parser;
use clap::Subcommand;
use clap::ValueEnum;
use std::ffi::OsString;
use std::path::PathBuf;

#[derive(Debug, Parser)]
#[command(
  name = "emr-launch",
  version,
  about = "Validates cluster-sizing options and launches an Elastic MapReduce cluster",
  args_conflicts_with_subcommands = true
)]
pub struct Cli {
  #[command(subcommand)]
  pub command: Option<Commands>,

  #[command(flatten)]
  pub create: CreateArgs,

  /// Settings file (TOML, or JSON with a .json extension).
  #[arg(long, env = "EMR_LAUNCH_CONFIG", value_name = "PATH")]
  pub config: Option<PathBuf>,

  /// Print the assembled command instead of running it.
  #[arg(long)]
  pub dry_run: bool,

  /// Output format for --dry-run.
  #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
  pub format: OutputFormat,
}

#[derive(Debug, Subcommand)]
pub enum Commands {
  /// Print the per-type defaults: hardware, task slots and bid price.
  Defaults {
    #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
    format: OutputFormat,
  },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
  Text,
  Json,
}

/// Cluster options. Numbers are taken as text and checked during validation.
#[derive(Debug, Clone, Default, Args)]
pub struct CreateArgs {
  /// Cluster name shown in the console.
  #[arg(long)]
  pub name: Option<String>,

  /// Cluster type: large, high-memory or cluster-compute.
  #[arg(long = "type", value_name = "TYPE")]
  pub cluster_type: Option<String>,

  /// Number of core nodes.
  #[arg(long, allow_negative_numbers = true)]
  pub size: Option<String>,

  /// Availability zone, e.g. us-east-1a.
  #[arg(long)]
  pub zone: Option<String>,

  /// Map slots per node (needs --bootstrap).
  #[arg(long, allow_negative_numbers = true)]
  pub mappers: Option<String>,

  /// Reduce slots per node (needs --bootstrap).
  #[arg(long, allow_negative_numbers = true)]
  pub reducers: Option<String>,

  /// Spot bid price per instance hour. Defaults to the type's table price.
  #[arg(long = "bid", value_name = "PRICE", allow_negative_numbers = true)]
  pub bid_price: Option<String>,

  /// Use on-demand instances instead of bidding.
  #[arg(long)]
  pub on_demand: bool,

  /// Bootstrap descriptor (XML). Also accepted as -bs.
  #[arg(long, value_name = "PATH")]
  pub bootstrap: Option<PathBuf>,
}

impl From<CreateArgs> for OptionsRecord {
  fn from(
    CreateArgs {
      name,
      cluster_type,
      size,
      zone,
      mappers,
      reducers,
      bid_price,
      on_demand,
      bootstrap,
    }: CreateArgs,
  ) -> Self {
    OptionsRecord {
      name,
      cluster_type,
      size,
      zone,
      mappers,
      reducers,
      bid_price,
      on_demand,
      bootstrap,
    }
  }
}

/// Rewrites the two-letter `-bs` switch to `--bootstrap`, which clap cannot
/// express as a short flag.
pub fn normalize_args<I, T>(args: I) -> Vec<OsString>
where
  I: IntoIterator<Item = T>,
  T: Into<OsString>,
{
  args
    .into_iter()
    .map(Into::into)
    .map(|arg| if arg.to_str() == Some("-bs") { OsString::from("--bootstrap") } else { arg })
    .collect()
}
