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
//! Per-cluster-type lookup tables: hardware ids, default task slots and spot bid prices.
use crate::error::ResolveError;
use serde::Serialize;
use std::fmt;
use std::str::FromStr;

/// The cluster shapes the launcher knows how to size.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum ClusterType {
  Large,
  HighMemory,
  ClusterCompute,
}

/// One row of the defaults table.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ClusterProfile {
  pub cluster_type: ClusterType,
  pub name: &'static str,
  pub hardware_id: &'static str,
  pub map_tasks: u32,
  pub reduce_tasks: u32,
  pub bid_price: f64,
}

pub static CLUSTER_PROFILES: [ClusterProfile; 3] = [
  ClusterProfile {
    cluster_type: ClusterType::Large,
    name: "large",
    hardware_id: "m1.large",
    map_tasks: 4,
    reduce_tasks: 2,
    bid_price: 0.32,
  },
  ClusterProfile {
    cluster_type: ClusterType::HighMemory,
    name: "high-memory",
    hardware_id: "m2.4xlarge",
    map_tasks: 30,
    reduce_tasks: 24,
    bid_price: 1.80,
  },
  ClusterProfile {
    cluster_type: ClusterType::ClusterCompute,
    name: "cluster-compute",
    hardware_id: "cc1.4xlarge",
    map_tasks: 22,
    reduce_tasks: 16,
    bid_price: 1.30,
  },
];

impl ClusterType {
  pub fn profile(self) -> &'static ClusterProfile {
    match self {
      ClusterType::Large => &CLUSTER_PROFILES[0],
      ClusterType::HighMemory => &CLUSTER_PROFILES[1],
      ClusterType::ClusterCompute => &CLUSTER_PROFILES[2],
    }
  }

  pub fn as_str(self) -> &'static str {
    self.profile().name
  }

  pub fn hardware_id(self) -> &'static str {
    self.profile().hardware_id
  }
}

impl FromStr for ClusterType {
  type Err = ResolveError;

  fn from_str(s: &str) -> Result<Self, Self::Err> {
    CLUSTER_PROFILES
      .iter()
      .find(|profile| profile.name == s)
      .map(|profile| profile.cluster_type)
      .ok_or_else(|| ResolveError::UnknownType(s.to_string()))
  }
}

impl fmt::Display for ClusterType {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.write_str(self.as_str())
  }
}

/// Map and reduce slots per task tracker.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct TaskCounts {
  pub map_tasks: u32,
  pub reduce_tasks: u32,
}

impl TaskCounts {
  /// Cluster-wide reduce task total (`mapred.reduce.tasks`).
  pub fn total_reduce_tasks(&self, node_count: u32) -> u64 {
    u64::from(self.reduce_tasks) * u64::from(node_count)
  }
}

/// How the core instance group is priced.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum Pricing {
  /// Spot instances at the given maximum hourly bid.
  Bid(f64),
  /// No `--bid-price` at all.
  OnDemand,
}

/// Renders a bid with two decimals (`1.80`), keeping extra precision only
/// when rounding would change the bid (`0.125`).
pub fn format_price(price: f64) -> String {
  let cents = format!("{:.2}", price);
  if cents.parse::<f64>() == Ok(price) {
    cents
  } else {
    price.to_string()
  }
}

/// Explicit overrides win; anything not given falls back to the table.
pub fn resolve_defaults(
  cluster_type: ClusterType,
  mappers: Option<u32>,
  reducers: Option<u32>,
) -> TaskCounts {
  let profile = cluster_type.profile();
  TaskCounts {
    map_tasks: mappers.unwrap_or(profile.map_tasks),
    reduce_tasks: reducers.unwrap_or(profile.reduce_tasks),
  }
}

pub fn resolve_bid_price(cluster_type: ClusterType, bid_price: Option<f64>, on_demand: bool) -> Pricing {
  match (bid_price, on_demand) {
    (Some(price), _) => Pricing::Bid(price),
    (None, true) => Pricing::OnDemand,
    (None, false) => Pricing::Bid(cluster_type.profile().bid_price),
  }
}

/// Looks up the instance type for a cluster type name.
///
/// Validated options always carry a known [`ClusterType`], so the error arm is
/// only reachable from callers holding raw strings.
pub fn resolve_hardware_id(cluster_type: &str) -> Result<&'static str, ResolveError> {
  cluster_type.parse::<ClusterType>().map(ClusterType::hardware_id)
}

/// The lookup table as aligned text, one row per cluster type.
pub fn defaults_table() -> String {
  let mut table = format!(
    "{:<16} {:<12} {:>9} {:>12} {:>9}\n",
    "TYPE", "HARDWARE", "MAP TASKS", "REDUCE TASKS", "BID PRICE"
  );
  for profile in &CLUSTER_PROFILES {
    table.push_str(&format!(
      "{:<16} {:<12} {:>9} {:>12} {:>9}\n",
      profile.name,
      profile.hardware_id,
      profile.map_tasks,
      profile.reduce_tasks,
      format_price(profile.bid_price)
    ));
  }
  table
}
