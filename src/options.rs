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
use crate::defaults::ClusterType;
use crate::descriptor::Descriptor;
use std::path::PathBuf;

/// Options exactly as the user typed them.
///
/// Numeric fields stay as text so that a bad value becomes a validation
/// error alongside every other problem instead of aborting flag parsing.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct OptionsRecord {
  pub name: Option<String>,
  pub cluster_type: Option<String>,
  pub size: Option<String>,
  pub zone: Option<String>,
  pub mappers: Option<String>,
  pub reducers: Option<String>,
  pub bid_price: Option<String>,
  pub on_demand: bool,
  pub bootstrap: Option<PathBuf>,
}

/// Options that passed every check, with their values parsed.
///
/// Only [`crate::validate::validate`] builds one, so holding a `ClusterOptions`
/// means the record is safe to provision from.
#[derive(Debug, Clone, PartialEq)]
pub struct ClusterOptions {
  pub name: Option<String>,
  pub cluster_type: ClusterType,
  pub size: u32,
  pub zone: Option<String>,
  pub mappers: Option<u32>,
  pub reducers: Option<u32>,
  pub bid_price: Option<f64>,
  pub on_demand: bool,
  pub descriptor: Option<Descriptor>,
}
