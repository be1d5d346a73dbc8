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

//! # emr-launch
//!
//! `emr-launch` turns a handful of cluster-sizing options into a complete
//! `elastic-mapreduce` invocation. Options are validated up front and every
//! problem is reported at once; a clean set of options is resolved against the
//! per-type defaults, its bootstrap descriptor is compiled into
//! `--bootstrap-action` units, and the resulting command is handed to the
//! provisioning client.
//!
//! This crate contains the library logic for the `emr-launch` CLI, but its
//! core modules (`validate`, `defaults`, `bootstrap`, `command`) are pure and
//! can be used independently.
//!
//! ## Core Modules
//!
//! * [`validate`]: The accumulating check pipeline that turns an
//!   [`options::OptionsRecord`] into [`options::ClusterOptions`] or a full
//!   [`error::ValidationReport`].
//! * [`defaults`]: Per-type lookup tables for hardware, task slots and bid price.
//! * [`descriptor`]: Parses the XML bootstrap descriptor.
//! * [`bootstrap`]: Compiles declared actions into `--bootstrap-action` units,
//!   injecting computed Hadoop properties into the configuration action.
//! * [`command`]: Defines [`command::CommandSpec`] and assembles it.
//! * [`pipeline`]: Runs validate → resolve → compile → assemble → execute.
//! * [`execute`]: The [`execute::Executor`] seam and its child-process implementation.
//! * [`config`]: `figment`-layered deployment settings.
//! * [`cli`]: Defines the `clap`-based command-line interface.
//! * [`error`]: Defines the custom error types for the library.
//! * [`logging`]: Provides the `setup_tracing` utility.

pub mod bootstrap;
pub mod cli;
pub mod command;
pub mod config;
pub mod defaults;
pub mod descriptor;
pub mod error;
pub mod execute;
pub mod logging;
pub mod options;
pub mod pipeline;
pub mod validate;
