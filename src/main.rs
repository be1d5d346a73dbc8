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
use anyhow::Context;
use anyhow::Result;
use clap::Parser;
use emr_launch::cli::Cli;
use emr_launch::cli::Commands;
use emr_launch::cli::OutputFormat;
use emr_launch::cli::normalize_args;
use emr_launch::config::Settings;
use emr_launch::defaults::CLUSTER_PROFILES;
use emr_launch::defaults::defaults_table;
use emr_launch::error::LaunchError;
use emr_launch::execute::ProcessExecutor;
use emr_launch::logging::setup_tracing;
use emr_launch::options::OptionsRecord;
use emr_launch::pipeline;
use std::process::ExitCode;

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<ExitCode> {
  let _log_guard = setup_tracing()?;

  let Cli {
    command,
    create,
    config,
    dry_run,
    format,
  } = Cli::parse_from(normalize_args(std::env::args_os()));

  if let Some(Commands::Defaults { format }) = command {
    match format {
      OutputFormat::Text => print!("{}", defaults_table()),
      OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&CLUSTER_PROFILES)?),
    }
    return Ok(ExitCode::SUCCESS);
  }

  let settings = Settings::load(config.as_deref()).context("Failed to load settings")?;

  let plan = match pipeline::plan(OptionsRecord::from(create), &settings) {
    Ok(plan) => plan,
    Err(LaunchError::Validation(report)) => {
      tracing::error!("Validation failed with {} error(s)", report.errors().len());
      for error in report.errors() {
        eprintln!("{}", error);
      }
      return Ok(ExitCode::FAILURE);
    }
    Err(e) => return Err(e.into()),
  };

  if dry_run {
    match format {
      OutputFormat::Text => println!("{}", plan.command),
      OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&plan.command)?),
    }
    return Ok(ExitCode::SUCCESS);
  }

  let output = pipeline::launch(&plan, &ProcessExecutor).await?;
  print!("{}", output.stdout);

  if let Err(e) = output.check(&plan.command.program) {
    eprintln!("{}", e);
    return Ok(ExitCode::FAILURE);
  }

  Ok(ExitCode::SUCCESS)
}
