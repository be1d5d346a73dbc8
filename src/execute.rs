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
//! Runs an assembled [`CommandSpec`] and captures what the client printed.
use crate::command::CommandSpec;
use crate::error::ExecutionError;
use std::process::Stdio;
use tokio::process::Command;

/// What the client produced in a single run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CapturedOutput {
  pub code: Option<i32>,
  pub success: bool,
  pub stdout: String,
  pub stderr: String,
}

impl CapturedOutput {
  /// Turns a non-zero exit into an [`ExecutionError::Failed`].
  pub fn check(&self, program: &str) -> Result<(), ExecutionError> {
    if self.success {
      return Ok(());
    }

    Err(ExecutionError::Failed {
      program: program.to_string(),
      code: self.code,
      stderr: self.stderr.clone(),
    })
  }
}

/// Runs a client invocation once and waits for it.
pub trait Executor {
  fn execute(
    &self,
    spec: &CommandSpec,
  ) -> impl Future<Output = Result<CapturedOutput, ExecutionError>> + Send;
}

/// Spawns the client as a child process.
#[derive(Debug, Clone, Copy, Default)]
pub struct ProcessExecutor;

impl Executor for ProcessExecutor {
  async fn execute(&self, spec: &CommandSpec) -> Result<CapturedOutput, ExecutionError> {
    let mut cmd = Command::new(&spec.program);
    cmd
      .args(&spec.args)
      .stdin(Stdio::null())
      .stdout(Stdio::piped())
      .stderr(Stdio::piped())
      .kill_on_drop(true);

    tracing::debug!(cmd = ?cmd, "Spawning provisioning client");
    let output = cmd.output().await.map_err(|source| ExecutionError::Spawn {
      program: spec.program.clone(),
      source,
    })?;

    let captured = CapturedOutput {
      code: output.status.code(),
      success: output.status.success(),
      stdout: String::from_utf8_lossy(&output.stdout).into_owned(),
      stderr: String::from_utf8_lossy(&output.stderr).into_owned(),
    };

    if captured.success {
      tracing::info!("Provisioning client finished");
    } else {
      tracing::error!(code = ?captured.code, "Provisioning client failed");
    }

    Ok(captured)
  }
}
