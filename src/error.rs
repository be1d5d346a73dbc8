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
use std::fmt;
use std::path::PathBuf;
use thiserror::Error;

/// Top-level error enum for the emr-launch library.
#[derive(Error, Debug)]
pub enum LaunchError {
  #[error("{0}")]
  Validation(ValidationReport),

  #[error("Configuration error")]
  Config(#[from] ConfigError),

  #[error("Bootstrap descriptor error")]
  Descriptor(#[from] DescriptorError),

  #[error("Cluster type resolution failed")]
  Resolve(#[from] ResolveError),

  #[error("Provisioning client failed")]
  Execution(#[from] ExecutionError),
}

impl From<ValidationReport> for LaunchError {
  fn from(report: ValidationReport) -> Self {
    LaunchError::Validation(report)
  }
}

/// A single failed option check (src/validate.rs).
///
/// Every variant carries a stable key (its variant name, see [`ValidationError::key`])
/// so callers can match on the kind without parsing the message.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ValidationError {
  #[error("--size must be a positive integer")]
  InvalidSize,

  #[error("--type must be one of: large, high-memory, cluster-compute")]
  InvalidType,

  #[error("--mappers must be a number")]
  InvalidMappers,

  #[error("--reducers must be a number")]
  InvalidReducers,

  #[error("--mappers/--reducers require a bootstrap descriptor (--bootstrap)")]
  MissingBootstrapForOverrides,

  #[error("--bid and --on-demand cannot be used together")]
  ConflictingPricing,

  #[error("--bid must be a positive number")]
  InvalidBidPrice,

  #[error("Bootstrap descriptor file is missing, empty or unreadable: {}", .path.display())]
  MissingDescriptorFile { path: PathBuf },

  #[error("Bootstrap descriptor could not be parsed: {message}")]
  UnparsableDescriptor { message: String },
}

impl ValidationError {
  /// Stable identifier for the kind of failure.
  pub fn key(&self) -> &'static str {
    match self {
      ValidationError::InvalidSize => "InvalidSize",
      ValidationError::InvalidType => "InvalidType",
      ValidationError::InvalidMappers => "InvalidMappers",
      ValidationError::InvalidReducers => "InvalidReducers",
      ValidationError::MissingBootstrapForOverrides => "MissingBootstrapForOverrides",
      ValidationError::ConflictingPricing => "ConflictingPricing",
      ValidationError::InvalidBidPrice => "InvalidBidPrice",
      ValidationError::MissingDescriptorFile { .. } => "MissingDescriptorFile",
      ValidationError::UnparsableDescriptor { .. } => "UnparsableDescriptor",
    }
  }
}

/// Every failure collected by one validation pass, in check order.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ValidationReport {
  errors: Vec<ValidationError>,
}

impl ValidationReport {
  pub fn new(errors: Vec<ValidationError>) -> Self {
    Self { errors }
  }

  pub fn errors(&self) -> &[ValidationError] {
    &self.errors
  }

  pub fn keys(&self) -> Vec<&'static str> {
    self.errors.iter().map(ValidationError::key).collect()
  }

  pub fn contains(&self, key: &str) -> bool {
    self.errors.iter().any(|e| e.key() == key)
  }

  pub fn is_empty(&self) -> bool {
    self.errors.is_empty()
  }
}

impl fmt::Display for ValidationReport {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    for (i, error) in self.errors.iter().enumerate() {
      if i > 0 {
        writeln!(f)?;
      }
      write!(f, "{}", error)?;
    }
    Ok(())
  }
}

/// Errors related to reading the bootstrap descriptor (src/descriptor.rs).
#[derive(Error, Debug)]
pub enum DescriptorError {
  #[error("Failed to read bootstrap descriptor: {}", .path.display())]
  Read {
    path: PathBuf,
    #[source]
    source: std::io::Error,
  },

  #[error("Bootstrap descriptor is empty: {}", .path.display())]
  Empty { path: PathBuf },

  #[error("{0}")]
  Xml(#[from] roxmltree::Error),

  #[error("Expected a <bootstrap> root element, found <{found}>")]
  UnexpectedRoot { found: String },

  #[error("<action> #{index} is missing its 'script' attribute")]
  MissingScript { index: usize },

  #[error("<action> #{index} has an empty 'script' attribute")]
  EmptyScript { index: usize },
}

/// Errors related to the cluster type lookup tables (src/defaults.rs).
#[derive(Error, Debug, PartialEq)]
pub enum ResolveError {
  #[error("Unknown cluster type '{0}'")]
  UnknownType(String),
}

/// Errors related to settings resolution (src/config.rs).
#[derive(Error, Debug)]
pub enum ConfigError {
  #[error("Config file not found: {}", .0.display())]
  FileNotFound(PathBuf),

  #[error("Failed to load settings: {0}")]
  Extract(#[from] Box<figment::Error>),
}

/// Errors related to invoking the provisioning client (src/execute.rs).
#[derive(Error, Debug)]
pub enum ExecutionError {
  #[error("Failed to spawn provisioning client '{program}'")]
  Spawn {
    program: String,
    #[source]
    source: std::io::Error,
  },

  #[error("Provisioning client '{program}' exited with status {code:?}\n--- STDERR ---\n{stderr}")]
  Failed {
    program: String,
    code: Option<i32>,
    stderr: String,
  },
}
