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
//! The option validation pass.
//!
//! Each check looks at one concern, records its parsed value or appends one
//! error, and hands the accumulator on. [`validate`] folds all of them over the
//! same [`Validation`] without stopping early, so a single run reports every
//! problem the user needs to fix.
use crate::defaults::ClusterType;
use crate::descriptor::Descriptor;
use crate::error::DescriptorError;
use crate::error::ValidationError;
use crate::error::ValidationReport;
use crate::options::ClusterOptions;
use crate::options::OptionsRecord;

/// A single check over the accumulating result.
pub type Check = fn(Validation) -> Validation;

/// Checks in reporting order.
pub const CHECKS: [Check; 6] = [
  check_size,
  check_type,
  check_task_overrides,
  check_pricing_exclusive,
  check_bid_price,
  check_descriptor,
];

/// The record under validation, the values parsed from it so far, and every
/// error appended along the way. Errors are never removed.
#[derive(Debug, Clone)]
pub struct Validation {
  record: OptionsRecord,
  size: Option<u32>,
  cluster_type: Option<ClusterType>,
  mappers: Option<u32>,
  reducers: Option<u32>,
  bid_price: Option<f64>,
  descriptor: Option<Descriptor>,
  errors: Vec<ValidationError>,
}

impl Validation {
  pub fn new(record: OptionsRecord) -> Self {
    Self {
      record,
      size: None,
      cluster_type: None,
      mappers: None,
      reducers: None,
      bid_price: None,
      descriptor: None,
      errors: Vec::new(),
    }
  }

  pub fn record(&self) -> &OptionsRecord {
    &self.record
  }

  pub fn errors(&self) -> &[ValidationError] {
    &self.errors
  }

  fn fail(mut self, error: ValidationError) -> Self {
    self.errors.push(error);
    self
  }

  /// Promotes a clean validation to [`ClusterOptions`]; any error keeps it a report.
  pub fn finish(self) -> Result<ClusterOptions, ValidationReport> {
    if !self.errors.is_empty() {
      return Err(ValidationReport::new(self.errors));
    }

    let (Some(size), Some(cluster_type)) = (self.size, self.cluster_type) else {
      // Only reachable if a check was skipped.
      let mut errors = Vec::new();
      if self.size.is_none() {
        errors.push(ValidationError::InvalidSize);
      }
      if self.cluster_type.is_none() {
        errors.push(ValidationError::InvalidType);
      }
      return Err(ValidationReport::new(errors));
    };

    let OptionsRecord {
      name,
      zone,
      on_demand,
      ..
    } = self.record;

    Ok(ClusterOptions {
      name,
      cluster_type,
      size,
      zone,
      mappers: self.mappers,
      reducers: self.reducers,
      bid_price: self.bid_price,
      on_demand,
      descriptor: self.descriptor,
    })
  }
}

/// Runs every check and returns either provisionable options or the full report.
pub fn validate(record: OptionsRecord) -> Result<ClusterOptions, ValidationReport> {
  let validation = CHECKS
    .iter()
    .fold(Validation::new(record), |acc, check| check(acc));

  if !validation.errors.is_empty() {
    tracing::debug!(errors = ?validation.errors, "Validation failed");
  }

  validation.finish()
}

fn parse_trimmed<T: std::str::FromStr>(raw: &str) -> Option<T> {
  raw.trim().parse().ok()
}

pub fn check_size(mut v: Validation) -> Validation {
  match v.record.size.as_deref().and_then(parse_trimmed::<u32>) {
    Some(size) if size > 0 => {
      v.size = Some(size);
      v
    }
    _ => v.fail(ValidationError::InvalidSize),
  }
}

pub fn check_type(mut v: Validation) -> Validation {
  match v
    .record
    .cluster_type
    .as_deref()
    .and_then(|raw| raw.trim().parse::<ClusterType>().ok())
  {
    Some(cluster_type) => {
      v.cluster_type = Some(cluster_type);
      v
    }
    None => v.fail(ValidationError::InvalidType),
  }
}

/// Mapper/reducer overrides must be numbers, and only reach Hadoop through
/// the configuration bootstrap action, so they need a descriptor.
pub fn check_task_overrides(mut v: Validation) -> Validation {
  let overrides_given = v.record.mappers.is_some() || v.record.reducers.is_some();

  if let Some(raw) = v.record.mappers.clone() {
    match parse_trimmed::<u32>(&raw) {
      Some(mappers) => v.mappers = Some(mappers),
      None => v = v.fail(ValidationError::InvalidMappers),
    }
  }

  if let Some(raw) = v.record.reducers.clone() {
    match parse_trimmed::<u32>(&raw) {
      Some(reducers) => v.reducers = Some(reducers),
      None => v = v.fail(ValidationError::InvalidReducers),
    }
  }

  if overrides_given && v.record.bootstrap.is_none() {
    v = v.fail(ValidationError::MissingBootstrapForOverrides);
  }

  v
}

pub fn check_pricing_exclusive(v: Validation) -> Validation {
  if v.record.bid_price.is_some() && v.record.on_demand {
    v.fail(ValidationError::ConflictingPricing)
  } else {
    v
  }
}

pub fn check_bid_price(mut v: Validation) -> Validation {
  let Some(raw) = v.record.bid_price.as_deref() else {
    return v;
  };

  match parse_trimmed::<f64>(raw) {
    Some(price) if price.is_finite() && price > 0.0 => {
      v.bid_price = Some(price);
      v
    }
    _ => v.fail(ValidationError::InvalidBidPrice),
  }
}

/// Reads the descriptor once, here, so later stages never touch the file.
pub fn check_descriptor(mut v: Validation) -> Validation {
  let Some(path) = v.record.bootstrap.clone() else {
    return v;
  };

  if path.as_os_str().is_empty() {
    return v.fail(ValidationError::MissingDescriptorFile { path });
  }

  match Descriptor::load(&path) {
    Ok(descriptor) => {
      v.descriptor = Some(descriptor);
      v
    }
    Err(DescriptorError::Read { path, .. } | DescriptorError::Empty { path }) => {
      v.fail(ValidationError::MissingDescriptorFile { path })
    }
    Err(e) => v.fail(ValidationError::UnparsableDescriptor {
      message: e.to_string(),
    }),
  }
}
