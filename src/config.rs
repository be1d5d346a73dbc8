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
//! Deployment settings: which client to run, which AMI to boot and how to tune Hadoop.
//!
//! Layered with `figment`, lowest precedence first:
//! 1. built-in defaults ([`Settings::default`]),
//! 2. a config file (`--config`/`EMR_LAUNCH_CONFIG`, else `./emr-launch.toml` if present),
//! 3. `EMR_LAUNCH_*` environment variables (e.g. `EMR_LAUNCH_CLIENT=/opt/emr/elastic-mapreduce`).
use crate::bootstrap::HadoopProperty;
use crate::error::ConfigError;
use figment::Figment;
use figment::providers::Env;
use figment::providers::Format;
use figment::providers::Json;
use figment::providers::Serialized;
use figment::providers::Toml;
use serde::Deserialize;
use serde::Deserializer;
use serde::Serialize;
use serde::de;
use std::fmt;
use std::path::Path;

pub const ENV_PREFIX: &str = "EMR_LAUNCH_";
pub const CONFIG_ENV: &str = "EMR_LAUNCH_CONFIG";
pub const DEFAULT_CONFIG_FILE: &str = "emr-launch.toml";

pub const DEFAULT_CLIENT: &str = "elastic-mapreduce";
pub const DEFAULT_AMI_VERSION: &str = "latest";
pub const DEFAULT_HADOOP_CONFIG_SCRIPT: &str = "s3://elasticmapreduce/bootstrap-actions/configure-hadoop";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
  /// Program name or path of the provisioning client.
  #[serde(deserialize_with = "scalar_string")]
  pub client: String,

  #[serde(deserialize_with = "scalar_string")]
  pub ami_version: String,

  /// Script URI that marks an action as the Hadoop configuration action.
  #[serde(deserialize_with = "scalar_string")]
  pub hadoop_config_script: String,

  pub enable_debugging: bool,

  /// Extra properties appended after the computed task properties, in order.
  pub tuning: Vec<HadoopProperty>,
}

impl Default for Settings {
  fn default() -> Self {
    Self {
      client: DEFAULT_CLIENT.to_string(),
      ami_version: DEFAULT_AMI_VERSION.to_string(),
      hadoop_config_script: DEFAULT_HADOOP_CONFIG_SCRIPT.to_string(),
      enable_debugging: true,
      tuning: Vec::new(),
    }
  }
}

impl Settings {
  pub fn load(config_path: Option<&Path>) -> Result<Self, ConfigError> {
    let settings: Settings = Self::figment(config_path)?.extract().map_err(Box::new)?;

    tracing::debug!(
      client = %settings.client,
      ami_version = %settings.ami_version,
      tuning = settings.tuning.len(),
      "Settings loaded"
    );
    Ok(settings)
  }

  pub fn figment(config_path: Option<&Path>) -> Result<Figment, ConfigError> {
    let figment = Figment::from(Serialized::defaults(Settings::default()));

    let figment = match config_path {
      Some(path) if !path.exists() => return Err(ConfigError::FileNotFound(path.to_path_buf())),
      Some(path) => merge_file(figment, path),
      None if Path::new(DEFAULT_CONFIG_FILE).exists() => {
        merge_file(figment, Path::new(DEFAULT_CONFIG_FILE))
      }
      None => figment,
    };

    Ok(figment.merge(Env::prefixed(ENV_PREFIX).ignore(&["config", "log_file"])))
  }
}

/// Accepts any scalar as text. `Env` hands values like `2.4` or `false` over
/// already typed, which a plain `String` field would reject.
fn scalar_string<'de, D>(deserializer: D) -> Result<String, D::Error>
where
  D: Deserializer<'de>,
{
  struct ScalarString;

  impl de::Visitor<'_> for ScalarString {
    type Value = String;

    fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
      f.write_str("a string, number or boolean")
    }

    fn visit_str<E: de::Error>(self, v: &str) -> Result<String, E> {
      Ok(v.to_string())
    }

    fn visit_string<E: de::Error>(self, v: String) -> Result<String, E> {
      Ok(v)
    }

    fn visit_bool<E: de::Error>(self, v: bool) -> Result<String, E> {
      Ok(v.to_string())
    }

    fn visit_i64<E: de::Error>(self, v: i64) -> Result<String, E> {
      Ok(v.to_string())
    }

    fn visit_u64<E: de::Error>(self, v: u64) -> Result<String, E> {
      Ok(v.to_string())
    }

    fn visit_i128<E: de::Error>(self, v: i128) -> Result<String, E> {
      Ok(v.to_string())
    }

    fn visit_u128<E: de::Error>(self, v: u128) -> Result<String, E> {
      Ok(v.to_string())
    }

    fn visit_f64<E: de::Error>(self, v: f64) -> Result<String, E> {
      Ok(v.to_string())
    }

    fn visit_char<E: de::Error>(self, v: char) -> Result<String, E> {
      Ok(v.to_string())
    }
  }

  deserializer.deserialize_any(ScalarString)
}

fn merge_file(figment: Figment, path: &Path) -> Figment {
  tracing::info!("Reading settings from {}", path.display());

  match path.extension().and_then(|ext| ext.to_str()) {
    Some("json") => figment.merge(Json::file(path)),
    _ => figment.merge(Toml::file(path)),
  }
}
