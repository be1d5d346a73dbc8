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
//! Reads the bootstrap descriptor: an XML document whose `<bootstrap>` root
//! holds ordered `<action>` elements. Any other root is rejected.
//!
//! ```xml
//! <bootstrap>
//!   <action script="s3://my-bucket/install-deps.sh">
//!     <arg>--with-native</arg>
//!     <arg>lzo</arg>
//!   </action>
//!   <action script="s3://elasticmapreduce/bootstrap-actions/configure-hadoop"
//!           site-config-file="s3://my-bucket/site.xml"/>
//! </bootstrap>
//! ```
use crate::error::DescriptorError;
use roxmltree::Document;
use roxmltree::Node;
use std::fs;
use std::path::Path;
use std::path::PathBuf;

const ROOT_TAG: &str = "bootstrap";
const ACTION_TAG: &str = "action";
const SCRIPT_ATTR: &str = "script";
const SITE_CONFIG_ATTR: &str = "site-config-file";
const CORE_CONFIG_ATTR: &str = "core-config-file";

/// One `<action>` element, as declared.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeclaredAction {
  pub script: String,
  pub config_file: Option<String>,
  pub args: Vec<String>,
}

/// The parsed descriptor. Actions keep document order.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Descriptor {
  pub actions: Vec<DeclaredAction>,
}

impl Descriptor {
  /// Reads and parses a descriptor file in one go.
  pub fn load(path: &Path) -> Result<Self, DescriptorError> {
    let content = fs::read_to_string(path).map_err(|source| DescriptorError::Read {
      path: path.to_path_buf(),
      source,
    })?;

    if content.trim().is_empty() {
      return Err(DescriptorError::Empty {
        path: PathBuf::from(path),
      });
    }

    Self::parse(&content)
  }

  pub fn parse(xml: &str) -> Result<Self, DescriptorError> {
    let doc = Document::parse(xml)?;
    let root = doc.root_element();

    if !root.has_tag_name(ROOT_TAG) {
      return Err(DescriptorError::UnexpectedRoot {
        found: root.tag_name().name().to_string(),
      });
    }

    let actions = root
      .children()
      .filter(|node| node.is_element() && node.has_tag_name(ACTION_TAG))
      .enumerate()
      .map(|(index, node)| parse_action(index + 1, node))
      .collect::<Result<Vec<_>, _>>()?;

    tracing::debug!(count = actions.len(), "Parsed bootstrap descriptor");
    Ok(Descriptor { actions })
  }

  pub fn is_empty(&self) -> bool {
    self.actions.is_empty()
  }
}

fn parse_action(index: usize, node: Node<'_, '_>) -> Result<DeclaredAction, DescriptorError> {
  let script = node
    .attribute(SCRIPT_ATTR)
    .ok_or(DescriptorError::MissingScript { index })?
    .trim();

  if script.is_empty() {
    return Err(DescriptorError::EmptyScript { index });
  }

  // Older descriptors name it site-config-file, newer ones core-config-file.
  let config_file = node
    .attribute(SITE_CONFIG_ATTR)
    .or_else(|| node.attribute(CORE_CONFIG_ATTR))
    .map(str::trim)
    .filter(|file| !file.is_empty())
    .map(String::from);

  let args = node
    .children()
    .filter(Node::is_element)
    .map(element_text)
    .filter(|arg| !arg.is_empty())
    .collect();

  Ok(DeclaredAction {
    script: script.to_string(),
    config_file,
    args,
  })
}

/// Concatenated text of an element and all of its descendants.
fn element_text(node: Node<'_, '_>) -> String {
  node
    .descendants()
    .filter(Node::is_text)
    .filter_map(|text| text.text())
    .collect::<String>()
    .trim()
    .to_string()
}
