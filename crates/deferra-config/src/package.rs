use std::path::Path;

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::error::ConfigError;
use crate::function::FunctionDef;

/// A provider package schema as written on disk.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PackageDef {
  pub name: String,

  /// Provider version sent with every invocation unless overridden.
  #[serde(skip_serializing_if = "Option::is_none")]
  pub version: Option<String>,

  /// Functions keyed by token, e.g. `"madeup-package:codegentest:funcWithDefaultValue"`.
  #[serde(default)]
  pub functions: IndexMap<String, FunctionDef>,
}

impl PackageDef {
  /// Parse a package schema from a JSON string.
  pub fn from_json(content: &str) -> Result<Self, ConfigError> {
    Ok(serde_json::from_str(content)?)
  }

  /// Read and parse a package schema file.
  pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
    let path = path.as_ref();
    let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
      path: path.to_path_buf(),
      source,
    })?;
    Self::from_json(&content)
  }
}
