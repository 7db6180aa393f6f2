use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::property::PropertyDef;

/// The shape of an argument or result record.
///
/// Property order is preserved; it becomes the order of the flattened
/// argument map handed to the provider.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ObjectTypeDef {
  #[serde(default)]
  pub properties: IndexMap<String, PropertyDef>,

  /// Names of properties that must carry a value.
  #[serde(default, skip_serializing_if = "Vec::is_empty")]
  pub required: Vec<String>,
}

/// A read-only provider function.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FunctionDef {
  #[serde(skip_serializing_if = "Option::is_none")]
  pub description: Option<String>,

  #[serde(default)]
  pub inputs: ObjectTypeDef,

  #[serde(default)]
  pub outputs: ObjectTypeDef,

  /// Results of this function are always treated as secret.
  #[serde(default, skip_serializing_if = "std::ops::Not::not")]
  pub secret: bool,
}
