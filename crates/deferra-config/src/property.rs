use serde::{Deserialize, Serialize};

/// JSON type of a declared property.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PropertyType {
  String,
  Number,
  Integer,
  Boolean,
  Array,
  Object,
}

/// A single property of a function's input or output object.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PropertyDef {
  /// Declared JSON type. Properties without a type accept any value.
  #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
  pub property_type: Option<PropertyType>,

  /// Value used when the caller omits the property.
  #[serde(skip_serializing_if = "Option::is_none")]
  pub default: Option<serde_json::Value>,

  #[serde(skip_serializing_if = "Option::is_none")]
  pub description: Option<String>,

  /// Element type for `array` properties.
  #[serde(skip_serializing_if = "Option::is_none")]
  pub items: Option<Box<PropertyDef>>,

  /// Value type for `object` properties used as string-keyed maps.
  #[serde(skip_serializing_if = "Option::is_none")]
  pub additional_properties: Option<Box<PropertyDef>>,
}
