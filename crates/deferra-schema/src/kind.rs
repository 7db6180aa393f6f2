use std::fmt;

use deferra_config::{PropertyDef, PropertyType};
use serde::{Deserialize, Serialize};

/// The JSON shape a field value must have.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "of", rename_all = "snake_case")]
pub enum ValueKind {
  Any,
  String,
  Number,
  Integer,
  Boolean,
  /// A list whose elements all have the inner kind.
  Array(Box<ValueKind>),
  /// A string-keyed map whose values all have the inner kind.
  Map(Box<ValueKind>),
  /// An object without a declared value type.
  Object,
}

impl ValueKind {
  /// Resolve the kind of a declared property.
  ///
  /// Properties without a declared type accept any value, as do arrays and
  /// maps whose element type is left open.
  pub fn of(property: &PropertyDef) -> Self {
    match property.property_type {
      None => ValueKind::Any,
      Some(PropertyType::String) => ValueKind::String,
      Some(PropertyType::Number) => ValueKind::Number,
      Some(PropertyType::Integer) => ValueKind::Integer,
      Some(PropertyType::Boolean) => ValueKind::Boolean,
      Some(PropertyType::Array) => ValueKind::Array(Box::new(
        property
          .items
          .as_deref()
          .map(ValueKind::of)
          .unwrap_or(ValueKind::Any),
      )),
      Some(PropertyType::Object) => match property.additional_properties.as_deref() {
        Some(values) => ValueKind::Map(Box::new(ValueKind::of(values))),
        None => ValueKind::Object,
      },
    }
  }

  /// Check whether a value has this shape, recursing into lists and maps.
  pub fn matches(&self, value: &serde_json::Value) -> bool {
    use serde_json::Value;

    match (self, value) {
      (ValueKind::Any, _) => true,
      (ValueKind::String, Value::String(_)) => true,
      (ValueKind::Number, Value::Number(_)) => true,
      (ValueKind::Integer, Value::Number(n)) => n.is_i64() || n.is_u64(),
      (ValueKind::Boolean, Value::Bool(_)) => true,
      (ValueKind::Array(inner), Value::Array(items)) => items.iter().all(|v| inner.matches(v)),
      (ValueKind::Map(inner), Value::Object(map)) => map.values().all(|v| inner.matches(v)),
      (ValueKind::Object, Value::Object(_)) => true,
      _ => false,
    }
  }
}

impl fmt::Display for ValueKind {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    match self {
      ValueKind::Any => write!(f, "any"),
      ValueKind::String => write!(f, "string"),
      ValueKind::Number => write!(f, "number"),
      ValueKind::Integer => write!(f, "integer"),
      ValueKind::Boolean => write!(f, "boolean"),
      ValueKind::Array(inner) => write!(f, "array<{}>", inner),
      ValueKind::Map(inner) => write!(f, "map<{}>", inner),
      ValueKind::Object => write!(f, "object"),
    }
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use serde_json::json;

  fn property(json: serde_json::Value) -> PropertyDef {
    serde_json::from_value(json).unwrap()
  }

  #[test]
  fn test_kind_of_scalars() {
    assert_eq!(ValueKind::of(&property(json!({}))), ValueKind::Any);
    assert_eq!(
      ValueKind::of(&property(json!({ "type": "string" }))),
      ValueKind::String
    );
    assert_eq!(
      ValueKind::of(&property(json!({ "type": "integer" }))),
      ValueKind::Integer
    );
  }

  #[test]
  fn test_kind_of_collections() {
    let map = property(json!({ "type": "object", "additionalProperties": { "type": "string" } }));
    assert_eq!(ValueKind::of(&map), ValueKind::Map(Box::new(ValueKind::String)));

    let list = property(json!({ "type": "array", "items": { "type": "number" } }));
    assert_eq!(
      ValueKind::of(&list),
      ValueKind::Array(Box::new(ValueKind::Number))
    );

    let open = property(json!({ "type": "array" }));
    assert_eq!(ValueKind::of(&open), ValueKind::Array(Box::new(ValueKind::Any)));
  }

  #[test]
  fn test_matches() {
    assert!(ValueKind::String.matches(&json!("x")));
    assert!(!ValueKind::String.matches(&json!(1)));
    assert!(ValueKind::Integer.matches(&json!(42)));
    assert!(!ValueKind::Integer.matches(&json!(4.2)));
    assert!(ValueKind::Number.matches(&json!(4.2)));
    assert!(ValueKind::Boolean.matches(&json!(false)));
    assert!(ValueKind::Object.matches(&json!({ "k": 1 })));
    assert!(ValueKind::Any.matches(&json!(null)));
  }

  #[test]
  fn test_matches_nested() {
    let map = ValueKind::Map(Box::new(ValueKind::String));
    assert!(map.matches(&json!({ "K1": "my-k1", "K2": "my-k2" })));
    assert!(!map.matches(&json!({ "K1": 1 })));

    let list = ValueKind::Array(Box::new(ValueKind::String));
    assert!(list.matches(&json!(["e1", "e2"])));
    assert!(list.matches(&json!([])));
    assert!(!list.matches(&json!(["e1", 2])));
  }

  #[test]
  fn test_display() {
    assert_eq!(
      ValueKind::Map(Box::new(ValueKind::String)).to_string(),
      "map<string>"
    );
  }
}
