use serde::{Deserialize, Serialize};

use crate::kind::ValueKind;

/// A declared field of an argument or result record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FieldSpec {
  pub name: String,
  pub kind: ValueKind,
  /// For inputs: the field must carry a value after defaults are applied.
  /// For outputs: the field is non-nullable.
  pub required: bool,
  /// Value the field holds when the caller omits it.
  pub default: Option<serde_json::Value>,
}

impl FieldSpec {
  /// An optional field without a default.
  pub fn optional(name: impl Into<String>, kind: ValueKind) -> Self {
    Self {
      name: name.into(),
      kind,
      required: false,
      default: None,
    }
  }

  /// A required field without a default.
  pub fn required(name: impl Into<String>, kind: ValueKind) -> Self {
    Self {
      required: true,
      ..Self::optional(name, kind)
    }
  }

  pub fn with_default(mut self, default: impl Into<serde_json::Value>) -> Self {
    self.default = Some(default.into());
    self
  }
}
