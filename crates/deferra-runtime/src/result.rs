//! Parsed function results.

use deferra_schema::FunctionSchema;
use indexmap::IndexMap;
use serde::de::DeserializeOwned;
use tracing::debug;

use crate::error::InvokeError;
use crate::provider::ValueMap;

/// The result of one function call, shaped by the function's output schema.
///
/// Built once from the provider's reply and never modified. Nullable fields
/// the provider left out (or set to `null`) hold no value.
#[derive(Debug, Clone, PartialEq)]
pub struct ResultRecord {
  token: String,
  fields: IndexMap<String, Option<serde_json::Value>>,
}

impl ResultRecord {
  /// Parse a provider result map against the function's output schema.
  pub fn parse(function: &FunctionSchema, outputs: &ValueMap) -> Result<Self, InvokeError> {
    let malformed = |message: String| InvokeError::MalformedResult {
      token: function.token.clone(),
      message,
    };

    let mut fields = IndexMap::with_capacity(function.outputs.len());

    for spec in &function.outputs {
      let value = match outputs.get(&spec.name) {
        None | Some(serde_json::Value::Null) => None,
        Some(value) => Some(value),
      };

      match value {
        None if spec.required => {
          return Err(malformed(format!(
            "missing non-nullable field '{}'",
            spec.name
          )));
        }
        Some(value) if !spec.kind.matches(value) => {
          return Err(malformed(format!(
            "field '{}' expected {}, got {}",
            spec.name, spec.kind, value
          )));
        }
        _ => {}
      }

      fields.insert(spec.name.clone(), value.cloned());
    }

    for name in outputs.keys().filter(|name| function.output(name).is_none()) {
      debug!(token = %function.token, field = %name, "ignoring undeclared result field");
    }

    Ok(Self {
      token: function.token.clone(),
      fields,
    })
  }

  /// Token of the function that produced this record.
  pub fn token(&self) -> &str {
    &self.token
  }

  pub fn get(&self, name: &str) -> Option<&serde_json::Value> {
    self.fields.get(name).and_then(Option::as_ref)
  }

  /// Get a string field.
  pub fn get_str(&self, name: &str) -> Option<&str> {
    self.get(name).and_then(serde_json::Value::as_str)
  }

  pub fn iter(&self) -> impl Iterator<Item = (&str, Option<&serde_json::Value>)> {
    self
      .fields
      .iter()
      .map(|(name, value)| (name.as_str(), value.as_ref()))
  }

  /// Flatten back into a result map, omitting fields without a value.
  pub fn to_value_map(&self) -> ValueMap {
    self
      .fields
      .iter()
      .filter_map(|(name, value)| value.clone().map(|v| (name.clone(), v)))
      .collect()
  }

  /// Deserialize the record into a typed result.
  pub fn deserialize<R: DeserializeOwned>(&self) -> Result<R, InvokeError> {
    let object: serde_json::Map<String, serde_json::Value> = self.to_value_map().into_iter().collect();

    serde_json::from_value(serde_json::Value::Object(object)).map_err(|e| {
      InvokeError::MalformedResult {
        token: self.token.clone(),
        message: e.to_string(),
      }
    })
  }
}
