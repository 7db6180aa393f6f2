use deferra_config::{FunctionDef, ObjectTypeDef};
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::error::SchemaError;
use crate::field::FieldSpec;
use crate::kind::ValueKind;

/// Field name to declared default value, in declaration order.
///
/// Fields without a default map to `None`.
pub type DefaultTable = IndexMap<String, Option<serde_json::Value>>;

/// A validated provider function.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FunctionSchema {
  pub token: String,
  pub description: Option<String>,
  pub inputs: Vec<FieldSpec>,
  pub outputs: Vec<FieldSpec>,
  /// Results of this function are always treated as secret.
  pub secret: bool,
}

impl FunctionSchema {
  /// Create an empty function schema for a token.
  pub fn new(token: impl Into<String>) -> Self {
    Self {
      token: token.into(),
      description: None,
      inputs: Vec::new(),
      outputs: Vec::new(),
      secret: false,
    }
  }

  pub fn with_input(mut self, field: FieldSpec) -> Self {
    self.inputs.push(field);
    self
  }

  pub fn with_output(mut self, field: FieldSpec) -> Self {
    self.outputs.push(field);
    self
  }

  pub fn with_secret(mut self, secret: bool) -> Self {
    self.secret = secret;
    self
  }

  /// Validate a function definition from a package schema.
  pub fn from_def(token: &str, def: &FunctionDef) -> Result<Self, SchemaError> {
    validate_token(token)?;

    Ok(Self {
      token: token.to_string(),
      description: def.description.clone(),
      inputs: lock_fields(token, "input", &def.inputs)?,
      outputs: lock_fields(token, "output", &def.outputs)?,
      secret: def.secret,
    })
  }

  /// Get a declared input field by name.
  pub fn input(&self, name: &str) -> Option<&FieldSpec> {
    self.inputs.iter().find(|f| f.name == name)
  }

  /// Get a declared output field by name.
  pub fn output(&self, name: &str) -> Option<&FieldSpec> {
    self.outputs.iter().find(|f| f.name == name)
  }

  /// The default table for this function's arguments.
  pub fn defaults(&self) -> DefaultTable {
    self
      .inputs
      .iter()
      .map(|f| (f.name.clone(), f.default.clone()))
      .collect()
  }
}

/// Tokens look like `package:module:member`. The module segment may be empty.
fn validate_token(token: &str) -> Result<(), SchemaError> {
  let segments: Vec<&str> = token.split(':').collect();
  let valid = segments.len() >= 2
    && segments.first().is_some_and(|s| !s.is_empty())
    && segments.last().is_some_and(|s| !s.is_empty());

  if valid {
    Ok(())
  } else {
    Err(SchemaError::InvalidToken {
      token: token.to_string(),
    })
  }
}

fn lock_fields(
  token: &str,
  side: &'static str,
  object: &ObjectTypeDef,
) -> Result<Vec<FieldSpec>, SchemaError> {
  if let Some(field) = object
    .required
    .iter()
    .find(|name| !object.properties.contains_key(*name))
  {
    return Err(SchemaError::RequiredNotDeclared {
      token: token.to_string(),
      side,
      field: field.clone(),
    });
  }

  object
    .properties
    .iter()
    .map(|(name, property)| {
      let kind = ValueKind::of(property);

      if let Some(default) = &property.default
        && !kind.matches(default)
      {
        return Err(SchemaError::DefaultTypeMismatch {
          token: token.to_string(),
          field: name.clone(),
          expected: kind,
        });
      }

      Ok(FieldSpec {
        name: name.clone(),
        kind,
        required: object.required.contains(name),
        default: property.default.clone(),
      })
    })
    .collect()
}

#[cfg(test)]
mod tests {
  use super::*;
  use serde_json::json;

  fn def(json: serde_json::Value) -> FunctionDef {
    serde_json::from_value(json).unwrap()
  }

  #[test]
  fn test_from_def() {
    let schema = FunctionSchema::from_def(
      "madeup-package:codegentest:funcWithDefaultValue",
      &def(json!({
        "inputs": {
          "properties": {
            "a": { "type": "string" },
            "b": { "type": "string", "default": "b-default" }
          },
          "required": ["a"]
        },
        "outputs": {
          "properties": { "r": { "type": "string" } },
          "required": ["r"]
        }
      })),
    )
    .unwrap();

    assert_eq!(schema.inputs.len(), 2);
    assert!(schema.input("a").unwrap().required);
    assert!(!schema.input("b").unwrap().required);
    assert!(schema.output("r").unwrap().required);
    assert!(schema.input("c").is_none());
  }

  #[test]
  fn test_default_table() {
    let schema = FunctionSchema::new("p:index:f")
      .with_input(FieldSpec::required("a", ValueKind::String))
      .with_input(FieldSpec::optional("b", ValueKind::String).with_default("b-default"));

    let defaults = schema.defaults();
    let entries: Vec<_> = defaults.iter().collect();
    assert_eq!(
      entries,
      vec![
        (&"a".to_string(), &None),
        (&"b".to_string(), &Some(json!("b-default"))),
      ]
    );
  }

  #[test]
  fn test_required_must_be_declared() {
    let result = FunctionSchema::from_def(
      "p:index:f",
      &def(json!({ "inputs": { "properties": {}, "required": ["a"] } })),
    );
    assert!(matches!(
      result,
      Err(SchemaError::RequiredNotDeclared { side: "input", .. })
    ));
  }

  #[test]
  fn test_default_must_match_type() {
    let result = FunctionSchema::from_def(
      "p:index:f",
      &def(json!({ "inputs": { "properties": { "n": { "type": "integer", "default": "ten" } } } })),
    );
    assert!(matches!(
      result,
      Err(SchemaError::DefaultTypeMismatch { expected: ValueKind::Integer, .. })
    ));
  }

  #[test]
  fn test_token_validation() {
    assert!(validate_token("madeup-package:codegentest:funcWithDefaultValue").is_ok());
    assert!(validate_token("mypkg::funcWithDictParam").is_ok());
    assert!(validate_token("funcWithDictParam").is_err());
    assert!(validate_token(":index:f").is_err());
    assert!(validate_token("p:index:").is_err());
  }
}
