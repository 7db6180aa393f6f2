use deferra_config::PackageDef;
use indexmap::IndexMap;

use crate::error::SchemaError;
use crate::function::FunctionSchema;

/// A validated provider package.
#[derive(Debug, Clone)]
pub struct PackageSchema {
  pub name: String,
  pub version: Option<String>,
  pub functions: IndexMap<String, FunctionSchema>,
}

impl PackageSchema {
  /// Validate every function of a package definition.
  pub fn from_def(def: PackageDef) -> Result<Self, SchemaError> {
    let functions = def
      .functions
      .iter()
      .map(|(token, function)| Ok((token.clone(), FunctionSchema::from_def(token, function)?)))
      .collect::<Result<IndexMap<_, _>, SchemaError>>()?;

    Ok(Self {
      name: def.name,
      version: def.version,
      functions,
    })
  }

  /// Get a function by token.
  pub fn function(&self, token: &str) -> Result<&FunctionSchema, SchemaError> {
    self
      .functions
      .get(token)
      .ok_or_else(|| SchemaError::FunctionNotFound(token.to_string()))
  }
}
