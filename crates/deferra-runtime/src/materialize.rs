//! Argument materialization.
//!
//! Turns supplied inputs plus a function's default table into the concrete
//! argument record handed to the provider.
//!
//! # Flow
//! 1. Boxing: every supplied [`Input`](crate::Input) becomes a
//!    `Deferred<Boxed<Value>>`; unsupplied fields never enter the join
//! 2. Combination: [`Deferred::combine_all`] waits for every field
//! 3. Materialization: start from the declared defaults, overwrite only the
//!    fields whose boxed value is present, then check required fields

use deferra_schema::{DefaultTable, FunctionSchema};
use indexmap::IndexMap;

use crate::boxed::Boxed;
use crate::deferred::Deferred;
use crate::error::InvokeError;
use crate::input::FieldInputs;
use crate::provider::ValueMap;

/// The materialized arguments of one invocation attempt.
///
/// Fields appear in schema declaration order. `None` means the field carries
/// no value and is left out of the flattened map.
#[derive(Debug, Clone, PartialEq)]
pub struct ArgsRecord {
  fields: IndexMap<String, Option<serde_json::Value>>,
}

impl ArgsRecord {
  /// Start a record from a default table.
  pub fn from_defaults(defaults: DefaultTable) -> Self {
    Self { fields: defaults }
  }

  /// Get the value of a field, if it has one.
  pub fn get(&self, name: &str) -> Option<&serde_json::Value> {
    self.fields.get(name).and_then(Option::as_ref)
  }

  /// Names of all declared fields, in order.
  pub fn names(&self) -> impl Iterator<Item = &str> {
    self.fields.keys().map(String::as_str)
  }

  /// Flatten into the provider's argument map, omitting absent fields.
  pub fn flatten(&self) -> ValueMap {
    self
      .fields
      .iter()
      .filter_map(|(name, value)| value.clone().map(|v| (name.clone(), v)))
      .collect()
  }

  fn apply(&mut self, name: &str, boxed: Boxed<serde_json::Value>) {
    if let Some(slot) = self.fields.get_mut(name) {
      boxed.set_option(slot);
    }
  }
}

/// Box every supplied field and wait for all of them.
///
/// Resolved JSON `null`s are boxed as absent so they cannot clear a default.
pub fn box_fields(fields: FieldInputs) -> Deferred<Vec<(String, Boxed<serde_json::Value>)>> {
  Deferred::combine_all(
    fields
      .into_iter()
      .map(|(name, input)| input.boxed().map(move |boxed| (name, boxed.skip_null()))),
  )
}

/// Build the argument record for `function` from resolved boxed fields.
///
/// Pure: the result depends only on the schema and the boxed values.
pub fn materialize(
  function: &FunctionSchema,
  boxed_fields: Vec<(String, Boxed<serde_json::Value>)>,
) -> Result<ArgsRecord, InvokeError> {
  let mut record = ArgsRecord::from_defaults(function.defaults());

  for (name, boxed) in boxed_fields {
    let spec = function
      .input(&name)
      .ok_or_else(|| InvokeError::UnknownArgument {
        token: function.token.clone(),
        field: name.clone(),
      })?;

    if let Boxed::Present(value) = &boxed
      && !spec.kind.matches(value)
    {
      return Err(InvokeError::InvalidArgument {
        token: function.token.clone(),
        field: name,
        message: format!("expected {}, got {}", spec.kind, value),
      });
    }

    record.apply(&name, boxed);
  }

  if let Some(missing) = function
    .inputs
    .iter()
    .find(|spec| spec.required && record.get(&spec.name).is_none())
  {
    return Err(InvokeError::MissingRequiredArgument {
      token: function.token.clone(),
      field: missing.name.clone(),
    });
  }

  Ok(record)
}

/// Box, combine and materialize without calling a provider.
pub fn collect_args(function: FunctionSchema, fields: FieldInputs) -> Deferred<ArgsRecord> {
  box_fields(fields).try_map(move |boxed| materialize(&function, boxed))
}
