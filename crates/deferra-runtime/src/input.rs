//! Argument inputs.
//!
//! An [`Input<T>`] is either a literal `T` or a [`Deferred<T>`]; both
//! normalize to a deferred value without loss. An argument the caller did not
//! supply has no `Input` at all: it is simply missing from [`FieldInputs`].

use indexmap::IndexMap;
use serde::Serialize;

use crate::boxed::Boxed;
use crate::deferred::Deferred;
use crate::error::InvokeError;
use crate::provider::ValueMap;

/// Supplied arguments keyed by schema field name.
pub type FieldInputs = IndexMap<String, Input<serde_json::Value>>;

#[derive(Debug)]
pub enum Input<T> {
  Value(T),
  Deferred(Deferred<T>),
}

impl<T: Send + 'static> Input<T> {
  /// Normalize to a deferred value. Literals are immediately known.
  pub fn into_deferred(self) -> Deferred<T> {
    match self {
      Input::Value(value) => Deferred::new(value),
      Input::Deferred(deferred) => deferred,
    }
  }

  /// Box the value for materialization once it resolves.
  pub fn boxed(self) -> Deferred<Boxed<T>> {
    match self {
      Input::Value(value) => Deferred::new(Boxed::Present(value)),
      Input::Deferred(deferred) => deferred.map(Boxed::Present),
    }
  }

  /// Transform the value without resolving it.
  pub fn map<U, F>(self, f: F) -> Input<U>
  where
    U: Send + 'static,
    F: FnOnce(T) -> U + Send + 'static,
  {
    match self {
      Input::Value(value) => Input::Value(f(value)),
      Input::Deferred(deferred) => Input::Deferred(deferred.map(f)),
    }
  }

  pub fn is_literal(&self) -> bool {
    matches!(self, Input::Value(_))
  }
}

impl<T: Serialize + Send + 'static> Input<T> {
  /// Convert a typed input into a wire value input.
  pub fn into_wire(self) -> Input<serde_json::Value> {
    match self {
      Input::Value(value) => match serde_json::to_value(&value) {
        Ok(value) => Input::Value(value),
        Err(e) => Input::Deferred(Deferred::failed(encoding_error(e))),
      },
      Input::Deferred(deferred) => {
        Input::Deferred(deferred.try_map(|value| serde_json::to_value(&value).map_err(encoding_error)))
      }
    }
  }

  /// Combine a list of inputs into one list-valued input.
  ///
  /// Element order is kept. The result is secret if any element is, and known
  /// only if every element is.
  pub fn from_list(items: Vec<Input<T>>) -> Input<serde_json::Value> {
    let elements = items
      .into_iter()
      .map(|item| item.into_wire().into_deferred());

    Input::Deferred(Deferred::combine_all(elements).map(serde_json::Value::Array))
  }

  /// Combine a map of inputs into one map-valued input.
  ///
  /// Flags combine as in [`from_list`](Self::from_list).
  pub fn from_map(entries: IndexMap<String, Input<T>>) -> Input<serde_json::Value> {
    let entries = entries.into_iter().map(|(key, item)| {
      item
        .into_wire()
        .into_deferred()
        .map(move |value| (key, value))
    });

    Input::Deferred(
      Deferred::combine_all(entries)
        .map(|entries| serde_json::Value::Object(entries.into_iter().collect())),
    )
  }
}

fn encoding_error(e: serde_json::Error) -> InvokeError {
  InvokeError::Encoding {
    message: e.to_string(),
  }
}

impl<T> From<T> for Input<T> {
  fn from(value: T) -> Self {
    Input::Value(value)
  }
}

impl<T> From<Deferred<T>> for Input<T> {
  fn from(deferred: Deferred<T>) -> Self {
    Input::Deferred(deferred)
  }
}

impl From<&str> for Input<String> {
  fn from(value: &str) -> Self {
    Input::Value(value.to_string())
  }
}

/// Treat every entry of a plain value map as a literal argument.
pub fn literal_inputs(values: ValueMap) -> FieldInputs {
  values
    .into_iter()
    .map(|(name, value)| (name, Input::Value(value)))
    .collect()
}
