//! "A value, or nothing."
//!
//! A [`Boxed<T>`] is what an optional argument looks like once its deferred
//! value has resolved. Only [`Boxed::Present`] may overwrite a field; an
//! [`Boxed::Absent`] leaves whatever the field already holds (its declared
//! default) untouched.

use crate::deferred::Deferred;
use crate::input::Input;

#[derive(Debug, Clone, PartialEq)]
pub enum Boxed<T> {
  Present(T),
  Absent,
}

impl<T> Boxed<T> {
  pub fn is_present(&self) -> bool {
    matches!(self, Boxed::Present(_))
  }

  pub fn into_option(self) -> Option<T> {
    match self {
      Boxed::Present(value) => Some(value),
      Boxed::Absent => None,
    }
  }

  /// Overwrite `slot` if a value is present. Returns whether it was written.
  pub fn set(self, slot: &mut T) -> bool {
    match self {
      Boxed::Present(value) => {
        *slot = value;
        true
      }
      Boxed::Absent => false,
    }
  }

  /// Overwrite an optional `slot` if a value is present.
  pub fn set_option(self, slot: &mut Option<T>) -> bool {
    match self {
      Boxed::Present(value) => {
        *slot = Some(value);
        true
      }
      Boxed::Absent => false,
    }
  }
}

impl<T: Send + 'static> Boxed<T> {
  /// Box an optional input: unset is immediately [`Boxed::Absent`].
  pub fn from_optional(input: Option<Input<T>>) -> Deferred<Boxed<T>> {
    match input {
      Some(input) => input.boxed(),
      None => Deferred::new(Boxed::Absent),
    }
  }
}

impl Boxed<serde_json::Value> {
  /// A resolved JSON `null` carries no value and must not clobber a default.
  pub fn skip_null(self) -> Self {
    match self {
      Boxed::Present(serde_json::Value::Null) => Boxed::Absent,
      other => other,
    }
  }
}

impl<T> From<Option<T>> for Boxed<T> {
  fn from(value: Option<T>) -> Self {
    match value {
      Some(value) => Boxed::Present(value),
      None => Boxed::Absent,
    }
  }
}
