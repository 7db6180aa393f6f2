use thiserror::Error;

use crate::kind::ValueKind;

#[derive(Debug, Error)]
pub enum SchemaError {
  #[error("invalid function token: '{token}'")]
  InvalidToken { token: String },

  #[error("function '{token}' requires undeclared {side} field '{field}'")]
  RequiredNotDeclared {
    token: String,
    side: &'static str,
    field: String,
  },

  #[error("default for field '{field}' of function '{token}' is not a valid {expected}")]
  DefaultTypeMismatch {
    token: String,
    field: String,
    expected: ValueKind,
  },

  #[error("function not found: {0}")]
  FunctionNotFound(String),
}
