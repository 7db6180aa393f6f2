//! Invocation error types.

/// Errors that can occur while invoking a provider function.
#[derive(Debug, thiserror::Error)]
pub enum InvokeError {
  /// A required argument has neither a default nor a supplied value.
  #[error("function '{token}' is missing required argument '{field}'")]
  MissingRequiredArgument { token: String, field: String },

  /// The caller supplied an argument the function does not declare.
  #[error("function '{token}' has no argument named '{field}'")]
  UnknownArgument { token: String, field: String },

  /// A supplied argument does not have the declared type.
  #[error("invalid argument '{field}' for function '{token}': {message}")]
  InvalidArgument {
    token: String,
    field: String,
    message: String,
  },

  /// The provider call itself failed.
  #[error("provider call for '{token}' failed: {source}")]
  Provider {
    token: String,
    #[source]
    source: ProviderError,
  },

  /// The provider returned a result that does not fit the result schema.
  #[error("malformed result from '{token}': {message}")]
  MalformedResult { token: String, message: String },

  /// The invocation was cancelled before the provider was called.
  #[error("invocation cancelled")]
  Cancelled,

  /// A typed argument could not be converted to a wire value.
  #[error("failed to encode argument: {message}")]
  Encoding { message: String },

  /// A caller-constructed deferred value failed.
  #[error("{message}")]
  Deferred { message: String },
}

/// Errors reported by a [`Provider`](crate::Provider).
#[derive(Debug, thiserror::Error)]
pub enum ProviderError {
  /// No operation is registered under the token.
  #[error("no handler registered for token '{token}'")]
  UnknownToken { token: String },

  /// The call failed (transport, validation, or the operation itself).
  #[error("{message}")]
  Call { message: String },

  /// The provider observed the request's cancellation token.
  #[error("provider call cancelled")]
  Cancelled,
}
