//! The provider boundary.
//!
//! deferra never executes a function itself. It hands a flattened argument
//! map to a [`Provider`] and parses the flattened result map it returns.

use async_trait::async_trait;
use indexmap::IndexMap;
use tokio_util::sync::CancellationToken;

use crate::error::ProviderError;

/// An ordered, string-keyed map of wire values.
///
/// A missing key means "absent"; maps and lists stay structured.
pub type ValueMap = IndexMap<String, serde_json::Value>;

/// A single function call handed to the provider.
#[derive(Debug, Clone)]
pub struct InvokeRequest {
  /// Unique ID of this invocation, shared with the invoker's log events.
  pub invocation_id: String,
  /// Token identifying the provider operation.
  pub token: String,
  /// Materialized arguments in schema declaration order.
  pub args: ValueMap,
  /// Provider version to use, if pinned.
  pub version: Option<String>,
  /// The call is part of a preview and should not be treated as real.
  pub dry_run: bool,
  /// Cancellation is passed through; the provider decides how to honor it.
  pub cancel: CancellationToken,
}

/// The provider's reply.
#[derive(Debug, Clone, PartialEq)]
pub struct InvokeResponse {
  pub outputs: ValueMap,
  /// False when the outputs are placeholders (preview).
  pub known: bool,
  /// The provider declares the outputs sensitive.
  pub secret: bool,
}

impl InvokeResponse {
  /// A known, non-secret reply.
  pub fn new(outputs: ValueMap) -> Self {
    Self {
      outputs,
      known: true,
      secret: false,
    }
  }

  pub fn with_secret(mut self, secret: bool) -> Self {
    self.secret = secret;
    self
  }

  pub fn with_known(mut self, known: bool) -> Self {
    self.known = known;
    self
  }
}

/// Executes provider functions.
#[async_trait]
pub trait Provider: Send + Sync {
  /// Invoke the operation named by `request.token`.
  async fn invoke(&self, request: InvokeRequest) -> Result<InvokeResponse, ProviderError>;
}
