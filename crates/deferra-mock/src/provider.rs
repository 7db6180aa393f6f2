use std::collections::HashMap;
use std::sync::{Arc, Mutex, PoisonError};

use async_trait::async_trait;
use deferra_runtime::{InvokeRequest, InvokeResponse, Provider, ProviderError, ValueMap};
use tracing::debug;

/// A handler answering calls for a single token.
pub type Handler = Arc<dyn Fn(&ValueMap) -> Result<InvokeResponse, ProviderError> + Send + Sync>;

/// A call observed by a [`MockProvider`].
#[derive(Debug, Clone, PartialEq)]
pub struct MockCall {
  pub token: String,
  pub args: ValueMap,
  pub version: Option<String>,
  pub dry_run: bool,
}

/// Provider answering calls from in-memory handlers.
///
/// Handlers are matched by exact token. Every call is recorded, including
/// calls for unregistered tokens, so tests can assert on what reached the
/// provider. During a dry run responses are reported as not known.
#[derive(Clone, Default)]
pub struct MockProvider {
  handlers: HashMap<String, Handler>,
  calls: Arc<Mutex<Vec<MockCall>>>,
}

impl MockProvider {
  pub fn new() -> Self {
    Self::default()
  }

  /// Register `handler` for `token`, replacing any previous one.
  pub fn with_handler<F>(mut self, token: impl Into<String>, handler: F) -> Self
  where
    F: Fn(&ValueMap) -> Result<InvokeResponse, ProviderError> + Send + Sync + 'static,
  {
    self.handlers.insert(token.into(), Arc::new(handler));
    self
  }

  pub fn has_handler(&self, token: &str) -> bool {
    self.handlers.contains_key(token)
  }

  /// Calls received so far, oldest first.
  pub fn calls(&self) -> Vec<MockCall> {
    self.lock_calls().clone()
  }

  pub fn call_count(&self) -> usize {
    self.lock_calls().len()
  }

  fn lock_calls(&self) -> std::sync::MutexGuard<'_, Vec<MockCall>> {
    // A panicking handler must not hide the calls recorded before it.
    self.calls.lock().unwrap_or_else(PoisonError::into_inner)
  }
}

#[async_trait]
impl Provider for MockProvider {
  async fn invoke(&self, request: InvokeRequest) -> Result<InvokeResponse, ProviderError> {
    debug!(
      invocation_id = %request.invocation_id,
      token = %request.token,
      "mock_call"
    );

    self.lock_calls().push(MockCall {
      token: request.token.clone(),
      args: request.args.clone(),
      version: request.version.clone(),
      dry_run: request.dry_run,
    });

    if request.cancel.is_cancelled() {
      return Err(ProviderError::Cancelled);
    }

    let handler = self
      .handlers
      .get(&request.token)
      .ok_or_else(|| ProviderError::UnknownToken {
        token: request.token.clone(),
      })?;

    let response = handler(&request.args)?;
    if request.dry_run {
      return Ok(response.with_known(false));
    }
    Ok(response)
  }
}
