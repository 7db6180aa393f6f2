//! Function invocation.
//!
//! The [`Invoker`] is the main entry point. It owns a provider and its
//! configuration, and provides `invoke(function, fields, options, cancel)`
//! returning the result as a [`Deferred`].
//!
//! Every invocation walks the same phases:
//!
//! ```text
//! Pending ──▶ Materializing ──▶ Calling ──▶ Resolved
//!    │              │              │
//!    └──────────────┴──────────────┴──▶ Failed
//! ```
//!
//! A materialization failure never reaches `Calling`, so the provider is not
//! contacted for invalid arguments.

use std::fmt;
use std::sync::Arc;

use deferra_schema::FunctionSchema;
use serde::de::DeserializeOwned;
use tokio_util::sync::CancellationToken;
use tracing::{debug, error, info, instrument, warn};

use crate::deferred::{Deferred, Resolved};
use crate::error::InvokeError;
use crate::input::FieldInputs;
use crate::materialize::{box_fields, materialize};
use crate::meta::ValueMeta;
use crate::provider::{InvokeRequest, Provider};
use crate::result::ResultRecord;

/// Configuration for the invoker.
#[derive(Debug, Clone, Default)]
pub struct InvokerConfig {
  /// Mark every request as part of a preview.
  pub dry_run: bool,
  /// Provider version used when a call does not pin one.
  pub default_version: Option<String>,
}

/// Per-call options.
#[derive(Debug, Clone, Default)]
pub struct InvokeOptions {
  /// Pin the provider version for this call.
  pub version: Option<String>,
}

/// Where an invocation currently is.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum InvocationPhase {
  /// Waiting for supplied fields to resolve.
  #[default]
  Pending,
  /// Applying defaults and checking required fields.
  Materializing,
  /// The provider has been called.
  Calling,
  Resolved,
  Failed,
}

impl InvocationPhase {
  /// Whether `self → next` is a legal transition.
  pub fn can_transition_to(self, next: InvocationPhase) -> bool {
    matches!(
      (self, next),
      (Self::Pending, Self::Materializing)
        | (Self::Pending, Self::Failed)
        | (Self::Materializing, Self::Calling)
        | (Self::Materializing, Self::Failed)
        | (Self::Calling, Self::Resolved)
        | (Self::Calling, Self::Failed)
    )
  }

  pub fn is_terminal(self) -> bool {
    matches!(self, InvocationPhase::Resolved | InvocationPhase::Failed)
  }
}

impl fmt::Display for InvocationPhase {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    let name = match self {
      InvocationPhase::Pending => "pending",
      InvocationPhase::Materializing => "materializing",
      InvocationPhase::Calling => "calling",
      InvocationPhase::Resolved => "resolved",
      InvocationPhase::Failed => "failed",
    };
    f.write_str(name)
  }
}

/// A typed argument record that can be supplied field by field.
///
/// Unset optional fields must be left out of the returned map.
pub trait InvokeArgs {
  fn into_inputs(self) -> FieldInputs;
}

impl InvokeArgs for FieldInputs {
  fn into_inputs(self) -> FieldInputs {
    self
  }
}

/// Invokes provider functions once all of their arguments are known.
#[derive(Clone)]
pub struct Invoker {
  provider: Arc<dyn Provider>,
  config: Arc<InvokerConfig>,
}

impl Invoker {
  pub fn new(provider: Arc<dyn Provider>, config: InvokerConfig) -> Self {
    Self {
      provider,
      config: Arc::new(config),
    }
  }

  pub fn config(&self) -> &InvokerConfig {
    &self.config
  }

  /// Invoke `function` with the supplied fields.
  ///
  /// Nothing runs until the returned value is resolved. Cancelling `cancel`
  /// before the provider is called fails the invocation with
  /// [`InvokeError::Cancelled`]; afterwards the token is only passed through
  /// to the provider.
  pub fn invoke(
    &self,
    function: &FunctionSchema,
    fields: FieldInputs,
    options: InvokeOptions,
    cancel: CancellationToken,
  ) -> Deferred<ResultRecord> {
    let invocation = Invocation {
      invocation_id: uuid::Uuid::new_v4().to_string(),
      function: function.clone(),
      provider: self.provider.clone(),
      version: options.version.or_else(|| self.config.default_version.clone()),
      dry_run: self.config.dry_run,
    };

    Deferred::from_resolved(invocation.run(fields, cancel))
  }

  /// Invoke with a typed argument record and parse a typed result.
  pub fn invoke_typed<A, R>(
    &self,
    function: &FunctionSchema,
    args: A,
    options: InvokeOptions,
    cancel: CancellationToken,
  ) -> Deferred<R>
  where
    A: InvokeArgs,
    R: DeserializeOwned + Send + 'static,
  {
    self
      .invoke(function, args.into_inputs(), options, cancel)
      .try_map(|record| record.deserialize())
  }
}

/// State owned by a single invocation.
struct Invocation {
  invocation_id: String,
  function: FunctionSchema,
  provider: Arc<dyn Provider>,
  version: Option<String>,
  dry_run: bool,
}

impl Invocation {
  #[instrument(
    name = "invoke",
    skip(self, fields, cancel),
    fields(
      invocation_id = %self.invocation_id,
      token = %self.function.token,
    )
  )]
  async fn run(
    self,
    fields: FieldInputs,
    cancel: CancellationToken,
  ) -> Result<Resolved<ResultRecord>, InvokeError> {
    {
      // Field names only: values may be secret.
      let supplied: Vec<&str> = fields.keys().map(String::as_str).collect();
      info!(fields = ?supplied, dry_run = self.dry_run, "invoke_started");
    }

    let mut phase = PhaseTracker::default();
    let result = self.run_inner(fields, &cancel, &mut phase).await;

    match &result {
      Ok(resolved) => {
        phase.advance(InvocationPhase::Resolved);
        info!(
          secret = resolved.meta.secret,
          known = resolved.meta.known,
          "invoke_completed"
        );
      }
      Err(e) => {
        phase.advance(InvocationPhase::Failed);
        error!(error = %e, "invoke_failed");
      }
    }

    result
  }

  async fn run_inner(
    &self,
    fields: FieldInputs,
    cancel: &CancellationToken,
    phase: &mut PhaseTracker,
  ) -> Result<Resolved<ResultRecord>, InvokeError> {
    let combined = box_fields(fields);

    let boxed = tokio::select! {
      biased;
      _ = cancel.cancelled() => {
        warn!("invocation cancelled while collecting fields");
        return Err(InvokeError::Cancelled);
      }
      boxed = combined.resolve() => boxed?,
    };

    phase.advance(InvocationPhase::Materializing);
    let args = materialize(&self.function, boxed.value)?;
    debug!(args = ?args.names().collect::<Vec<_>>(), "arguments materialized");

    if cancel.is_cancelled() {
      warn!("invocation cancelled before provider call");
      return Err(InvokeError::Cancelled);
    }

    phase.advance(InvocationPhase::Calling);
    let request = InvokeRequest {
      invocation_id: self.invocation_id.clone(),
      token: self.function.token.clone(),
      args: args.flatten(),
      version: self.version.clone(),
      dry_run: self.dry_run,
      cancel: cancel.clone(),
    };

    let response = self
      .provider
      .invoke(request)
      .await
      .map_err(|source| InvokeError::Provider {
        token: self.function.token.clone(),
        source,
      })?;

    let record = ResultRecord::parse(&self.function, &response.outputs)?;
    let meta = boxed.meta.combine(ValueMeta {
      secret: response.secret || self.function.secret,
      known: response.known,
    });

    Ok(Resolved::new(record, meta))
  }
}

/// Tracks and logs the phase of one invocation.
#[derive(Debug, Default)]
struct PhaseTracker {
  phase: InvocationPhase,
}

impl PhaseTracker {
  fn advance(&mut self, next: InvocationPhase) {
    debug_assert!(
      self.phase.can_transition_to(next),
      "illegal invocation phase transition {} -> {}",
      self.phase,
      next
    );
    debug!(from = %self.phase, to = %next, "phase_changed");
    self.phase = next;
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  const ALL_PHASES: [InvocationPhase; 5] = [
    InvocationPhase::Pending,
    InvocationPhase::Materializing,
    InvocationPhase::Calling,
    InvocationPhase::Resolved,
    InvocationPhase::Failed,
  ];

  #[test]
  fn test_phase_transitions() {
    use InvocationPhase as P;

    assert!(P::Pending.can_transition_to(P::Materializing));
    assert!(P::Materializing.can_transition_to(P::Calling));
    assert!(P::Calling.can_transition_to(P::Resolved));
    assert!(P::Materializing.can_transition_to(P::Failed));
    assert!(P::Pending.can_transition_to(P::Failed));
  }

  #[test]
  fn test_no_phase_skips_materializing() {
    use InvocationPhase as P;

    assert!(!P::Pending.can_transition_to(P::Calling));
    assert!(!P::Pending.can_transition_to(P::Resolved));
    assert!(!P::Materializing.can_transition_to(P::Resolved));
  }

  #[test]
  fn test_terminal_phases_are_final() {
    for terminal in ALL_PHASES.into_iter().filter(|p| p.is_terminal()) {
      for next in ALL_PHASES {
        assert!(!terminal.can_transition_to(next));
      }
    }
  }

  #[test]
  fn test_phase_tracker_starts_pending() {
    assert_eq!(PhaseTracker::default().phase, InvocationPhase::Pending);
  }

  #[test]
  fn test_phase_display() {
    assert_eq!(InvocationPhase::Materializing.to_string(), "materializing");
  }
}
